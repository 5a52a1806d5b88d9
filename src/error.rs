use thiserror::Error;

/// Ways a scenario can be misconfigured before any worker starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("Unknown problem '{0}' (expected 1/no-starve, 2/writer-priority or 3/dining)")]
    UnknownProblem(String),

    #[error("Dining table needs at least 2 seats, got {0}")]
    TooFewSeats(usize),

    #[error("No seat {id} at a table of {seats}")]
    NoSuchSeat { id: usize, seats: usize },

    #[error("Scenario has no workers to run")]
    NoWorkers,
}
