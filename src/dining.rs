use crate::{delay::Delay, error::ScenarioError, sync::Semaphore};
use log::{debug, info};
use std::fmt;

/// Where a philosopher is in its meal cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhilosopherState {
    Thinking,
    AcquiringFirstFork,
    AcquiringSecondFork,
    Eating,
    Releasing,
    Done,
}

impl fmt::Display for PhilosopherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PhilosopherState::Thinking => "thinking",
            PhilosopherState::AcquiringFirstFork => "acquiring first fork",
            PhilosopherState::AcquiringSecondFork => "acquiring second fork",
            PhilosopherState::Eating => "eating",
            PhilosopherState::Releasing => "releasing forks",
            PhilosopherState::Done => "done",
        };
        f.write_str(s)
    }
}

/// A seat at the table and the two forks next to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Philosopher {
    pub id: usize,
    pub left: usize,
    pub right: usize,
}

impl Philosopher {
    /// # Panics
    ///
    /// If `id >= seats`. [`Table::philosopher`] checks this and returns an error instead.
    pub fn new(id: usize, seats: usize) -> Self {
        assert!(id < seats, "Expect 0-based seat {id} < seats={seats}");
        Self {
            id,
            left: (id + seats - 1) % seats,
            right: id,
        }
    }

    /// Forks in the order this philosopher picks them up.
    ///
    /// Even seats go left then right, odd seats right then left. Neighbours disagree on direction
    /// somewhere around the table, so the wait-for chain can never close into a cycle.
    pub fn fork_order(&self) -> (usize, usize) {
        if self.id % 2 == 0 {
            (self.left, self.right)
        } else {
            (self.right, self.left)
        }
    }
}

/// Round table of `seats` philosophers with one fork between each neighbouring pair.
///
/// Forks are binary semaphores indexed by seat: fork `i` sits to the right of philosopher `i`
/// and to the left of philosopher `i + 1`.
#[derive(Debug)]
pub struct Table {
    forks: Vec<Semaphore>,
    think: Delay,
    eat: Delay,
}

impl Table {
    pub fn new(seats: usize, think: Delay, eat: Delay) -> Result<Self, ScenarioError> {
        // A lone philosopher would need the same fork twice
        if seats < 2 {
            return Err(ScenarioError::TooFewSeats(seats));
        }
        Ok(Self {
            forks: (0..seats).map(|_| Semaphore::new(1)).collect(),
            think,
            eat,
        })
    }

    pub fn seats(&self) -> usize {
        self.forks.len()
    }

    pub fn philosopher(&self, id: usize) -> Result<Philosopher, ScenarioError> {
        let seats = self.seats();
        if id >= seats {
            return Err(ScenarioError::NoSuchSeat { id, seats });
        }
        Ok(Philosopher::new(id, seats))
    }

    /// Runs philosopher `id` for `meals` meals and returns how many it ate.
    pub fn dine(&self, id: usize, meals: usize) -> Result<usize, ScenarioError> {
        self.dine_with(id, meals, |_, _| {})
    }

    /// Like [`Table::dine`], but calls `observe` on every state change.
    ///
    /// `observe` runs inside the state it is told about: for `Eating` both forks are held, for
    /// `Thinking` none are.
    pub fn dine_with<F>(
        &self,
        id: usize,
        meals: usize,
        mut observe: F,
    ) -> Result<usize, ScenarioError>
    where
        F: FnMut(&Philosopher, PhilosopherState),
    {
        let p = self.philosopher(id)?;
        let (first, second) = p.fork_order();
        let mut eaten = 0;

        while eaten < meals {
            info!("Philosopher {id} thinking");
            observe(&p, PhilosopherState::Thinking);
            self.think.pause();

            debug!("Philosopher {id} waiting for fork {first}");
            observe(&p, PhilosopherState::AcquiringFirstFork);
            self.forks[first].wait();
            info!("Philosopher {id} picked up fork {first}");

            debug!("Philosopher {id} waiting for fork {second}");
            observe(&p, PhilosopherState::AcquiringSecondFork);
            self.forks[second].wait();
            info!("Philosopher {id} picked up fork {second}");

            eaten += 1;
            info!("Philosopher {id} eating (meal {eaten} of {meals})");
            observe(&p, PhilosopherState::Eating);
            self.eat.pause();

            observe(&p, PhilosopherState::Releasing);
            self.forks[second].signal();
            self.forks[first].signal();
            info!("Philosopher {id} put down forks {first} and {second}");
        }

        observe(&p, PhilosopherState::Done);
        debug!("Philosopher {id} done after {eaten} meals");
        Ok(eaten)
    }
}
