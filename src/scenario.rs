use crate::{
    config::Config,
    dining::Table,
    error::ScenarioError,
    rw::{NoStarve, ReaderWriter, WriterPriority},
    WorkerId,
};
use anyhow::{anyhow, Context, Result};
use log::info;
use std::{
    fmt,
    str::FromStr,
    thread::{self, ScopedJoinHandle},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Problem {
    NoStarve,
    WriterPriority,
    Dining,
}

impl FromStr for Problem {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "no-starve" => Ok(Problem::NoStarve),
            "2" | "writer-priority" => Ok(Problem::WriterPriority),
            "3" | "dining" => Ok(Problem::Dining),
            _ => Err(ScenarioError::UnknownProblem(s.to_string())),
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Problem::NoStarve => "No-starve Readers/Writers",
            Problem::WriterPriority => "Writer-priority Readers/Writers",
            Problem::Dining => "Dining Philosophers",
        };
        f.write_str(s)
    }
}

/// What a finished scenario left behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Final shared value of a readers/writers run
    SharedValue(u64),
    /// Meals eaten, indexed by seat
    Meals(Vec<usize>),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::SharedValue(v) => write!(f, "final shared value: {v}"),
            Outcome::Meals(meals) => {
                let meals = meals.iter().map(|m| m.to_string()).collect::<Vec<_>>().join(", ");
                write!(f, "meals eaten per seat: [{meals}]")
            }
        }
    }
}

/// Builds the coordinator for `problem`, runs every worker to completion and reports the outcome.
pub fn run(problem: Problem, config: &Config) -> Result<Outcome> {
    info!("Running {problem}");
    match problem {
        Problem::NoStarve => readers_writers(&NoStarve::new(), config),
        Problem::WriterPriority => readers_writers(&WriterPriority::new(), config),
        Problem::Dining => {
            let table = Table::new(config.seats, config.think, config.eat)?;
            dining(&table, config.meals)
        }
    }
}

/// Spawns reader `i` and writer `i` side by side and waits for all of them.
pub fn readers_writers<RW: ReaderWriter + Sync>(rw: &RW, config: &Config) -> Result<Outcome> {
    if config.readers == 0 && config.writers == 0 {
        return Err(ScenarioError::NoWorkers.into());
    }
    let hold = config.hold;

    thread::scope(|s| {
        let mut workers = Vec::new();
        let spawned = (|| -> Result<()> {
            for i in 0..config.readers.max(config.writers) {
                let id = WorkerId(i);
                if i < config.readers {
                    let name = format!("reader-{id}");
                    let th = thread::Builder::new()
                        .name(name.clone())
                        .spawn_scoped(s, move || {
                            rw.read(id, hold);
                        })
                        .with_context(|| format!("Failed to spawn {name}"))?;
                    workers.push((name, th));
                }
                if i < config.writers {
                    let name = format!("writer-{id}");
                    let th = thread::Builder::new()
                        .name(name.clone())
                        .spawn_scoped(s, move || {
                            rw.write(id, hold);
                        })
                        .with_context(|| format!("Failed to spawn {name}"))?;
                    workers.push((name, th));
                }
            }
            Ok(())
        })();
        let joined = join_all(workers);
        spawned.and(joined)
    })?;

    Ok(Outcome::SharedValue(rw.value()))
}

/// Seats one philosopher per seat, each eating `meals` meals.
pub fn dining(table: &Table, meals: usize) -> Result<Outcome> {
    let eaten = thread::scope(|s| {
        let mut philosophers = Vec::with_capacity(table.seats());
        let spawned = (|| -> Result<()> {
            for id in 0..table.seats() {
                let name = format!("philosopher-{id}");
                let th = thread::Builder::new()
                    .name(name.clone())
                    .spawn_scoped(s, move || table.dine(id, meals))
                    .with_context(|| format!("Failed to spawn {name}"))?;
                philosophers.push((name, th));
            }
            Ok(())
        })();
        let joined = join_all(philosophers);
        spawned.and(joined)
    })?;

    let eaten = eaten.into_iter().collect::<Result<Vec<_>, _>>()?;
    Ok(Outcome::Meals(eaten))
}

/// Joins every worker, even after one has failed, then reports the first failure.
///
/// Leaving a panicked handle unjoined would make `thread::scope` panic on exit.
fn join_all<T>(workers: Vec<(String, ScopedJoinHandle<'_, T>)>) -> Result<Vec<T>> {
    let mut results = Vec::with_capacity(workers.len());
    let mut failed = None;
    for (name, th) in workers {
        match th.join() {
            Ok(v) => results.push(v),
            Err(_) => {
                log::error!("{name} panicked");
                if failed.is_none() {
                    failed = Some(anyhow!("{name} panicked"));
                }
            }
        }
    }
    match failed {
        Some(err) => Err(err),
        None => Ok(results),
    }
}
