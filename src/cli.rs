//! CLI argument parsing

use crate::{config, config::Config, delay::Delay, scenario::Problem};
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "semaphore-problems")]
#[command(
    author,
    version,
    about = "Readers/writers and dining philosophers on counting semaphores",
    long_about = None
)]
pub struct Cli {
    /// Problem to run: 1/no-starve, 2/writer-priority or 3/dining
    #[arg(required = true, value_name = "PROBLEM")]
    pub problem: Problem,

    /// Number of reader threads
    #[arg(short, long, default_value_t = config::DEFAULT_READERS)]
    pub readers: usize,

    /// Number of writer threads
    #[arg(short, long, default_value_t = config::DEFAULT_WRITERS)]
    pub writers: usize,

    /// Milliseconds each reader reads and each writer writes
    #[arg(long, default_value_t = config::DEFAULT_HOLD_MS)]
    pub hold_ms: u64,

    /// Seats (and forks) at the dining table
    #[arg(short, long, default_value_t = config::DEFAULT_SEATS)]
    pub seats: usize,

    /// Meals each philosopher eats
    #[arg(short, long, default_value_t = config::DEFAULT_MEALS)]
    pub meals: usize,

    /// Upper bound in milliseconds on a random thinking pause
    #[arg(long, default_value_t = config::DEFAULT_THINK_MS)]
    pub think_ms: u64,

    /// Upper bound in milliseconds on a random eating pause
    #[arg(long, default_value_t = config::DEFAULT_EAT_MS)]
    pub eat_ms: u64,

    /// Log every gate a worker waits on
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            readers: self.readers,
            writers: self.writers,
            hold: Delay::fixed(Duration::from_millis(self.hold_ms)),
            seats: self.seats,
            meals: self.meals,
            think: Delay::jitter(Duration::from_millis(self.think_ms)),
            eat: Delay::jitter(Duration::from_millis(self.eat_ms)),
        }
    }
}
