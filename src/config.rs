use crate::delay::Delay;
use std::time::Duration;

pub const DEFAULT_READERS: usize = 5;
pub const DEFAULT_WRITERS: usize = 5;
pub const DEFAULT_HOLD_MS: u64 = 1000;
pub const DEFAULT_SEATS: usize = 5;
pub const DEFAULT_MEALS: usize = 3;
pub const DEFAULT_THINK_MS: u64 = 200;
pub const DEFAULT_EAT_MS: u64 = 200;

/// Worker counts and simulated work for one scenario run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub readers: usize,
    pub writers: usize,
    /// How long each reader reads and each writer writes
    pub hold: Delay,
    pub seats: usize,
    pub meals: usize,
    pub think: Delay,
    pub eat: Delay,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            readers: DEFAULT_READERS,
            writers: DEFAULT_WRITERS,
            hold: Delay::fixed(Duration::from_millis(DEFAULT_HOLD_MS)),
            seats: DEFAULT_SEATS,
            meals: DEFAULT_MEALS,
            think: Delay::jitter(Duration::from_millis(DEFAULT_THINK_MS)),
            eat: Delay::jitter(Duration::from_millis(DEFAULT_EAT_MS)),
        }
    }
}

impl Config {
    /// Same worker counts with every delay removed.
    pub fn instant(self) -> Self {
        Self {
            hold: Delay::none(),
            think: Delay::none(),
            eat: Delay::none(),
            ..self
        }
    }
}
