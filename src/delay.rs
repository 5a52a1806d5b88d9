use rand::Rng;
use std::time::Duration;

/// Simulated work: reading, writing, thinking or eating.
///
/// Pausing never touches a semaphore, so it holds exactly what the caller already held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delay {
    #[default]
    None,
    Fixed(Duration),
    // Uniform in [0, max]
    Jitter(Duration),
}

impl Delay {
    pub fn none() -> Self {
        Delay::None
    }
    pub fn fixed(d: Duration) -> Self {
        Delay::Fixed(d)
    }
    pub fn jitter(max: Duration) -> Self {
        Delay::Jitter(max)
    }

    /// How long the next `pause()` would sleep.
    pub fn sample(&self) -> Duration {
        match *self {
            Delay::None => Duration::ZERO,
            Delay::Fixed(d) => d,
            Delay::Jitter(max) => {
                // Saturates at ~584 years
                let max = u64::try_from(max.as_nanos()).unwrap_or(u64::MAX);
                Duration::from_nanos(rand::thread_rng().gen_range(0..=max))
            }
        }
    }

    pub fn pause(&self) {
        let d = self.sample();
        if !d.is_zero() {
            std::thread::sleep(d);
        }
    }
}
