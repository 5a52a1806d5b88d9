//! Classic shared-resource problems solved with nothing but counting semaphores.
//!
//! * [`rw::NoStarve`]: readers and writers, neither side can starve the other.
//! * [`rw::WriterPriority`]: readers and writers, waiting writers always go first.
//! * [`dining::Table`]: dining philosophers, deadlock broken by alternating fork order.
//!
//! [`scenario`] drives any of them with a fixed set of worker threads.

use std::fmt;

pub mod cli;
pub mod config;
pub mod delay;
pub mod dining;
pub mod error;
pub mod rw;
pub mod scenario;
pub mod sync;

/// Identity of a reader or writer, handed to the coordinator on every call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(pub usize);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for WorkerId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}
