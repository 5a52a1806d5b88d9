pub mod no_starve;
pub mod writer_priority;

pub use no_starve::NoStarve;
pub use writer_priority::WriterPriority;

use crate::{delay::Delay, WorkerId};

/// Coordinates readers and writers around one shared integer.
///
/// Any number of readers may sit between `begin_read()` and `end_read()` together. A writer
/// between `begin_write()` and `end_write()` excludes every reader and every other writer.
/// Each `begin_*` must be paired with the matching `end_*` on the same thread of control;
/// anything else leaves the coordinator in an undefined state.
pub trait ReaderWriter {
    /// Admits a reader and returns the value it observed.
    fn begin_read(&self, id: WorkerId) -> u64;
    fn end_read(&self, id: WorkerId);
    /// Admits a writer, increments the shared value and returns the new value.
    fn begin_write(&self, id: WorkerId) -> u64;
    fn end_write(&self, id: WorkerId);
    /// Current shared value, for reporting once workers are done.
    fn value(&self) -> u64;

    // Single-pass reader body: admit, read for `delay`, leave
    fn read(&self, id: WorkerId, delay: Delay) -> u64 {
        let v = self.begin_read(id);
        delay.pause();
        self.end_read(id);
        v
    }
    // Single-pass writer body: admit and increment, hold for `delay`, leave
    fn write(&self, id: WorkerId, delay: Delay) -> u64 {
        let v = self.begin_write(id);
        delay.pause();
        self.end_write(id);
        v
    }
}
