pub mod lightswitch;
pub mod semaphore;

pub use lightswitch::Lightswitch;
pub use semaphore::Semaphore;

/// Anything that can be held by one party at a time and handed back.
///
/// `acquire()` may block for as long as another party holds the lock. The returned guard
/// releases on drop, so scoped critical sections never leak a permit. `release()` is the
/// unpaired form used by protocols whose acquire and release happen in different calls,
/// e.g. `begin_write()`/`end_write()`.
pub trait Mutex {
    fn acquire(&self) -> MutexGuard<'_, Self>;
    // Caller must have acquired beforehand, releasing an unheld lock is a protocol violation
    fn release(&self);
}

#[must_use = "dropping the guard releases the lock immediately"]
pub struct MutexGuard<'a, M: Mutex + ?Sized> {
    pub(crate) mutex: &'a M,
}

impl<M: Mutex + ?Sized> Drop for MutexGuard<'_, M> {
    fn drop(&mut self) {
        self.mutex.release()
    }
}
