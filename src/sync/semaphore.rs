use super::{Mutex, MutexGuard};
use std::sync::{Condvar, PoisonError};

/// Counting semaphore built on a std mutex and condition variable.
///
/// `wait()` blocks until the count is positive and then takes one unit, `signal()` returns one
/// unit and wakes a single waiter. Which waiter wakes is up to the platform: the only promise is
/// that one of them eventually does. Everything the signaller wrote before `signal()` is visible
/// to the waiter once `wait()` returns, since both pass through the same std mutex.
#[derive(Debug)]
pub struct Semaphore {
    count: std::sync::Mutex<usize>,
    cv: Condvar,
}

impl Semaphore {
    pub fn new(count: usize) -> Self {
        Self {
            count: std::sync::Mutex::new(count),
            cv: Condvar::new(),
        }
    }

    pub fn wait(&self) {
        // Poison only means another thread panicked while holding the count,
        // the count itself is still a plain integer
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        while *count == 0 {
            count = self.cv.wait(count).unwrap_or_else(PoisonError::into_inner);
        }
        *count -= 1;
    }

    pub fn signal(&self) {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        *count += 1;
        self.cv.notify_one();
    }

    /// Takes one unit if available without blocking.
    pub fn try_wait(&self) -> bool {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// Units currently available. Stale as soon as it returns.
    pub fn available(&self) -> usize {
        *self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Mutex for Semaphore {
    fn acquire(&self) -> MutexGuard<'_, Self> {
        self.wait();
        MutexGuard { mutex: self }
    }
    fn release(&self) {
        self.signal()
    }
}

#[cfg(test)]
mod tests {
    use crate::sync::{Mutex, Semaphore};
    use std::sync::{
        atomic::{AtomicI32, AtomicUsize, Ordering},
        mpsc, Arc,
    };
    use std::time::Duration;

    #[test]
    fn counts_down_then_blocks() {
        let sem = Semaphore::new(2);
        assert!(sem.try_wait());
        assert!(sem.try_wait());
        assert!(!sem.try_wait());
        assert_eq!(sem.available(), 0);
        sem.signal();
        assert_eq!(sem.available(), 1);
        sem.wait();
        assert_eq!(sem.available(), 0);
    }

    #[test]
    fn signal_wakes_blocked_waiter() {
        let sem = Arc::new(Semaphore::new(0));
        let th = std::thread::spawn({
            let sem = sem.clone();
            move || sem.wait()
        });
        std::thread::sleep(Duration::from_millis(100));
        assert!(!th.is_finished());

        sem.signal();
        th.join().unwrap();
        assert_eq!(sem.available(), 0);
    }

    #[test]
    fn guard_releases_on_drop() {
        let sem = Semaphore::new(1);
        {
            let _guard = sem.acquire();
            assert_eq!(sem.available(), 0);
        }
        assert_eq!(sem.available(), 1);
    }

    #[test]
    fn mutual_exclusion() {
        const N_THREADS: i32 = 4;
        const WORK: i32 = 10_000;
        let sem = Arc::new(Semaphore::new(1));
        let incr = Arc::new(AtomicI32::new(0));
        let ths = (0..N_THREADS)
            .map(|_| {
                let sem = sem.clone();
                let incr = incr.clone();
                std::thread::spawn(move || {
                    for _ in 0..WORK {
                        let _guard = sem.acquire();
                        // Split load/store loses updates unless the semaphore excludes
                        let i = incr.load(Ordering::Relaxed);
                        incr.store(i + 1, Ordering::Relaxed);
                    }
                })
            })
            .collect::<Vec<_>>();
        ths.into_iter().for_each(|th| th.join().unwrap());
        assert_eq!(incr.load(Ordering::Relaxed), N_THREADS * WORK);
    }

    #[test]
    fn counting_bounds_concurrency() {
        const PERMITS: usize = 3;
        let sem = Arc::new(Semaphore::new(PERMITS));
        let inside = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let ths = (0..10)
            .map(|_| {
                let sem = sem.clone();
                let inside = inside.clone();
                let peak = peak.clone();
                std::thread::spawn(move || {
                    let _guard = sem.acquire();
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(20));
                    inside.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect::<Vec<_>>();
        ths.into_iter().for_each(|th| th.join().unwrap());
        assert!(peak.load(Ordering::SeqCst) <= PERMITS);
        assert_eq!(sem.available(), PERMITS);
    }

    #[test]
    fn every_signal_wakes_someone() {
        const WAITERS: usize = 8;
        let sem = Arc::new(Semaphore::new(0));
        let (tx, rx) = mpsc::channel();
        let ths = (0..WAITERS)
            .map(|i| {
                let sem = sem.clone();
                let tx = tx.clone();
                std::thread::spawn(move || {
                    sem.wait();
                    tx.send(i).unwrap();
                })
            })
            .collect::<Vec<_>>();
        for _ in 0..WAITERS {
            sem.signal();
        }
        let mut woken = (0..WAITERS)
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect::<Vec<_>>();
        woken.sort();
        assert_eq!(woken, (0..WAITERS).collect::<Vec<_>>());
        ths.into_iter().for_each(|th| th.join().unwrap());
    }
}
