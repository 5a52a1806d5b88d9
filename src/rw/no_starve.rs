use super::ReaderWriter;
use crate::{
    sync::{Lightswitch, Semaphore},
    WorkerId,
};
use log::{debug, info};
use std::sync::atomic::{AtomicU64, Ordering};

/// Readers/writers where neither side can starve the other.
///
/// Every arrival passes the turnstile. Readers only pass through it, writers keep it until they
/// are done, so once a writer is at the turnstile no later reader can get ahead of it. The writer
/// then waits only for the readers that were already past the turnstile.
#[derive(Debug)]
pub struct NoStarve {
    turnstile: Semaphore,
    // 1 when nobody is inside
    room_empty: Semaphore,
    readers: Lightswitch,
    shared: AtomicU64,
}

impl Default for NoStarve {
    fn default() -> Self {
        Self {
            turnstile: Semaphore::new(1),
            room_empty: Semaphore::new(1),
            readers: Lightswitch::new(),
            shared: AtomicU64::new(0),
        }
    }
}

impl NoStarve {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReaderWriter for NoStarve {
    fn begin_read(&self, id: WorkerId) -> u64 {
        debug!("Reader {id} at turnstile");
        self.turnstile.wait();
        self.turnstile.signal();

        self.readers.lock(&self.room_empty);
        let v = self.shared.load(Ordering::Relaxed);
        info!("Reader {id} reading: {v}");
        v
    }

    fn end_read(&self, id: WorkerId) {
        self.readers.unlock(&self.room_empty);
        info!("Reader {id} done reading");
    }

    fn begin_write(&self, id: WorkerId) -> u64 {
        debug!("Writer {id} at turnstile");
        self.turnstile.wait();
        self.room_empty.wait();

        // Load and store rather than fetch_add: exclusion is the semaphores' job
        let v = self.shared.load(Ordering::Relaxed) + 1;
        self.shared.store(v, Ordering::Relaxed);
        info!("Writer {id} writing new value: {v}");
        v
    }

    fn end_write(&self, id: WorkerId) {
        self.room_empty.signal();
        self.turnstile.signal();
        info!("Writer {id} done writing");
    }

    fn value(&self) -> u64 {
        self.shared.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        delay::Delay,
        rw::{tests, NoStarve, ReaderWriter},
        WorkerId,
    };
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn sequential_works() {
        let rw = NoStarve::new();
        assert_eq!(rw.read(WorkerId(0), Delay::none()), 0);
        assert_eq!(rw.write(WorkerId(0), Delay::none()), 1);
        assert_eq!(rw.write(WorkerId(1), Delay::none()), 2);
        assert_eq!(rw.read(WorkerId(1), Delay::none()), 2);
        assert_eq!(rw.value(), 2);
    }

    #[test]
    fn mutual_exclusion() {
        const WORKERS: usize = 4;
        const ROUNDS: usize = 50;
        let rw = NoStarve::new();
        let occ = tests::exclusion(&rw, WORKERS, ROUNDS);
        assert_eq!(occ.violations(), 0);
        assert_eq!(rw.value(), (WORKERS * ROUNDS) as u64);
    }

    #[test]
    fn readers_share_the_room() {
        let rw = NoStarve::new();
        assert_eq!(tests::concurrent_readers(&rw, 5), 5);
    }

    #[test]
    fn five_readers_five_writers() {
        let rw = NoStarve::new();
        let occ = tests::single_pass(&rw, 5, 5, Delay::fixed(Duration::from_millis(10)));
        assert_eq!(occ.violations(), 0);
        assert_eq!(rw.value(), 5);
    }

    #[test]
    fn no_starvation() {
        let rw = Arc::new(NoStarve::new());

        // Reader 0 is inside
        rw.begin_read(WorkerId(0));

        // Writer takes the turnstile and waits for the room
        let writer = std::thread::spawn({
            let rw = rw.clone();
            move || {
                let v = rw.begin_write(WorkerId(0));
                std::thread::sleep(Duration::from_millis(100));
                rw.end_write(WorkerId(0));
                v
            }
        });
        std::thread::sleep(Duration::from_millis(100));
        assert!(!writer.is_finished());

        // Later readers queue at the turnstile behind the writer
        let late = (1..4)
            .map(|i| {
                let rw = rw.clone();
                std::thread::spawn(move || rw.read(WorkerId(i), Delay::none()))
            })
            .collect::<Vec<_>>();
        std::thread::sleep(Duration::from_millis(100));
        assert!(late.iter().all(|th| !th.is_finished()));
        assert_eq!(rw.value(), 0);

        // Reader 0 leaves, writer goes before every late reader
        rw.end_read(WorkerId(0));
        assert_eq!(writer.join().unwrap(), 1);
        for th in late {
            assert_eq!(th.join().unwrap(), 1);
        }
    }
}
