use super::ReaderWriter;
use crate::{
    sync::{Lightswitch, Semaphore},
    WorkerId,
};
use log::{debug, info};
use std::sync::atomic::{AtomicU64, Ordering};

/// Readers/writers where a waiting writer always beats a newly arriving reader.
///
/// Readers pass `writer_gate` as a checkpoint. Writers close it through their own lightswitch:
/// the first writer to arrive shuts it for every writer queued behind, the last writer out
/// reopens it. Writers then take turns on `no_writers`, the room readers share. Under a steady
/// stream of writers readers can starve.
#[derive(Debug)]
pub struct WriterPriority {
    writer_gate: Semaphore,
    // 1 when nobody is inside
    no_writers: Semaphore,
    readers: Lightswitch,
    writers: Lightswitch,
    shared: AtomicU64,
}

impl Default for WriterPriority {
    fn default() -> Self {
        Self {
            writer_gate: Semaphore::new(1),
            no_writers: Semaphore::new(1),
            readers: Lightswitch::new(),
            writers: Lightswitch::new(),
            shared: AtomicU64::new(0),
        }
    }
}

impl WriterPriority {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReaderWriter for WriterPriority {
    fn begin_read(&self, id: WorkerId) -> u64 {
        debug!("Reader {id} at writer gate");
        self.writer_gate.wait();
        self.writer_gate.signal();

        self.readers.lock(&self.no_writers);
        let v = self.shared.load(Ordering::Relaxed);
        info!("Reader {id} reading: {v}");
        v
    }

    fn end_read(&self, id: WorkerId) {
        self.readers.unlock(&self.no_writers);
        info!("Reader {id} done reading");
    }

    fn begin_write(&self, id: WorkerId) -> u64 {
        debug!("Writer {id} closing writer gate");
        self.writers.lock(&self.writer_gate);
        self.no_writers.wait();

        let v = self.shared.load(Ordering::Relaxed) + 1;
        self.shared.store(v, Ordering::Relaxed);
        info!("Writer {id} writing new value: {v}");
        v
    }

    fn end_write(&self, id: WorkerId) {
        self.no_writers.signal();
        self.writers.unlock(&self.writer_gate);
        info!("Writer {id} done writing");
    }

    fn value(&self) -> u64 {
        self.shared.load(Ordering::Relaxed)
    }
}
