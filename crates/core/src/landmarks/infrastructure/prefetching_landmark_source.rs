use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::landmarks::domain::landmark_frame::StreamItem;
use crate::landmarks::domain::landmark_source::LandmarkSource;
use crate::shared::constants::{PREFETCH_CAPACITY, PREFETCH_SHUTDOWN_GRACE_MS};

type SendError = Box<dyn std::error::Error + Send + Sync>;

/// Decorator that pulls items from the inner source on a worker thread.
///
/// Layout: `inner source → bounded channel → caller`
///
/// Acquisition overlaps with whatever the caller does per item, while all
/// consumption (and therefore all detector mutation) stays on the calling
/// thread. The worker hands the inner source back over a second channel
/// when it finishes. A worker still stuck inside a read when the source is
/// closed is detached, and the inner source is dropped once that read returns.
pub struct PrefetchingLandmarkSource {
    inner: Option<Box<dyn LandmarkSource>>,
    capacity: usize,
    shutdown_grace: Duration,
    worker: Option<Worker>,
}

struct Worker {
    handle: JoinHandle<()>,
    items: Receiver<Result<StreamItem, SendError>>,
    returned: Receiver<Box<dyn LandmarkSource>>,
    cancelled: Arc<AtomicBool>,
}

impl PrefetchingLandmarkSource {
    pub fn new(inner: Box<dyn LandmarkSource>) -> Self {
        Self::with_capacity(inner, PREFETCH_CAPACITY)
    }

    pub fn with_capacity(inner: Box<dyn LandmarkSource>, capacity: usize) -> Self {
        Self {
            inner: Some(inner),
            capacity: capacity.max(1),
            shutdown_grace: Duration::from_millis(PREFETCH_SHUTDOWN_GRACE_MS),
            worker: None,
        }
    }

    fn spawn_worker(&mut self) {
        let Some(mut inner) = self.inner.take() else {
            return;
        };
        let (tx, items) = crossbeam_channel::bounded::<Result<StreamItem, SendError>>(self.capacity);
        let (return_tx, returned) = crossbeam_channel::bounded::<Box<dyn LandmarkSource>>(1);
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();

        let handle = std::thread::spawn(move || {
            for item in inner.frames() {
                if flag.load(Ordering::Relaxed) {
                    break;
                }
                let mapped = item.map_err(|e| -> SendError { e.to_string().into() });
                let stop = mapped.is_err();
                if tx.send(mapped).is_err() || stop {
                    break;
                }
            }
            drop(tx);
            // The receiving side is gone when the worker was detached.
            let _ = return_tx.send(inner);
        });

        self.worker = Some(Worker {
            handle,
            items,
            returned,
            cancelled,
        });
    }

    /// Cancels the worker and takes the inner source back, or detaches the
    /// worker if it does not finish within the grace period.
    fn stop_worker(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        worker.cancelled.store(true, Ordering::Relaxed);
        drop(worker.items);

        match worker.returned.recv_timeout(self.shutdown_grace) {
            Ok(inner) => {
                self.inner = Some(inner);
                if worker.handle.join().is_err() {
                    log::error!("Landmark prefetch worker panicked");
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                log::warn!(
                    "Landmark prefetch worker still blocked on input after {} ms, detaching it",
                    self.shutdown_grace.as_millis()
                );
            }
            Err(RecvTimeoutError::Disconnected) => {
                if worker.handle.join().is_err() {
                    log::error!("Landmark prefetch worker panicked");
                }
            }
        }
    }
}

impl LandmarkSource for PrefetchingLandmarkSource {
    fn open(&mut self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        self.stop_worker();
        match self.inner.as_mut() {
            Some(inner) => inner.open(path),
            None => Err("landmark source is unavailable".into()),
        }
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<StreamItem, Box<dyn std::error::Error>>> + '_> {
        if self.worker.is_none() {
            self.spawn_worker();
        }
        let Some(worker) = self.worker.as_ref() else {
            return Box::new(std::iter::empty());
        };
        Box::new(worker.items.iter().map(|item| {
            item.map_err(|e| -> Box<dyn std::error::Error> { e.to_string().into() })
        }))
    }

    fn close(&mut self) {
        self.stop_worker();
        if let Some(inner) = self.inner.as_mut() {
            inner.close();
        }
    }
}
