//! Bounded image preload queue.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use tokio::sync::{mpsc, oneshot, Semaphore};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::PreloadError;

/// Maximum number of images loading at once.
pub const DEFAULT_PRELOAD_CONCURRENCY: usize = 3;

/// Something that can warm an image reference.
#[async_trait]
pub trait ImageLoader: Send + Sync + 'static {
    /// Load one image. The queue does not time out slow loads.
    async fn load(&self, image: &str) -> Result<(), PreloadError>;
}

/// Result of one preload job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadOutcome {
    /// The image reference that was requested.
    pub image: String,
    pub result: Result<(), PreloadError>,
    /// Time spent loading, excluding time spent queued.
    pub elapsed: Duration,
}

impl PreloadOutcome {
    pub fn is_loaded(&self) -> bool {
        self.result.is_ok()
    }
}

struct Job {
    image: String,
    done: oneshot::Sender<PreloadOutcome>,
}

/// Completion handle for an enqueued image.
#[derive(Debug)]
pub struct PreloadHandle {
    image: String,
    done: oneshot::Receiver<PreloadOutcome>,
}

impl PreloadHandle {
    /// Wait for the job to finish.
    ///
    /// Resolves to [`PreloadError::QueueClosed`] if the queue went away
    /// before the job could run.
    pub async fn wait(self) -> PreloadOutcome {
        match self.done.await {
            Ok(outcome) => outcome,
            Err(_) => PreloadOutcome {
                image: self.image,
                result: Err(PreloadError::QueueClosed),
                elapsed: Duration::ZERO,
            },
        }
    }
}

/// Semaphore-guarded preload queue.
///
/// At most `concurrency` loads run at once. Jobs are admitted strictly in
/// enqueue order as slots free up, and complete independently of each other.
/// A load that never finishes keeps its slot forever.
///
/// Dropping the queue stops admission; loads already running are left to
/// finish.
pub struct PreloadQueue {
    jobs: mpsc::UnboundedSender<Job>,
    permits: Arc<Semaphore>,
    concurrency: usize,
    dispatcher: JoinHandle<()>,
}

impl PreloadQueue {
    /// Create a queue with [`DEFAULT_PRELOAD_CONCURRENCY`] slots.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(loader: impl ImageLoader) -> Self {
        Self::with_concurrency(loader, DEFAULT_PRELOAD_CONCURRENCY)
    }

    /// Create a queue with a custom slot count (at least 1).
    pub fn with_concurrency(loader: impl ImageLoader, concurrency: usize) -> Self {
        let concurrency = concurrency.max(1);
        let permits = Arc::new(Semaphore::new(concurrency));
        let (jobs, queue) = mpsc::unbounded_channel();
        let dispatcher = tokio::spawn(dispatch(Arc::new(loader), Arc::clone(&permits), queue));

        Self {
            jobs,
            permits,
            concurrency,
            dispatcher,
        }
    }

    /// Queue an image for preloading.
    pub fn enqueue(&self, image: impl Into<String>) -> PreloadHandle {
        let image = image.into();
        let (done, rx) = oneshot::channel();
        if self
            .jobs
            .send(Job {
                image: image.clone(),
                done,
            })
            .is_err()
        {
            tracing::warn!(%image, "preload queue closed, dropping job");
        }
        PreloadHandle { image, done: rx }
    }

    /// Queue every image and wait for all of them, in input order.
    pub async fn preload_all<I, T>(&self, images: I) -> Vec<PreloadOutcome>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let handles: Vec<PreloadHandle> = images.into_iter().map(|i| self.enqueue(i)).collect();
        join_all(handles.into_iter().map(PreloadHandle::wait)).await
    }

    /// Number of slots.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Number of loads currently holding a slot.
    pub fn in_flight(&self) -> usize {
        self.concurrency - self.permits.available_permits()
    }
}

impl Drop for PreloadQueue {
    fn drop(&mut self) {
        self.dispatcher.abort();
    }
}

impl std::fmt::Debug for PreloadQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreloadQueue")
            .field("concurrency", &self.concurrency)
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

/// Admit jobs one at a time, each once a slot is free.
async fn dispatch(
    loader: Arc<dyn ImageLoader>,
    permits: Arc<Semaphore>,
    mut queue: mpsc::UnboundedReceiver<Job>,
) {
    while let Some(job) = queue.recv().await {
        let permit = match Arc::clone(&permits).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => break,
        };
        let loader = Arc::clone(&loader);

        tokio::spawn(async move {
            let start = Instant::now();
            tracing::debug!(image = %job.image, "preload started");
            let result = loader.load(&job.image).await;
            drop(permit);

            if let Err(e) = &result {
                tracing::warn!(image = %job.image, error = %e, "preload failed");
            }
            // The receiver may be gone; the load still counts.
            let _ = job.done.send(PreloadOutcome {
                image: job.image,
                result,
                elapsed: start.elapsed(),
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Sleeps per image and records concurrency and start order.
    #[derive(Default)]
    struct RecordingLoader {
        current: AtomicUsize,
        peak: AtomicUsize,
        started: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ImageLoader for Arc<RecordingLoader> {
        async fn load(&self, image: &str) -> Result<(), PreloadError> {
            self.started.lock().unwrap().push(image.to_string());
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(50)).await;

            self.current.fetch_sub(1, Ordering::SeqCst);
            if image.ends_with(".missing") {
                Err(PreloadError::NotFound(image.to_string()))
            } else {
                Ok(())
            }
        }
    }

    /// Never completes.
    struct StuckLoader;

    #[async_trait]
    impl ImageLoader for StuckLoader {
        async fn load(&self, image: &str) -> Result<(), PreloadError> {
            if image.starts_with("stuck") {
                futures::future::pending::<()>().await;
            }
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_at_most_three_in_flight() {
        let loader = Arc::new(RecordingLoader::default());
        let queue = PreloadQueue::new(Arc::clone(&loader));

        let images: Vec<String> = (0..10).map(|i| format!("/images/{i}.webp")).collect();
        let outcomes = queue.preload_all(images.clone()).await;

        assert_eq!(outcomes.len(), 10);
        assert!(outcomes.iter().all(PreloadOutcome::is_loaded));
        assert_eq!(loader.peak.load(Ordering::SeqCst), 3);
        assert_eq!(queue.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fifo_admission() {
        let loader = Arc::new(RecordingLoader::default());
        let queue = PreloadQueue::with_concurrency(Arc::clone(&loader), 1);

        let images: Vec<String> = (0..5).map(|i| format!("img-{i}")).collect();
        queue.preload_all(images.clone()).await;

        assert_eq!(*loader.started.lock().unwrap(), images);
        assert_eq!(loader.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_per_job() {
        let loader = Arc::new(RecordingLoader::default());
        let queue = PreloadQueue::new(loader);

        let outcomes = queue.preload_all(["a.webp", "b.missing", "c.webp"]).await;
        assert!(outcomes[0].is_loaded());
        assert_eq!(
            outcomes[1].result,
            Err(PreloadError::NotFound("b.missing".to_string()))
        );
        assert!(outcomes[2].is_loaded());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stuck_job_keeps_its_slot() {
        let queue = PreloadQueue::with_concurrency(StuckLoader, 1);

        let _stuck = queue.enqueue("stuck.webp");
        let next = queue.enqueue("next.webp");

        let waited = tokio::time::timeout(Duration::from_secs(60), next.wait()).await;
        assert!(waited.is_err());
        assert_eq!(queue.in_flight(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_queue_closes_pending_jobs() {
        let queue = PreloadQueue::with_concurrency(StuckLoader, 1);
        let _stuck = queue.enqueue("stuck.webp");
        let pending = queue.enqueue("pending.webp");
        tokio::task::yield_now().await;

        drop(queue);
        let outcome = pending.wait().await;
        assert_eq!(outcome.result, Err(PreloadError::QueueClosed));
        assert_eq!(outcome.image, "pending.webp");
    }
}
