//! Trailing-edge debouncing.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Quiet window used for viewport resize recalculation.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Runs the most recent action once triggers stop arriving for `delay`.
///
/// Each trigger cancels the pending action and restarts the window.
/// Dropping the debouncer cancels whatever is pending.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Debouncer with the [`RESIZE_DEBOUNCE`] window.
    pub fn for_resize() -> Self {
        Self::new(RESIZE_DEBOUNCE)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `action`, replacing any pending one.
    ///
    /// Must be called inside a tokio runtime.
    pub fn trigger<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        }));
    }

    /// Drop the pending action, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Check if an action is waiting to run.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::for_resize()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let make = move || {
            let c = Arc::clone(&c);
            Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }) as Box<dyn FnOnce() + Send>
        };
        (count, make)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_once() {
        let (count, action) = counter();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        for _ in 0..5 {
            debouncer.trigger(action());
            tokio::time::sleep(Duration::from_millis(40)).await;
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_windows_run_separately() {
        let (count, action) = counter();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.trigger(action());
        tokio::time::sleep(Duration::from_millis(150)).await;
        debouncer.trigger(action());
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (count, action) = counter();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        debouncer.trigger(action());
        drop(debouncer);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
