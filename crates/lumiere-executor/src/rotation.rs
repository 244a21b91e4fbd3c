//! Interval-driven slide rotation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Advances a slide index on a fixed interval, wrapping at the slide count.
///
/// The index is published through a watch channel. Rotation stops when the
/// rotator is stopped or dropped.
#[derive(Debug)]
pub struct SlideRotator {
    slide_count: usize,
    index: Arc<watch::Sender<usize>>,
    ticker: Option<JoinHandle<()>>,
}

impl SlideRotator {
    /// Start rotating at slide 0. The first advance happens after one
    /// `period`. Fewer than two slides never rotate.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start(slide_count: usize, period: Duration) -> Self {
        let (tx, _rx) = watch::channel(0usize);
        let index = Arc::new(tx);

        let ticker = (slide_count > 1 && !period.is_zero()).then(|| {
            let index = Arc::clone(&index);
            tokio::spawn(async move {
                let mut ticks = interval_at(Instant::now() + period, period);
                ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticks.tick().await;
                    index.send_modify(|i| *i = (*i + 1) % slide_count);
                }
            })
        });

        Self {
            slide_count,
            index,
            ticker,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Current slide index.
    pub fn current(&self) -> usize {
        *self.index.borrow()
    }

    /// Receiver that observes every index change.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.index.subscribe()
    }

    /// Jump to a slide. Out-of-range indices wrap.
    pub fn go_to(&self, slide: usize) {
        if self.slide_count == 0 {
            return;
        }
        self.index.send_replace(slide % self.slide_count);
    }

    /// Stop advancing. The current index stays readable.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }
}

impl Drop for SlideRotator {
    fn drop(&mut self) {
        self.stop();
    }
}
