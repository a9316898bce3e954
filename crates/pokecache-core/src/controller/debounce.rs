use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// A single cancellable delayed action.
///
/// Every `schedule` aborts the previous timer and starts a new one tagged
/// with a fresh epoch. Consumers must check `is_current` when the timer's
/// output arrives: an aborted timer that already fired carries a stale epoch.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    epoch: u64,
    handle: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            epoch: 0,
            handle: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending timer and run `on_fire(epoch)` after the quiet period.
    /// Must be called from within a tokio runtime.
    pub fn schedule<F, Fut>(&mut self, on_fire: F) -> u64
    where
        F: FnOnce(u64) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.epoch += 1;
        let epoch = self.epoch;
        // Deadline is fixed now, not when the task is first polled
        let deadline = Instant::now() + self.delay;
        self.handle = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            on_fire(epoch).await;
        }));
        epoch
    }

    /// Abort the pending timer, if any. Its epoch becomes stale.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        epoch == self.epoch
    }

    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
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

    #[tokio::test(start_paused = true)]
    async fn test_only_last_schedule_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        for _ in 0..4 {
            let fired = Arc::clone(&fired);
            debouncer.schedule(move |_| async move {
                fired.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::advance(Duration::from_millis(50)).await;
        }

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let counter = Arc::clone(&fired);
        let epoch = debouncer.schedule(move |_| async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(debouncer.is_current(epoch));
        debouncer.cancel();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_epochs_increase() {
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        let first = debouncer.schedule(|_| async {});
        let second = debouncer.schedule(|_| async {});
        assert!(second > first);
        assert!(!debouncer.is_current(first));
        assert!(debouncer.is_current(second));
    }
}
