use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Holds at most one pending delayed task. Arming again aborts the previous one,
/// and so does dropping the debouncer.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    /// Runs `task` once `window` has passed without another call to `arm` or `cancel`.
    /// Must be called from within a tokio runtime.
    pub fn arm<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            task.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
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
    use tokio::time::sleep;

    fn counting(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_pending_task() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut d = Debouncer::new(Duration::from_millis(300));
        d.arm(counting(&hits));
        sleep(Duration::from_millis(200)).await;
        d.arm(counting(&hits));
        sleep(Duration::from_millis(200)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(d.is_pending());
        sleep(Duration::from_millis(150)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!d.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut d = Debouncer::new(Duration::from_millis(300));
        d.arm(counting(&hits));
        d.cancel();
        sleep(Duration::from_secs(1)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_task() {
        let hits = Arc::new(AtomicUsize::new(0));
        {
            let mut d = Debouncer::new(Duration::from_millis(300));
            d.arm(counting(&hits));
        }
        sleep(Duration::from_secs(1)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
