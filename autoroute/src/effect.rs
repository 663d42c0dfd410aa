use crate::DispatchError;
use std::future::Future;
use std::sync::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Registry for deferred network effects. The hosting render loop owns the
/// runtime; dispatchers register effects here instead of firing and
/// forgetting, so teardown can cancel whatever is still in flight.
pub struct EffectScheduler {
    handle: Handle,
    tasks: Mutex<Vec<JoinHandle<Result<(), DispatchError>>>>,
}

impl EffectScheduler {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Scheduler on the ambient runtime. Panics outside a runtime context,
    /// like `Handle::current`.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    pub fn spawn<F>(&self, effect: F)
    where
        F: Future<Output = Result<(), DispatchError>> + Send + 'static,
    {
        let task = self.handle.spawn(effect);
        self.tasks.lock().unwrap().push(task);
    }

    pub fn pending(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    /// Aborts every registered effect. A cancelled effect never reports a
    /// result, so it cannot act on a torn-down tree.
    pub fn cancel_all(&self) {
        let mut tasks = self.tasks.lock().unwrap();
        for task in tasks.drain(..) {
            task.abort();
        }
    }

    /// Awaits every registered effect and returns how many failed.
    /// Failures were already reported at the effect boundary; cancelled
    /// effects are not counted.
    pub async fn drain(&self) -> usize {
        let tasks: Vec<_> = {
            let mut guard = self.tasks.lock().unwrap();
            guard.drain(..).collect()
        };

        let mut failures = 0;
        for task in tasks {
            match task.await {
                Ok(Ok(())) => {}
                Ok(Err(_)) => failures += 1,
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    log::error!("deferred effect panicked: {}", e);
                    failures += 1;
                }
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn drain_counts_failures() {
        let scheduler = EffectScheduler::current();
        scheduler.spawn(async { Ok(()) });
        scheduler.spawn(async { Err(DispatchError::Request("boom".to_string())) });

        assert_eq!(scheduler.pending(), 2);
        assert_eq!(scheduler.drain().await, 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test]
    async fn cancelled_effects_never_run_to_completion() {
        let scheduler = EffectScheduler::current();
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();

        scheduler.spawn(async move {
            tokio::time::sleep(Duration::from_secs(30)).await;
            fired_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        scheduler.cancel_all();
        assert_eq!(scheduler.drain().await, 0);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
