//! Run-once-then-repeat scheduling.
//!
//! The first tick fires immediately. Every tick spawns its task, so a
//! slow task never holds back the next tick and overlapping runs are
//! allowed.

use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Fixed-interval scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduler {
    interval: Duration,
}

impl Scheduler {
    pub fn every(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fire `task` now and then every interval until `shutdown` resolves.
    /// Returns how many ticks fired.
    pub async fn run<S, F, Fut>(&self, shutdown: S, mut task: F) -> u64
    where
        S: Future<Output = ()>,
        F: FnMut() -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut fired = 0;
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    fired += 1;
                    debug!(tick = fired, "Scheduler tick");
                    tokio::spawn(task());
                }
            }
        }
        fired
    }

    /// Run on a background task that stops when the handle is cancelled.
    pub fn spawn<F, Fut>(self, task: F) -> SchedulerHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (cancel, cancelled) = oneshot::channel::<()>();
        let join = tokio::spawn(async move {
            self.run(
                async {
                    let _ = cancelled.await;
                },
                task,
            )
            .await
        });
        SchedulerHandle { cancel, join }
    }
}

/// Handle to a spawned [`Scheduler`].
pub struct SchedulerHandle {
    cancel: oneshot::Sender<()>,
    join: JoinHandle<u64>,
}

impl SchedulerHandle {
    /// Stop scheduling new ticks and return how many fired. Runs already
    /// spawned are left to finish on their own.
    pub async fn cancel(self) -> u64 {
        let _ = self.cancel.send(());
        self.join.await.unwrap_or(0)
    }
}
