//! Repeats ticks on a fixed interval until shutdown is requested.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use classbell_service::TickRunner;

/// ## Summary
/// Runs a tick every `period` until `shutdown` resolves, returning the number
/// of ticks that ran to completion.
///
/// Shutdown is observed between ticks and while a tick is in flight; an
/// interrupted tick is dropped. A failed tick is logged and the loop goes on.
pub async fn run_watch<F>(runner: &TickRunner, period: Duration, shutdown: F) -> usize
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut completed = 0;

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            () = &mut shutdown => {
                tracing::info!(completed, "Shutdown requested, stopping");
                return completed;
            }
        }

        tokio::select! {
            outcome = runner.run_tick(Utc::now()) => {
                completed += 1;
                if let Err(e) = outcome {
                    tracing::error!(error = %e, "Tick failed");
                }
            }
            () = &mut shutdown => {
                tracing::info!(completed, "Shutdown requested during a tick, abandoning it");
                return completed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono_tz::Tz;
    use classbell_schedule::ScheduleDocument;
    use classbell_service::transport::MemoryTransport;
    use classbell_service::{DispatchConfig, ReminderDispatcher};
    use classbell_store::{MemoryStore, ScheduleStore, StoreResult};
    use futures::future::BoxFuture;

    use super::*;

    /// Store whose reads never finish.
    struct StalledStore;

    impl ScheduleStore for StalledStore {
        fn fetch_documents(&self) -> BoxFuture<'_, StoreResult<Vec<ScheduleDocument>>> {
            Box::pin(std::future::pending())
        }
    }

    fn runner(store: Arc<dyn ScheduleStore>) -> TickRunner {
        let dispatcher =
            ReminderDispatcher::new(Arc::new(MemoryTransport::new()), DispatchConfig::default());
        TickRunner::new(store, dispatcher, Tz::America__Mexico_City)
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn test_shutdown_interrupts_stalled_tick() {
        let runner = runner(Arc::new(StalledStore));

        let completed = run_watch(
            &runner,
            Duration::from_secs(60),
            tokio::time::sleep(Duration::from_secs(5)),
        )
        .await;

        assert_eq!(completed, 0);
    }

    #[test_log::test(tokio::test(start_paused = true))]
    async fn test_ticks_repeat_until_shutdown() {
        let runner = runner(Arc::new(MemoryStore::default()));

        // Ticks at 0s, 60s and 120s; shutdown lands at 150s.
        let completed = run_watch(
            &runner,
            Duration::from_secs(60),
            tokio::time::sleep(Duration::from_secs(150)),
        )
        .await;

        assert_eq!(completed, 3);
    }
}
