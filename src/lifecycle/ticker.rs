use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::lifecycle::Clock;
use crate::models::{DerivedScanView, ScanRecord};

/// A live view of one scan: a periodic tick loop that re-derives the
/// presentation state and publishes it over a watch channel.
///
/// The loop owns no shared state. It stops itself the moment the derived
/// view reaches the terminal state, and the session's cancellation token is
/// triggered on drop, so tearing down the owning view can never leak a
/// recurring tick. Sessions for different scans are fully independent.
pub struct WatchSession {
    rx: watch::Receiver<DerivedScanView>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl WatchSession {
    /// Start ticking `record` against `clock` every `tick_interval`.
    ///
    /// The channel is seeded with the view at spawn time; if the scan is
    /// already past its window no tick loop runs at all.
    pub fn spawn(record: ScanRecord, clock: Arc<dyn Clock>, tick_interval: Duration) -> Self {
        let initial = DerivedScanView::derive(&record, clock.now());
        let (tx, rx) = watch::channel(initial.clone());
        let cancel = CancellationToken::new();

        let loop_cancel = cancel.clone();
        let task = tokio::spawn(async move {
            if !initial.is_scanning {
                return;
            }
            let mut ticker = tokio::time::interval(tick_interval);
            // The first interval tick fires immediately; skip it so each
            // published view is at least one interval newer than the seed.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = loop_cancel.cancelled() => {
                        debug!(scan_id = %record.id, "watch session cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        let view = DerivedScanView::derive(&record, clock.now());
                        let done = !view.is_scanning;
                        if tx.send(view).is_err() {
                            break;
                        }
                        if done {
                            debug!(scan_id = %record.id, "scan window elapsed, stopping ticks");
                            break;
                        }
                    }
                }
            }
        });

        Self {
            rx,
            cancel,
            task: Some(task),
        }
    }

    /// The most recently published view.
    pub fn latest(&self) -> DerivedScanView {
        self.rx.borrow().clone()
    }

    /// A receiver for awaiting subsequent ticks.
    pub fn subscribe(&self) -> watch::Receiver<DerivedScanView> {
        self.rx.clone()
    }

    /// Stop the tick loop. Idempotent; also runs on drop.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map(|t| t.is_finished()).unwrap_or(true)
    }

    /// Wait for the tick loop to exit.
    pub async fn join(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for WatchSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    use crate::lifecycle::FixedClock;

    fn record_at(uploaded_at: chrono::DateTime<Utc>) -> ScanRecord {
        ScanRecord {
            id: "scan-w".into(),
            name: "token.sol".into(),
            owner_id: "owner-1".into(),
            uploaded_at,
            result: None,
        }
    }

    fn t0() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 18, 8, 30, 47).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_publishes_progress_then_stops_at_terminal() {
        let clock = FixedClock::new(t0() + chrono::Duration::seconds(150));
        let mut session = WatchSession::spawn(
            record_at(t0()),
            Arc::new(clock.clone()),
            Duration::from_secs(1),
        );
        let mut rx = session.subscribe();

        rx.changed().await.unwrap();
        let view = rx.borrow().clone();
        assert!(view.is_scanning);
        assert!((view.progress_percent - 50.0).abs() < 1.0);

        clock.set(t0() + chrono::Duration::seconds(301));
        rx.changed().await.unwrap();
        let view = rx.borrow().clone();
        assert!(!view.is_scanning);
        assert_eq!(view.progress_percent, 100.0);

        // The loop stops itself once terminal; no further ticks fire.
        session.join().await;
        assert!(session.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_completed_scan_spawns_no_tick_loop() {
        let clock = FixedClock::new(t0() + chrono::Duration::seconds(10_000));
        let mut session = WatchSession::spawn(
            record_at(t0()),
            Arc::new(clock),
            Duration::from_secs(1),
        );
        let view = session.latest();
        assert!(!view.is_scanning);
        assert_eq!(view.progress_percent, 100.0);
        session.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_ticks_before_completion() {
        let clock = FixedClock::new(t0() + chrono::Duration::seconds(30));
        let mut session = WatchSession::spawn(
            record_at(t0()),
            Arc::new(clock.clone()),
            Duration::from_secs(1),
        );
        let mut rx = session.subscribe();
        rx.changed().await.unwrap();

        session.stop();
        session.join().await;
        let frozen = session.latest();
        assert!(frozen.is_scanning);

        // Time marches on but nothing mutates the published view.
        clock.set(t0() + chrono::Duration::seconds(299));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(session.latest(), frozen);

        // Stopping again is a no-op.
        session.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_tick_loop() {
        let clock = FixedClock::new(t0());
        let session = WatchSession::spawn(
            record_at(t0()),
            Arc::new(clock),
            Duration::from_secs(1),
        );
        let cancel = session.cancel.clone();
        drop(session);
        cancel.cancelled().await;
    }
}
