use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How long after upload a scan is presented as still running, in seconds.
///
/// This is the single window constant for every surface (list, detail,
/// watch). Both instants are compared in UTC; no timezone offset is applied
/// to the elapsed time.
pub const SCAN_WINDOW_SECONDS: i64 = 300;

/// Default re-evaluation cadence for live views.
pub const DEFAULT_TICK_INTERVAL_SECONDS: u64 = 1;

/// Display status of a scan. Transitions one way, Scanning -> Completed,
/// and is re-derived from timestamps on every evaluation rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Scanning,
    Completed,
}

/// Where a scan sits inside its progress window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Percent of the window elapsed, clamped to [0, 100].
    pub percent: f64,
    /// Whole seconds since upload, clamped to >= 0.
    pub elapsed_seconds: i64,
}

impl Progress {
    pub fn is_scanning(&self) -> bool {
        self.percent < 100.0
    }

    pub fn status(&self) -> ScanStatus {
        if self.is_scanning() {
            ScanStatus::Scanning
        } else {
            ScanStatus::Completed
        }
    }
}

/// Classify a scan from its upload instant and the current instant.
///
/// Total over all finite timestamp pairs: a `now` earlier than `uploaded_at`
/// (clock skew, record written by another host) clamps to zero elapsed
/// rather than producing negative progress. Once the window has elapsed the
/// result is pinned at 100 regardless of how much further `now` advances.
pub fn classify(uploaded_at: DateTime<Utc>, now: DateTime<Utc>) -> Progress {
    classify_with_window(uploaded_at, now, SCAN_WINDOW_SECONDS)
}

pub fn classify_with_window(
    uploaded_at: DateTime<Utc>,
    now: DateTime<Utc>,
    window_seconds: i64,
) -> Progress {
    let elapsed = (now - uploaded_at).num_seconds().max(0);
    let window = window_seconds.max(1);
    let percent = ((elapsed as f64 / window as f64) * 100.0).clamp(0.0, 100.0);
    Progress {
        percent,
        elapsed_seconds: elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 18, 8, 30, 47).unwrap()
    }

    #[test]
    fn test_zero_elapsed_is_scanning_at_zero_percent() {
        let p = classify(t0(), t0());
        assert_eq!(p.percent, 0.0);
        assert_eq!(p.elapsed_seconds, 0);
        assert!(p.is_scanning());
        assert_eq!(p.status(), ScanStatus::Scanning);
    }

    #[test]
    fn test_half_window_is_fifty_percent() {
        let p = classify(t0(), t0() + Duration::seconds(150));
        assert!((p.percent - 50.0).abs() < 1e-9);
        assert!(p.is_scanning());
    }

    #[test]
    fn test_terminal_state_is_idempotent() {
        let just_past = classify(t0(), t0() + Duration::seconds(301));
        assert_eq!(just_past.percent, 100.0);
        assert!(!just_past.is_scanning());
        assert_eq!(just_past.status(), ScanStatus::Completed);

        let long_past = classify(t0(), t0() + Duration::seconds(10_000));
        assert_eq!(long_past.percent, 100.0);
        assert_eq!(long_past.status(), ScanStatus::Completed);
    }

    #[test]
    fn test_exact_window_boundary_completes() {
        let p = classify(t0(), t0() + Duration::seconds(SCAN_WINDOW_SECONDS));
        assert_eq!(p.percent, 100.0);
        assert!(!p.is_scanning());
    }

    #[test]
    fn test_now_before_upload_clamps_to_zero() {
        let p = classify(t0(), t0() - Duration::seconds(3600));
        assert_eq!(p.percent, 0.0);
        assert_eq!(p.elapsed_seconds, 0);
        assert!(p.is_scanning());
    }

    #[test]
    fn test_progress_is_monotonic_in_now() {
        let mut last = -1.0;
        for s in (0..=600i64).step_by(7) {
            let p = classify(t0(), t0() + Duration::seconds(s));
            assert!(p.percent >= last, "regressed at {}s", s);
            assert!((0.0..=100.0).contains(&p.percent));
            assert_eq!(p.is_scanning(), p.percent < 100.0);
            last = p.percent;
        }
    }

    #[test]
    fn test_custom_window() {
        let p = classify_with_window(t0(), t0() + Duration::seconds(45), 90);
        assert!((p.percent - 50.0).abs() < 1e-9);
        let p = classify_with_window(t0(), t0() + Duration::seconds(90), 90);
        assert_eq!(p.percent, 100.0);
    }
}
