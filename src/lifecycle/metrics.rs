use serde::{Deserialize, Serialize};

/// Issue count reported once a scan reaches the end of its window.
pub const FINAL_ISSUE_COUNT: u32 = 125;

/// One point of a coverage chart. `time` is the checkpoint index on the
/// x-axis; `coverage` is a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: u32,
    pub coverage: f64,
}

/// Display metrics derived from a progress percentage. Never persisted;
/// recomputed from scratch on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanMetrics {
    pub issues_found: u32,
    pub coverage_percent: u32,
    pub instruction_series: Vec<SeriesPoint>,
    pub branch_series: Vec<SeriesPoint>,
}

/// A checkpoint pins a chart point's ceiling at a fixed fraction of the
/// window. Each point ramps linearly from zero and saturates at its cap
/// once progress passes `fraction`, so later checkpoints are still climbing
/// while earlier ones have settled. The curve family is piecewise concave,
/// not a single ramp.
struct Checkpoint {
    fraction: f64,
    instruction_cap: f64,
    branch_cap: f64,
}

const CHECKPOINTS: [Checkpoint; 6] = [
    Checkpoint { fraction: 0.0, instruction_cap: 0.0, branch_cap: 0.0 },
    Checkpoint { fraction: 0.2, instruction_cap: 24.0, branch_cap: 18.0 },
    Checkpoint { fraction: 0.4, instruction_cap: 38.5, branch_cap: 30.0 },
    Checkpoint { fraction: 0.6, instruction_cap: 47.0, branch_cap: 38.5 },
    Checkpoint { fraction: 0.8, instruction_cap: 52.5, branch_cap: 44.0 },
    Checkpoint { fraction: 1.0, instruction_cap: 55.9, branch_cap: 48.6 },
];

fn point_value(percent: f64, fraction: f64, cap: f64) -> f64 {
    if fraction <= 0.0 || cap <= 0.0 {
        return 0.0;
    }
    // Linear ramp that reaches `cap` exactly when progress reaches the
    // checkpoint's fraction of the window.
    let slope = cap / (fraction * 100.0);
    (percent * slope).min(cap)
}

/// Derive display metrics from a progress percentage in [0, 100].
///
/// Every scalar and every series point is non-decreasing in `percent`. At
/// 100 the series sit at their final checkpoint caps and the headline
/// coverage is the larger of the two final points, rounded to the nearest
/// integer.
pub fn derive_metrics(percent: f64) -> ScanMetrics {
    let percent = percent.clamp(0.0, 100.0);

    let instruction_series: Vec<SeriesPoint> = CHECKPOINTS
        .iter()
        .enumerate()
        .map(|(i, cp)| SeriesPoint {
            time: i as u32,
            coverage: point_value(percent, cp.fraction, cp.instruction_cap),
        })
        .collect();

    let branch_series: Vec<SeriesPoint> = CHECKPOINTS
        .iter()
        .enumerate()
        .map(|(i, cp)| SeriesPoint {
            time: i as u32,
            coverage: point_value(percent, cp.fraction, cp.branch_cap),
        })
        .collect();

    let last_instruction = instruction_series.last().map(|p| p.coverage).unwrap_or(0.0);
    let last_branch = branch_series.last().map(|p| p.coverage).unwrap_or(0.0);
    let coverage_percent = last_instruction.max(last_branch).round() as u32;

    let issues_found = ((percent / 100.0) * FINAL_ISSUE_COUNT as f64).floor() as u32;

    ScanMetrics {
        issues_found,
        coverage_percent,
        instruction_series,
        branch_series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_progress_is_all_zero() {
        let m = derive_metrics(0.0);
        assert_eq!(m.issues_found, 0);
        assert_eq!(m.coverage_percent, 0);
        assert!(m.instruction_series.iter().all(|p| p.coverage == 0.0));
        assert!(m.branch_series.iter().all(|p| p.coverage == 0.0));
    }

    #[test]
    fn test_full_progress_reaches_final_checkpoints() {
        let m = derive_metrics(100.0);
        assert_eq!(m.issues_found, FINAL_ISSUE_COUNT);
        assert_eq!(m.instruction_series.last().unwrap().coverage, 55.9);
        assert_eq!(m.branch_series.last().unwrap().coverage, 48.6);
        // Headline coverage is the larger final point, rounded.
        assert_eq!(m.coverage_percent, 56);

        // Every series point sits exactly at its cap.
        for (i, p) in m.instruction_series.iter().enumerate() {
            assert_eq!(p.time, i as u32);
        }
        assert_eq!(m.instruction_series[1].coverage, 24.0);
        assert_eq!(m.branch_series[3].coverage, 38.5);
    }

    #[test]
    fn test_repeated_calls_are_pure() {
        let a = derive_metrics(100.0);
        let b = derive_metrics(100.0);
        assert_eq!(a, b);
        let c = derive_metrics(37.5);
        let d = derive_metrics(37.5);
        assert_eq!(c, d);
    }

    #[test]
    fn test_monotonic_in_progress() {
        let mut prev = derive_metrics(0.0);
        for step in 1..=200 {
            let percent = step as f64 * 0.5;
            let next = derive_metrics(percent);
            assert!(next.issues_found >= prev.issues_found);
            assert!(next.coverage_percent >= prev.coverage_percent);
            for (a, b) in prev.instruction_series.iter().zip(&next.instruction_series) {
                assert!(b.coverage >= a.coverage, "instruction dip at {}%", percent);
            }
            for (a, b) in prev.branch_series.iter().zip(&next.branch_series) {
                assert!(b.coverage >= a.coverage, "branch dip at {}%", percent);
            }
            prev = next;
        }
    }

    #[test]
    fn test_early_checkpoints_saturate_first() {
        // At 50% the 20%-checkpoint has hit its cap while the final
        // checkpoint is still climbing.
        let m = derive_metrics(50.0);
        assert_eq!(m.instruction_series[1].coverage, 24.0);
        assert!(m.instruction_series[5].coverage < 55.9);
        assert!(m.instruction_series[5].coverage > 0.0);
    }

    #[test]
    fn test_out_of_range_input_clamps() {
        assert_eq!(derive_metrics(-5.0), derive_metrics(0.0));
        assert_eq!(derive_metrics(250.0), derive_metrics(100.0));
    }
}
