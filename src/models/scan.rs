use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lifecycle::{classify, derive_metrics, ScanStatus, SeriesPoint};

/// A persisted scan row. Created once at upload and never mutated by this
/// service; `result` stays empty until an external engine writes one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub uploaded_at: DateTime<Utc>,
    pub result: Option<serde_json::Value>,
}

/// Ephemeral presentation state for one scan, rebuilt from the record and
/// the current instant on every tick. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedScanView {
    pub scan_id: String,
    pub status: ScanStatus,
    pub is_scanning: bool,
    pub progress_percent: f64,
    pub elapsed_seconds: i64,
    pub issues_found: u32,
    pub coverage_percent: u32,
    pub instruction_series: Vec<SeriesPoint>,
    pub branch_series: Vec<SeriesPoint>,
}

impl DerivedScanView {
    pub fn derive(record: &ScanRecord, now: DateTime<Utc>) -> Self {
        let progress = classify(record.uploaded_at, now);
        let metrics = derive_metrics(progress.percent);
        Self {
            scan_id: record.id.clone(),
            status: progress.status(),
            is_scanning: progress.is_scanning(),
            progress_percent: progress.percent,
            elapsed_seconds: progress.elapsed_seconds,
            issues_found: metrics.issues_found,
            coverage_percent: metrics.coverage_percent,
            instruction_series: metrics.instruction_series,
            branch_series: metrics.branch_series,
        }
    }
}
