//! Scan lifecycle model.
//!
//! Everything the UI shows about a running scan is derived from exactly two
//! instants: the upload timestamp and the current time. No completion signal
//! ever arrives from a backend; a scan is "scanning" for a fixed window after
//! upload and "completed" forever after. The functions here are pure and are
//! re-evaluated on every tick, so the derived state can be discarded and
//! rebuilt at any point without drift.

pub mod clock;
pub mod metrics;
pub mod model;
pub mod ticker;

pub use clock::{Clock, FixedClock, SystemClock};
pub use metrics::{derive_metrics, ScanMetrics, SeriesPoint, FINAL_ISSUE_COUNT};
pub use model::{classify, Progress, ScanStatus, SCAN_WINDOW_SECONDS};
pub use ticker::WatchSession;
