pub mod scan;

pub use scan::{DerivedScanView, ScanRecord};
