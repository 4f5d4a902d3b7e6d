use serde::{Deserialize, Serialize};

use crate::lifecycle::ScanStatus;

#[derive(Deserialize)]
pub struct CreateScanRequest {
    pub owner_id: String,
    /// User-supplied project label.
    pub name: String,
    /// Raw contract source text.
    pub source: String,
}

#[derive(Deserialize)]
pub struct OwnerQuery {
    pub owner_id: String,
}

#[derive(Serialize)]
pub struct ScanResponse {
    pub id: String,
    pub name: String,
    pub status: ScanStatus,
    pub uploaded_at: String,
}
