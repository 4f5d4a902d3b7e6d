use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::api::models::{CreateScanRequest, OwnerQuery, ScanResponse};
use crate::api::AppState;
use crate::errors::DeckError;
use crate::lifecycle::{Clock, ScanStatus};
use crate::models::{DerivedScanView, ScanRecord};

fn scan_summary(record: &ScanRecord, view: &DerivedScanView) -> Value {
    // List cards show metrics only once the scan has left its window,
    // mirroring the N/A placeholders of the dashboard.
    let (issues, coverage) = if view.is_scanning {
        (Value::Null, Value::Null)
    } else {
        (view.issues_found.into(), view.coverage_percent.into())
    };
    json!({
        "id": record.id,
        "name": record.name,
        "uploaded_at": record.uploaded_at.to_rfc3339(),
        "status": view.status,
        "progress_percent": view.progress_percent,
        "issues_found": issues,
        "code_coverage": coverage,
    })
}

pub async fn create_scan(
    State(state): State<AppState>,
    Json(req): Json<CreateScanRequest>,
) -> Result<(StatusCode, Json<ScanResponse>), DeckError> {
    if req.owner_id.trim().is_empty() {
        return Err(DeckError::Validation("owner_id is required".to_string()));
    }
    if req.name.trim().is_empty() {
        return Err(DeckError::Validation("Project name is required".to_string()));
    }
    if req.source.is_empty() {
        return Err(DeckError::Validation("Contract source is required".to_string()));
    }

    let scan_id = uuid::Uuid::new_v4().to_string();
    let uploaded_at = state.clock.now();

    state.files.put_file(&req.owner_id, &scan_id, &req.source)?;
    state
        .db
        .create_scan(&scan_id, &req.name, &req.owner_id, uploaded_at)?;

    info!(scan_id = %scan_id, name = %req.name, "Scan uploaded");

    Ok((
        StatusCode::CREATED,
        Json(ScanResponse {
            id: scan_id,
            name: req.name,
            status: ScanStatus::Scanning,
            uploaded_at: uploaded_at.to_rfc3339(),
        }),
    ))
}

pub async fn list_scans(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Value>, DeckError> {
    let records = state.db.list_scans(&query.owner_id)?;
    let now = state.clock.now();

    let scans: Vec<Value> = records
        .iter()
        .map(|record| scan_summary(record, &DerivedScanView::derive(record, now)))
        .collect();

    Ok(Json(json!({ "scans": scans, "total": scans.len() })))
}

pub async fn get_scan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Value>, DeckError> {
    let record = state
        .db
        .get_scan(&id, &query.owner_id)?
        .ok_or_else(|| DeckError::NotFound(id.clone()))?;

    let view = DerivedScanView::derive(&record, state.clock.now());
    let mut body = scan_summary(&record, &view);
    body["result"] = record.result.clone().unwrap_or(Value::Null);
    Ok(Json(body))
}

pub async fn delete_scan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Value>, DeckError> {
    let deleted = state.db.delete_scan(&id, &query.owner_id)?;
    if !deleted {
        return Err(DeckError::NotFound(id));
    }

    // Tear down any live session and the stored source along with the row.
    if let Some((_, session)) = state.watchers.remove(&id) {
        session.stop();
    }
    state.files.delete_file(&query.owner_id, &id)?;

    info!(scan_id = %id, "Scan deleted");
    Ok(Json(json!({"deleted": true})))
}
