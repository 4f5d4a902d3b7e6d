use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::api::models::OwnerQuery;
use crate::api::AppState;
use crate::errors::DeckError;
use crate::lifecycle::{Clock, WatchSession};
use crate::models::DerivedScanView;

/// One-shot derived view: classify + metrics at the current instant.
pub async fn get_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<DerivedScanView>, DeckError> {
    let record = state
        .db
        .get_scan(&id, &query.owner_id)?
        .ok_or_else(|| DeckError::NotFound(id))?;

    Ok(Json(DerivedScanView::derive(&record, state.clock.now())))
}

pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Value>, DeckError> {
    // A row without a stored file reads the same as no row at all.
    if state.db.get_scan(&id, &query.owner_id)?.is_none() {
        return Err(DeckError::NotFound(id));
    }
    let source = state
        .files
        .get_file(&query.owner_id, &id)?
        .ok_or_else(|| DeckError::NotFound(id.clone()))?;

    Ok(Json(json!({ "id": id, "source": source })))
}

/// Open a server-side tick session for a scan. Idempotent: re-opening an
/// already-watched scan reuses the existing session.
pub async fn open_watch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<DerivedScanView>, DeckError> {
    let record = state
        .db
        .get_scan(&id, &query.owner_id)?
        .ok_or_else(|| DeckError::NotFound(id.clone()))?;

    let session = state
        .watchers
        .entry(id.clone())
        .or_insert_with(|| {
            debug!(scan_id = %id, "Opening watch session");
            Arc::new(WatchSession::spawn(
                record,
                state.clock.clone(),
                state.tick_interval,
            ))
        })
        .clone();

    Ok(Json(session.latest()))
}

/// Latest view published by an open watch session.
pub async fn poll_watch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DerivedScanView>, DeckError> {
    let session = state
        .watchers
        .get(&id)
        .ok_or_else(|| DeckError::NotFound(format!("No active watch for scan {}", id)))?;

    Ok(Json(session.latest()))
}

/// Stop and discard a watch session. The tick loop is cancelled exactly
/// once; polling afterwards reports not-found.
pub async fn stop_watch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, DeckError> {
    let (_, session) = state
        .watchers
        .remove(&id)
        .ok_or_else(|| DeckError::NotFound(format!("No active watch for scan {}", id)))?;
    session.stop();

    Ok(Json(json!({"stopped": true})))
}
