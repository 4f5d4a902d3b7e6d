use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::errors::DeckError;

impl IntoResponse for DeckError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            DeckError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            DeckError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            DeckError::Transport(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            DeckError::Config(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        (status, Json(json!({"error": message}))).into_response()
    }
}
