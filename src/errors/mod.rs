use thiserror::Error;

/// Error taxonomy for the dashboard service.
///
/// The lifecycle model itself never produces one of these; it is a total
/// function over timestamps. Errors originate at the collaborator
/// boundaries: record store, file store, upload validation.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("No scan found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
