use tracing::info;

use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::load_config;
use crate::errors::DeckError;

pub async fn handle_serve(args: ServeArgs) -> Result<(), DeckError> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    info!(host = %config.host, port = config.port, "Starting API server");

    let state = api::create_app_state(&config)?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| DeckError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
