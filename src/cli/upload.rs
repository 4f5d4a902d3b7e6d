use console::style;
use tracing::info;

use crate::cli::commands::UploadArgs;
use crate::cli::open_stores;
use crate::errors::DeckError;
use crate::lifecycle::{Clock, SystemClock};

pub async fn handle_upload(args: UploadArgs) -> Result<(), DeckError> {
    let name = match args.name {
        Some(name) => name,
        None => args
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    if name.trim().is_empty() {
        return Err(DeckError::Validation("Project name is required".to_string()));
    }

    let source = std::fs::read_to_string(&args.file)
        .map_err(|e| DeckError::Validation(format!("Cannot read {}: {}", args.file.display(), e)))?;
    if source.is_empty() {
        return Err(DeckError::Validation("Contract source is empty".to_string()));
    }

    let (db, files) = open_stores(&args.data_dir)?;
    let scan_id = uuid::Uuid::new_v4().to_string();
    let uploaded_at = SystemClock.now();

    files.put_file(&args.owner, &scan_id, &source)?;
    db.create_scan(&scan_id, &name, &args.owner, uploaded_at)?;

    info!(scan_id = %scan_id, "Scan uploaded");
    println!(
        "{} {} ({})",
        style("Uploaded").green().bold(),
        name,
        scan_id
    );
    Ok(())
}
