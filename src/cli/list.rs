use console::style;

use crate::cli::commands::ListArgs;
use crate::cli::open_stores;
use crate::errors::DeckError;
use crate::lifecycle::{Clock, SystemClock};
use crate::models::DerivedScanView;

pub async fn handle_list(args: ListArgs) -> Result<(), DeckError> {
    let (db, _files) = open_stores(&args.data_dir)?;
    let records = db.list_scans(&args.owner)?;

    if records.is_empty() {
        println!("No projects scanned yet.");
        return Ok(());
    }

    let now = SystemClock.now();
    for record in &records {
        let view = DerivedScanView::derive(record, now);
        let status = if view.is_scanning {
            style(format!("Scanning {:>3.0}%", view.progress_percent)).yellow()
        } else {
            style("Completed    ".to_string()).green()
        };
        let (issues, coverage) = if view.is_scanning {
            ("N/A".to_string(), "N/A".to_string())
        } else {
            (view.issues_found.to_string(), format!("{}%", view.coverage_percent))
        };
        println!(
            "{}  {}  {:<24}  issues: {:>4}  coverage: {:>4}  {}",
            record.id,
            status,
            record.name,
            issues,
            coverage,
            record.uploaded_at.format("%m/%d/%Y %H:%M:%S"),
        );
    }
    Ok(())
}
