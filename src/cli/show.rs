use console::style;

use crate::cli::commands::ShowArgs;
use crate::cli::open_stores;
use crate::errors::DeckError;
use crate::lifecycle::{Clock, SystemClock};
use crate::models::DerivedScanView;

pub async fn handle_show(args: ShowArgs) -> Result<(), DeckError> {
    let (db, files) = open_stores(&args.data_dir)?;
    let record = db
        .get_scan(&args.id, &args.owner)?
        .ok_or_else(|| DeckError::NotFound(args.id.clone()))?;

    let view = DerivedScanView::derive(&record, SystemClock.now());

    println!("{}", style(&record.name).bold());
    println!("  id:          {}", record.id);
    println!("  uploaded:    {}", record.uploaded_at.to_rfc3339());
    println!(
        "  status:      {}",
        if view.is_scanning {
            style(format!("Scanning ({:.0}%)", view.progress_percent)).yellow()
        } else {
            style("Completed".to_string()).green()
        }
    );
    println!("  issues:      {}", view.issues_found);
    println!("  coverage:    {}%", view.coverage_percent);

    println!("  instruction: {}", format_series(&view.instruction_series));
    println!("  branch:      {}", format_series(&view.branch_series));

    if args.source {
        match files.get_file(&args.owner, &args.id)? {
            Some(source) => {
                println!();
                println!("{}", source);
            }
            None => println!("  (no stored source)"),
        }
    }
    Ok(())
}

fn format_series(series: &[crate::lifecycle::SeriesPoint]) -> String {
    series
        .iter()
        .map(|p| format!("{:.1}", p.coverage))
        .collect::<Vec<_>>()
        .join(" -> ")
}
