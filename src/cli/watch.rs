use std::sync::Arc;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::commands::WatchArgs;
use crate::cli::open_stores;
use crate::errors::DeckError;
use crate::lifecycle::{SystemClock, WatchSession};
use crate::models::DerivedScanView;

/// Follow one scan's tick stream in the terminal until its window elapses.
/// The session is torn down on every exit path; a Ctrl-C just drops it,
/// which cancels the tick loop.
pub async fn handle_watch(args: WatchArgs) -> Result<(), DeckError> {
    let (db, _files) = open_stores(&args.data_dir)?;
    let record = db
        .get_scan(&args.id, &args.owner)?
        .ok_or_else(|| DeckError::NotFound(args.id.clone()))?;
    let name = record.name.clone();

    let mut session = WatchSession::spawn(
        record,
        Arc::new(SystemClock),
        Duration::from_secs(args.tick_interval.clamp(1, 2)),
    );
    let mut rx = session.subscribe();

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("  {bar:30.cyan/dark_gray} {pos:>3}% | {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );

    let mut view = session.latest();
    render(&bar, &name, &view);

    while view.is_scanning && rx.changed().await.is_ok() {
        view = rx.borrow().clone();
        render(&bar, &name, &view);
    }

    bar.finish_with_message(format!(
        "{}: {} issues | {}% coverage",
        style("Completed").green(),
        view.issues_found,
        view.coverage_percent,
    ));
    session.join().await;
    Ok(())
}

fn render(bar: &ProgressBar, name: &str, view: &DerivedScanView) {
    bar.set_position(view.progress_percent.round() as u64);
    if view.is_scanning {
        bar.set_message(format!("Scanning {}", name));
    }
}
