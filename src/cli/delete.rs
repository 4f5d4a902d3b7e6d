use console::style;
use tracing::info;

use crate::cli::commands::DeleteArgs;
use crate::cli::open_stores;
use crate::errors::DeckError;

pub async fn handle_delete(args: DeleteArgs) -> Result<(), DeckError> {
    let (db, files) = open_stores(&args.data_dir)?;

    if !db.delete_scan(&args.id, &args.owner)? {
        return Err(DeckError::NotFound(args.id));
    }
    files.delete_file(&args.owner, &args.id)?;

    info!(scan_id = %args.id, "Scan deleted");
    println!("{} {}", style("Deleted").red().bold(), args.id);
    Ok(())
}
