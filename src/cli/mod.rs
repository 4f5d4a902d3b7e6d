pub mod commands;
pub mod delete;
pub mod list;
pub mod serve;
pub mod show;
pub mod upload;
pub mod watch;

pub use commands::{Cli, Commands};

use std::path::Path;

use crate::db::Database;
use crate::errors::DeckError;
use crate::storage::FileStore;

/// Open the record and file stores rooted at a data directory. Shared by
/// every command that works against local state instead of the API.
pub(crate) fn open_stores(data_dir: &Path) -> Result<(Database, FileStore), DeckError> {
    let db_path = data_dir.join("auditdeck.db");
    let db = Database::new(
        db_path
            .to_str()
            .ok_or_else(|| DeckError::Config("Non-UTF-8 data dir".to_string()))?,
    )?;
    let files = FileStore::new(data_dir.join("files"))?;
    Ok((db, files))
}
