use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::errors::DeckError;

/// On-disk store for uploaded contract sources, keyed `{owner_id}/{scan_id}`.
///
/// Stands in for the object-storage bucket the dashboard reads from. The
/// relational row and the stored file share the scan id; a row without a
/// file reads back as absent, which the API reports as "No scan found".
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, DeckError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn object_path(&self, owner_id: &str, scan_id: &str) -> Result<PathBuf, DeckError> {
        for key in [owner_id, scan_id] {
            if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
                return Err(DeckError::Validation(format!("Invalid object key: {:?}", key)));
            }
        }
        Ok(self.root.join(owner_id).join(scan_id))
    }

    pub fn put_file(&self, owner_id: &str, scan_id: &str, contents: &str) -> Result<(), DeckError> {
        let path = self.object_path(owner_id, scan_id)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn get_file(&self, owner_id: &str, scan_id: &str) -> Result<Option<String>, DeckError> {
        let path = self.object_path(owner_id, scan_id)?;
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn delete_file(&self, owner_id: &str, scan_id: &str) -> Result<bool, DeckError> {
        let path = self.object_path(owner_id, scan_id)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
