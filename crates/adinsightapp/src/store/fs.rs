use super::{DataStore, Slot};
use crate::error::{AdinsightError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One JSON file per slot under a data directory.
///
/// The directory is created on first write. Writes go to a temp file that is then
/// renamed over the target, so a crash mid-write never leaves a truncated slot.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot_path(&self, slot: Slot) -> PathBuf {
        self.root.join(slot.file_name())
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(AdinsightError::Io)?;
        }
        Ok(())
    }
}

impl DataStore for FsStore {
    fn load_slot(&self, slot: Slot) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(AdinsightError::Io)?;
        Ok(Some(content))
    }

    fn save_slot(&self, slot: Slot, content: &str) -> Result<()> {
        self.ensure_dir()?;

        let target = self.slot_path(slot);
        let tmp_file = self
            .root
            .join(format!(".{}-{}.tmp", slot.key(), Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(AdinsightError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &target) {
            let _ = fs::remove_file(&tmp_file);
            return Err(AdinsightError::Io(e));
        }
        Ok(())
    }
}
