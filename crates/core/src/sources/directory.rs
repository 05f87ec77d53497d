use std::path::{Path, PathBuf};

use crate::errors::CoreError;

use super::traits::TableSource;

/// Tabular files lying in a plain directory (an already-extracted archive).
/// Only the top level is listed; entries are sorted by file name.
pub struct DirectorySource {
    name: String,
    root: PathBuf,
}

impl DirectorySource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let root = path.as_ref().to_path_buf();
        let name = root.display().to_string();
        if !root.is_dir() {
            return Err(CoreError::ArchiveNotFound(name));
        }
        Ok(Self { name, root })
    }
}

impl TableSource for DirectorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&mut self) -> Result<Vec<String>, CoreError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn read_entry(&mut self, entry: &str) -> Result<Vec<u8>, CoreError> {
        Ok(std::fs::read(self.root.join(entry))?)
    }
}
