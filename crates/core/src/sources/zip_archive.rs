use std::fs::File;
use std::io::Read;
use std::path::Path;

use zip::ZipArchive;

use crate::errors::CoreError;

use super::traits::TableSource;

/// Tabular files packed in a `.zip` archive.
pub struct ZipArchiveSource {
    name: String,
    archive: ZipArchive<File>,
}

impl ZipArchiveSource {
    /// Open an archive on disk. A missing file is `ArchiveNotFound`,
    /// a file that is not a zip archive is `Archive`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        if !path.is_file() {
            return Err(CoreError::ArchiveNotFound(name));
        }
        let archive = ZipArchive::new(File::open(path)?)?;
        Ok(Self { name, archive })
    }
}

impl TableSource for ZipArchiveSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&mut self) -> Result<Vec<String>, CoreError> {
        let mut names = Vec::with_capacity(self.archive.len());
        for i in 0..self.archive.len() {
            let file = self.archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            names.push(file.name().to_string());
        }
        Ok(names)
    }

    fn read_entry(&mut self, entry: &str) -> Result<Vec<u8>, CoreError> {
        let mut file = self.archive.by_name(entry)?;
        // The declared size is untrusted; let the buffer grow with the data.
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        Ok(buf)
    }
}
