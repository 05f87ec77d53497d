use thiserror::Error;

/// Unified error type for the entire dashboard-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Loading ─────────────────────────────────────────────────────
    #[error("Archive not found: {0}")]
    ArchiveNotFound(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("No tabular (.csv) file found in {0}")]
    NoTabularFile(String),

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    // ── Chart building ──────────────────────────────────────────────
    #[error("Unknown series: {0}")]
    UnknownSeries(String),

    // ── Output ──────────────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    /// Whether this error belongs to the load-time taxonomy.
    /// Load errors are fatal: the server must not start serving.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            CoreError::ArchiveNotFound(_)
                | CoreError::FileIO(_)
                | CoreError::Archive(_)
                | CoreError::NoTabularFile(_)
                | CoreError::InvalidFileFormat(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<zip::result::ZipError> for CoreError {
    fn from(e: zip::result::ZipError) -> Self {
        CoreError::Archive(e.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        CoreError::InvalidFileFormat(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}
