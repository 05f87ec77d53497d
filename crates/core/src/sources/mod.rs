pub mod traits;

// Source implementations
pub mod directory;
pub mod zip_archive;
