use crate::errors::CoreError;

/// Trait abstraction over where tabular files come from.
///
/// The table store only needs entry names and their bytes. Zip archives
/// and plain directories both implement this; tests use in-memory sources.
pub trait TableSource {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Names of all file entries, in source order.
    fn entries(&mut self) -> Result<Vec<String>, CoreError>;

    /// Raw bytes of one entry.
    fn read_entry(&mut self, entry: &str) -> Result<Vec<u8>, CoreError>;

    /// Entries that hold tabular data (`.csv`, any case), in source order.
    fn tabular_entries(&mut self) -> Result<Vec<String>, CoreError> {
        let (tabular, skipped): (Vec<String>, Vec<String>) =
            self.entries()?.into_iter().partition(|e| is_tabular(e));
        for entry in &skipped {
            tracing::debug!(source = self.name(), entry = %entry, "Skipping non-tabular entry");
        }
        Ok(tabular)
    }
}

/// Whether an entry name denotes a CSV file.
pub fn is_tabular(entry: &str) -> bool {
    entry.to_ascii_lowercase().ends_with(".csv")
}
