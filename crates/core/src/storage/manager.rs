use std::path::Path;

use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::catalog::SeriesCatalog;
use crate::models::selection::Interval;
use crate::models::table::CaseTable;
use crate::sources::directory::DirectorySource;
use crate::sources::traits::TableSource;
use crate::sources::zip_archive::ZipArchiveSource;

use super::format;

/// The Table Store: the case-count table plus the catalog of price tables.
///
/// Loaded once, read-only afterwards. Shared by reference (usually behind
/// an `Arc`) with the binder and the chart builders.
#[derive(Debug, Clone, Default)]
pub struct TableStore {
    cases: CaseTable,
    catalog: SeriesCatalog,
}

impl TableStore {
    pub fn new(cases: CaseTable, catalog: SeriesCatalog) -> Self {
        Self { cases, catalog }
    }

    /// Load both tables from their sources.
    ///
    /// Flow: case source → last CSV wins → case table;
    /// stocks source → every CSV → one catalog entry keyed by entry name.
    pub fn load(
        case_source: &mut dyn TableSource,
        stock_source: &mut dyn TableSource,
    ) -> Result<Self, CoreError> {
        let cases = Self::load_cases(case_source)?;
        let catalog = Self::load_catalog(stock_source)?;
        tracing::info!(
            case_rows = cases.len(),
            series = catalog.len(),
            price_rows = catalog.total_rows(),
            "Table store loaded"
        );
        Ok(Self::new(cases, catalog))
    }

    /// Load from two paths on disk. Each path is either a zip archive
    /// or a directory of already-extracted files.
    pub fn load_from_paths(
        case_path: impl AsRef<Path>,
        stocks_path: impl AsRef<Path>,
    ) -> Result<Self, CoreError> {
        let mut case_source = open_source(case_path.as_ref())?;
        let mut stock_source = open_source(stocks_path.as_ref())?;
        Self::load(case_source.as_mut(), stock_source.as_mut())
    }

    /// Read the case table. When the source holds several CSV files the
    /// last one read wins; nothing is merged.
    pub fn load_cases(source: &mut dyn TableSource) -> Result<CaseTable, CoreError> {
        let entries = source.tabular_entries()?;
        let mut cases = None;
        for entry in &entries {
            if cases.is_some() {
                tracing::warn!(
                    source = source.name(),
                    entry = %entry,
                    "Replacing previously read case table"
                );
            }
            let bytes = source.read_entry(entry)?;
            cases = Some(format::read_case_table(&bytes, entry)?);
            tracing::debug!(entry = %entry, "Read case table");
        }
        cases.ok_or_else(|| CoreError::NoTabularFile(source.name().to_string()))
    }

    /// Read every CSV of the stocks source into the catalog.
    pub fn load_catalog(source: &mut dyn TableSource) -> Result<SeriesCatalog, CoreError> {
        let entries = source.tabular_entries()?;
        if entries.is_empty() {
            return Err(CoreError::NoTabularFile(source.name().to_string()));
        }
        let mut catalog = SeriesCatalog::new();
        for entry in entries {
            let bytes = source.read_entry(&entry)?;
            let table = format::read_price_table(&bytes, &entry)?;
            tracing::debug!(entry = %entry, rows = table.len(), "Read price table");
            catalog.insert(entry, table);
        }
        Ok(catalog)
    }

    pub fn cases(&self) -> &CaseTable {
        &self.cases
    }

    pub fn catalog(&self) -> &SeriesCatalog {
        &self.catalog
    }

    /// Full span of the case table: the date picker's initial range.
    ///
    /// Falls back to the span of all price tables, and to the widest
    /// possible interval when nothing carries a date at all.
    pub fn default_interval(&self) -> Interval {
        if let Some((start, end)) = self.cases.date_span() {
            return Interval::new(start, end);
        }
        let mut span: Option<(NaiveDate, NaiveDate)> = None;
        for id in self.catalog.ids() {
            if let Some((lo, hi)) = self.catalog.get(id).and_then(|t| t.date_span()) {
                span = Some(match span {
                    Some((a, b)) => (a.min(lo), b.max(hi)),
                    None => (lo, hi),
                });
            }
        }
        let (start, end) = span.unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        Interval::new(start, end)
    }
}

/// Pick a source implementation for a path: directories are read as-is,
/// anything else is opened as a zip archive.
pub fn open_source(path: &Path) -> Result<Box<dyn TableSource>, CoreError> {
    if path.is_dir() {
        Ok(Box::new(DirectorySource::open(path)?))
    } else {
        Ok(Box::new(ZipArchiveSource::open(path)?))
    }
}
