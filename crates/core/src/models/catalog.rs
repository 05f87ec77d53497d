use std::collections::BTreeMap;

use crate::errors::CoreError;

use super::table::PriceTable;

/// Identifier of one security: the source file name inside the stocks archive.
pub type SeriesId = String;

/// Read-only mapping from series identifier to its price table.
///
/// Built once at load time. Chart builders only ever receive `&SeriesCatalog`.
#[derive(Debug, Clone, Default)]
pub struct SeriesCatalog {
    series: BTreeMap<SeriesId, PriceTable>,
}

impl SeriesCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a series. Only used while loading.
    pub fn insert(&mut self, id: impl Into<SeriesId>, table: PriceTable) {
        self.series.insert(id.into(), table);
    }

    pub fn get(&self, id: &str) -> Option<&PriceTable> {
        self.series.get(id)
    }

    /// Look up a series, failing with `UnknownSeries` when it is absent.
    pub fn require(&self, id: &str) -> Result<&PriceTable, CoreError> {
        self.series
            .get(id)
            .ok_or_else(|| CoreError::UnknownSeries(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.series.contains_key(id)
    }

    /// All identifiers in stable (sorted) order, for the multi-select options.
    pub fn ids(&self) -> Vec<&str> {
        self.series.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total number of price rows across all series.
    pub fn total_rows(&self) -> usize {
        self.series.values().map(|t| t.len()).sum()
    }
}

impl FromIterator<(SeriesId, PriceTable)> for SeriesCatalog {
    fn from_iter<I: IntoIterator<Item = (SeriesId, PriceTable)>>(iter: I) -> Self {
        Self {
            series: iter.into_iter().collect(),
        }
    }
}
