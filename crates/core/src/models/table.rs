use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A row that carries a calendar date. Everything the range filter needs.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// One row of the case-count table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRow {
    pub date: NaiveDate,
    /// Cumulative case count. `None` where the source cell was blank.
    pub total_cases: Option<f64>,
}

impl CaseRow {
    pub fn new(date: NaiveDate, total_cases: f64) -> Self {
        Self {
            date,
            total_cases: Some(total_cases),
        }
    }
}

impl Dated for CaseRow {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// One row of a per-security price table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub date: NaiveDate,
    /// Closing price, the primary measure of a security.
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl PriceRow {
    pub fn new(date: NaiveDate, close: f64, volume: f64) -> Self {
        Self {
            date,
            close: Some(close),
            volume: Some(volume),
        }
    }
}

impl Dated for PriceRow {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Ordered sequence of dated rows.
///
/// Rows are kept in load order. Nothing here sorts or deduplicates:
/// two rows on the same date are both kept and both survive filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesTable<R> {
    rows: Vec<R>,
}

pub type CaseTable = TimeSeriesTable<CaseRow>;
pub type PriceTable = TimeSeriesTable<PriceRow>;

impl<R> TimeSeriesTable<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }
}

impl<R: Dated> TimeSeriesTable<R> {
    /// Earliest and latest date in the table, or `None` when empty.
    /// Independent of row order.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.rows.iter().map(Dated::date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}

impl<R> Default for TimeSeriesTable<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R> FromIterator<R> for TimeSeriesTable<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a, R> IntoIterator for &'a TimeSeriesTable<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
