use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog::SeriesId;

/// Series chosen by the user, in selection order.
///
/// Order matters: the first entry is the one bar and pie charts use.
/// Duplicates are dropped, keeping the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SeriesId>", into = "Vec<SeriesId>")]
pub struct Selection {
    ids: Vec<SeriesId>,
}

impl Selection {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SeriesId>,
    {
        let mut out: Vec<SeriesId> = Vec::new();
        for id in ids {
            let id = id.into();
            if !out.contains(&id) {
                out.push(id);
            }
        }
        Self { ids: out }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn first(&self) -> Option<&str> {
        self.ids.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[SeriesId] {
        &self.ids
    }
}

impl From<Vec<SeriesId>> for Selection {
    fn from(ids: Vec<SeriesId>) -> Self {
        Self::new(ids)
    }
}

impl From<Selection> for Vec<SeriesId> {
    fn from(selection: Selection) -> Self {
        selection.ids
    }
}

/// Inclusive date range `[start, end]`.
///
/// Both ends move independently, so `start > end` is representable.
/// An inverted interval contains no dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Interval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn with_start(self, start: NaiveDate) -> Self {
        Self { start, ..self }
    }

    pub fn with_end(self, end: NaiveDate) -> Self {
        Self { end, ..self }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
