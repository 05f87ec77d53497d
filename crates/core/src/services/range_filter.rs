use crate::models::selection::Interval;
use crate::models::table::{Dated, TimeSeriesTable};

/// Rows of `table` whose date lies in `interval`, both ends inclusive.
///
/// Row order is preserved and `table` is left untouched. Works on unsorted
/// tables, keeps duplicate dates, and yields an empty table for an interval
/// that matches nothing (including an inverted one).
pub fn filter<R: Dated + Clone>(
    table: &TimeSeriesTable<R>,
    interval: &Interval,
) -> TimeSeriesTable<R> {
    filter_rows(table, interval).cloned().collect()
}

/// Borrowing variant of [`filter`] for builders that only read the rows.
pub fn filter_rows<'a, R: Dated>(
    table: &'a TimeSeriesTable<R>,
    interval: &'a Interval,
) -> impl Iterator<Item = &'a R> + 'a {
    table.iter().filter(move |r| interval.contains(r.date()))
}
