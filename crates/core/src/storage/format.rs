use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::errors::CoreError;
use crate::models::table::{CaseRow, CaseTable, PriceRow, PriceTable};

/// Canonical name of the date column every table ends up with.
pub const DATE_COLUMN: &str = "Date";

/// Source names accepted for the case table's date column (renamed to `Date`).
pub const CASE_DATE_COLUMNS: &[&str] = &["date", DATE_COLUMN];

pub const TOTAL_CASES_COLUMN: &str = "total_cases";
pub const CLOSE_COLUMN: &str = "Close";
pub const VOLUME_COLUMN: &str = "Volume";

/// Date format of the date columns. Anything after the first 10 characters
/// (a time of day, a UTC offset) is ignored.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decode the case-count table from CSV bytes.
///
/// Keeps `date`/`Date` (as `Date`) and `total_cases`; other columns are ignored.
pub fn read_case_table(bytes: &[u8], entry: &str) -> Result<CaseTable, CoreError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(bytes);
    let headers = reader.headers()?.clone();
    let date_idx = column_index(&headers, CASE_DATE_COLUMNS, entry)?;
    let cases_idx = column_index(&headers, &[TOTAL_CASES_COLUMN], entry)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = line_of(&record);
        rows.push(CaseRow {
            date: parse_date(field(&record, date_idx), entry, line)?,
            total_cases: parse_measure(field(&record, cases_idx), entry, line)?,
        });
    }
    Ok(CaseTable::new(rows))
}

/// Decode one security's price table from CSV bytes.
///
/// Keeps `Date`, `Close` and `Volume`; other columns (Open, High, ...) are ignored.
pub fn read_price_table(bytes: &[u8], entry: &str) -> Result<PriceTable, CoreError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(bytes);
    let headers = reader.headers()?.clone();
    let date_idx = column_index(&headers, &[DATE_COLUMN], entry)?;
    let close_idx = column_index(&headers, &[CLOSE_COLUMN], entry)?;
    let volume_idx = column_index(&headers, &[VOLUME_COLUMN], entry)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = line_of(&record);
        rows.push(PriceRow {
            date: parse_date(field(&record, date_idx), entry, line)?,
            close: parse_measure(field(&record, close_idx), entry, line)?,
            volume: parse_measure(field(&record, volume_idx), entry, line)?,
        });
    }
    Ok(PriceTable::new(rows))
}

/// Find the first header matching any of `names`.
fn column_index(headers: &StringRecord, names: &[&str], entry: &str) -> Result<usize, CoreError> {
    names
        .iter()
        .find_map(|name| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == *name)
        })
        .ok_or_else(|| {
            let wanted = names.join("' or '");
            CoreError::InvalidFileFormat(format!("{entry}: missing column '{wanted}'"))
        })
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

/// Parse a `YYYY-MM-DD` date, ignoring any trailing time part.
pub fn parse_date(raw: &str, entry: &str, line: u64) -> Result<NaiveDate, CoreError> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, DATE_FORMAT).map_err(|_| {
        CoreError::InvalidFileFormat(format!("{entry}: line {line}: invalid date '{raw}'"))
    })
}

/// Parse a numeric cell. Blank, `null`, `NA` and `NaN` cells are missing values.
pub fn parse_measure(raw: &str, entry: &str, line: u64) -> Result<Option<f64>, CoreError> {
    if raw.is_empty()
        || raw.eq_ignore_ascii_case("null")
        || raw.eq_ignore_ascii_case("na")
        || raw.eq_ignore_ascii_case("nan")
    {
        return Ok(None);
    }
    let value: f64 = raw.parse().map_err(|_| {
        CoreError::InvalidFileFormat(format!("{entry}: line {line}: invalid number '{raw}'"))
    })?;
    Ok(if value.is_nan() { None } else { Some(value) })
}
