//! Conversions between model fields and their TEXT column encodings.
//!
//! Ids are stored as hyphenated UUID strings, timestamps as RFC3339 with a
//! `Z` suffix (so lexical order is chronological), dates as `YYYY-MM-DD` and
//! keyword id lists as JSON arrays.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::Row;
use uuid::Uuid;

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

pub fn uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw).map_err(|e| conversion_error(idx, e))
}

pub fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    raw.parse::<DateTime<Utc>>()
        .map_err(|e| conversion_error(idx, e))
}

pub fn date_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    raw.parse::<NaiveDate>()
        .map_err(|e| conversion_error(idx, e))
}

pub fn uuid_list_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<Uuid>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw).map_err(|e| conversion_error(idx, e))
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
