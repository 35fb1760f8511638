//! Reads a city's trip CSV into a [`Dataset`] and applies the session filters.

use crate::error::{AppError, Result};
use crate::models::{City, Columns, Dataset, Filters, RawTrip, Trip, END_TIME, START_TIME};
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Timestamp layouts found in the bikeshare exports. `%.f` also accepts no fraction.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Path of `city`'s dataset inside `data_dir`.
pub fn dataset_path(data_dir: &Path, city: City) -> PathBuf {
    data_dir.join(city.file_name())
}

/// Loads the dataset for `filters.city` from `data_dir` and narrows it by month and day.
///
/// # Errors
///
/// Returns `AppError::Io` if the file cannot be opened, `AppError::Csv` if a row cannot
/// be deserialized, and `AppError::Timestamp` on a malformed start or end time.
pub fn load_data(data_dir: &Path, filters: &Filters) -> Result<Dataset> {
    let path = dataset_path(data_dir, filters.city);
    info!("Loading {} data from {}", filters.city, path.display());

    let file = File::open(&path).map_err(|e| {
        error!("Failed to open dataset {}: {}", path.display(), e);
        AppError::from(e)
    })?;

    let dataset = read_trips(filters.city, file)?;
    let total = dataset.len();
    let filtered = dataset.filter(filters.month, filters.day);

    info!(
        "Kept {} of {} trips for month={}, day={}",
        filtered.len(),
        total,
        filters.month,
        filters.day
    );
    Ok(filtered)
}

/// Parses every row of a trip CSV. Column presence is taken from the header.
/// Rows that stop short of the header leave their trailing cells absent.
pub fn read_trips<R: Read>(city: City, reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::from_headers(reader.headers()?.iter());
    debug!("Columns present for {}: {:?}", city, columns.present());

    let mut trips = Vec::new();
    for (index, row) in reader.deserialize::<RawTrip>().enumerate() {
        // Line 1 is the header.
        let line = index + 2;
        let raw = row.map_err(|e| {
            error!("Failed to deserialize line {} for {}: {}", line, city, e);
            AppError::from(e)
        })?;
        let start_time = parse_timestamp(raw.start_time.as_deref(), START_TIME, line)?;
        let end_time = parse_timestamp(raw.end_time.as_deref(), END_TIME, line)?;
        trips.push(Trip::new(raw, start_time, end_time));
    }

    debug!("Read {} trips for {}", trips.len(), city);
    Ok(Dataset::new(city, columns, trips))
}

/// Parses an optional timestamp cell. A blank cell is `None`; anything unparseable is fatal.
fn parse_timestamp(
    value: Option<&str>,
    column: &'static str,
    line: usize,
) -> Result<Option<NaiveDateTime>> {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    let mut last_err = None;
    for format in TIMESTAMP_FORMATS {
        match NaiveDateTime::parse_from_str(value, format) {
            Ok(parsed) => return Ok(Some(parsed)),
            Err(e) => last_err = Some(e),
        }
    }

    // TIMESTAMP_FORMATS is non-empty, so at least one error was recorded.
    match last_err {
        Some(source) => {
            error!("Malformed {} '{}' at line {}", column, value, line);
            Err(AppError::Timestamp {
                line,
                column,
                value: value.to_string(),
                source,
            })
        },
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use rstest::rstest;

    #[rstest]
    #[case("2017-06-23 15:09:32", 6, 15)]
    #[case("2017-01-01 00:07:57.123", 1, 0)]
    #[case("2017-03-31T23:59:59", 3, 23)]
    fn test_parse_timestamp_layouts(#[case] value: &str, #[case] month: u32, #[case] hour: u32) {
        let parsed = parse_timestamp(Some(value), START_TIME, 0)
            .unwrap()
            .unwrap();
        assert_eq!(parsed.month(), month);
        assert_eq!(parsed.hour(), hour);
    }

    #[test]
    fn test_parse_timestamp_blank_is_absent() {
        assert_eq!(parse_timestamp(None, START_TIME, 0).unwrap(), None);
        assert_eq!(parse_timestamp(Some(""), END_TIME, 0).unwrap(), None);
    }

    #[rstest]
    #[case("not a date")]
    #[case("2017-13-01 10:00:00")]
    #[case("06/23/2017 15:09")]
    fn test_parse_timestamp_rejects_malformed(#[case] value: &str) {
        match parse_timestamp(Some(value), END_TIME, 7) {
            Err(AppError::Timestamp { line, column, .. }) => {
                assert_eq!(line, 7);
                assert_eq!(column, END_TIME);
            },
            other => panic!("Expected Timestamp error, got {:?}", other),
        }
    }

    #[test]
    fn test_dataset_path_uses_city_table() {
        let path = dataset_path(Path::new("/data"), City::Washington);
        assert_eq!(path, PathBuf::from("/data/washington.csv"));
    }
}
