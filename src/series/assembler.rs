use crate::series::error::SeriesError;
use crate::types::series::{Series, TimeSeriesPoint};
use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use std::path::{Path, PathBuf};

/// Timestamp format used by the archive CSVs, e.g. `2020-06-01T13:05:00`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Builds one named series from one sensor's artifact list.
///
/// Every file is parsed as semicolon-delimited CSV with a header row; the
/// `timestamp` field and the requested `column` field of every row become
/// one point. Points from all files are merged and stable-sorted ascending
/// by timestamp, so rows sharing a timestamp keep their input order. A
/// malformed row is an error for the whole call, not a silently dropped
/// sample.
///
/// The series is named after the sensor identifier embedded in the first
/// file's name (`2020-06-01_sds011_43258.csv` → `sds011_43258`).
pub fn assemble_series(files: &[PathBuf], column: &str) -> Result<Series, SeriesError> {
    let mut points = Vec::new();
    for file in files {
        extract_points(file, column, &mut points)?;
    }
    // Stable, so equal timestamps keep their relative input order.
    points.sort_by_key(|point| point.timestamp_ms);
    let name = files.first().map(|f| series_name(f)).unwrap_or_default();
    Ok(Series { name, points })
}

/// Builds one series per sensor of a category, in the order the artifact
/// lists were grouped. Sensors that ended up with no artifacts are skipped;
/// if no sensor has any, the category has nothing to graph and that is
/// reported as [`SeriesError::NoArtifacts`] instead of an empty chart.
pub fn assemble_group(
    category: &str,
    artifact_lists: &[Vec<PathBuf>],
    column: &str,
) -> Result<Vec<Series>, SeriesError> {
    let mut series = Vec::new();
    for files in artifact_lists {
        if files.is_empty() {
            continue;
        }
        series.push(assemble_series(files, column)?);
    }
    if series.is_empty() {
        return Err(SeriesError::NoArtifacts {
            category: category.to_string(),
        });
    }
    Ok(series)
}

fn extract_points(
    path: &Path,
    column: &str,
    points: &mut Vec<TimeSeriesPoint>,
) -> Result<(), SeriesError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_path(path)
        .map_err(|e| SeriesError::CsvRead(path.to_path_buf(), e))?;

    let headers = reader
        .headers()
        .map_err(|e| SeriesError::CsvRead(path.to_path_buf(), e))?
        .clone();
    let timestamp_idx = field_index(&headers, "timestamp", path)?;
    let value_idx = field_index(&headers, column, path)?;

    for record in reader.records() {
        let record = record.map_err(|e| SeriesError::CsvRead(path.to_path_buf(), e))?;
        let raw_timestamp = field(&record, timestamp_idx, "timestamp", path)?;
        let raw_value = field(&record, value_idx, column, path)?;

        let timestamp = NaiveDateTime::parse_from_str(raw_timestamp, TIMESTAMP_FORMAT).map_err(
            |e| SeriesError::Timestamp {
                path: path.to_path_buf(),
                value: raw_timestamp.to_string(),
                source: e,
            },
        )?;
        let value: f64 = raw_value.parse().map_err(|e| SeriesError::Value {
            path: path.to_path_buf(),
            column: column.to_string(),
            value: raw_value.to_string(),
            source: e,
        })?;

        points.push(TimeSeriesPoint {
            timestamp_ms: timestamp.and_utc().timestamp_millis(),
            value,
        });
    }
    Ok(())
}

fn field_index(headers: &csv::StringRecord, name: &str, path: &Path) -> Result<usize, SeriesError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| SeriesError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
}

fn field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    name: &str,
    path: &Path,
) -> Result<&'r str, SeriesError> {
    record.get(index).ok_or_else(|| SeriesError::MissingColumn {
        path: path.to_path_buf(),
        column: name.to_string(),
    })
}

/// `2020-06-01_sds011_43258.csv` → `sds011_43258`: everything after the
/// first `_` of the file stem.
fn series_name(file: &Path) -> String {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.split_once('_') {
        Some((_, sensor)) => sensor.to_string(),
        None => stem,
    }
}
