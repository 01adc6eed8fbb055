use std::fs;
use std::path::Path;

use polars::datatypes::TimeUnit;
use polars::prelude::PlPathRef;
use polars::prelude::*;
use serde::de::DeserializeOwned;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::debug;

use crate::{ImpactfulEvent, LoadError, NewsEvent, SeriesColumns, SeriesFormat, SeriesPoint};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a JSON array of `{ "time": <secs>, "value": <0..1> }`.
pub fn load_series_json(path: impl AsRef<Path>) -> Result<Vec<SeriesPoint>, LoadError> {
    read_json(path.as_ref())
}

pub fn load_series_csv(
    path: impl AsRef<Path>,
    columns: &SeriesColumns,
) -> Result<Vec<SeriesPoint>, LoadError> {
    let pl_path = PlPathRef::from_local_path(path.as_ref()).into_owned();
    let lf = LazyCsvReader::new(pl_path).with_has_header(true);
    let df = lf.finish()?.collect()?;
    parse_frame(df, columns)
}

pub fn load_series_parquet(
    path: impl AsRef<Path>,
    columns: &SeriesColumns,
) -> Result<Vec<SeriesPoint>, LoadError> {
    let pl_path = PlPathRef::from_local_path(path.as_ref()).into_owned();
    let lf = LazyFrame::scan_parquet(pl_path, ScanArgsParquet::default())?;
    let df = lf.collect()?;
    parse_frame(df, columns)
}

pub fn load_series(
    path: impl AsRef<Path>,
    format: Option<SeriesFormat>,
    columns: &SeriesColumns,
) -> Result<Vec<SeriesPoint>, LoadError> {
    let path = path.as_ref();
    let format = format
        .or_else(|| SeriesFormat::detect(path))
        .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    debug!(path = %path.display(), ?format, "loading series");
    match format {
        SeriesFormat::Json => load_series_json(path),
        SeriesFormat::Csv => load_series_csv(path, columns),
        SeriesFormat::Parquet => load_series_parquet(path, columns),
    }
}

pub fn load_impactful_events(path: impl AsRef<Path>) -> Result<Vec<ImpactfulEvent>, LoadError> {
    read_json(path.as_ref())
}

pub fn load_news(path: impl AsRef<Path>) -> Result<Vec<NewsEvent>, LoadError> {
    read_json(path.as_ref())
}

/// Rejects series that are not strictly increasing in time or that hold a
/// value outside `[0, 1]`.
pub fn validate_series(series: &str, points: &[SeriesPoint]) -> Result<(), LoadError> {
    for (row, point) in points.iter().enumerate() {
        if !(0.0..=1.0).contains(&point.value) {
            return Err(LoadError::ValueOutOfRange {
                series: series.to_string(),
                row,
                value: point.value,
            });
        }
        if row > 0 && points[row - 1].time >= point.time {
            return Err(LoadError::UnorderedSeries {
                series: series.to_string(),
                row,
            });
        }
    }
    Ok(())
}

fn parse_frame(df: DataFrame, columns: &SeriesColumns) -> Result<Vec<SeriesPoint>, LoadError> {
    let ts = df
        .column(&columns.time)
        .map_err(|_| LoadError::MissingColumn(columns.time.clone()))?;
    let value = df
        .column(&columns.value)
        .map_err(|_| LoadError::MissingColumn(columns.value.clone()))?;

    let len = ts.len();
    if value.len() != len {
        return Err(LoadError::LengthMismatch);
    }

    let mut points = Vec::with_capacity(len);
    for idx in 0..len {
        let time = to_unix_seconds(ts.get(idx)?, idx)?;
        let value = to_f64(value.get(idx)?, &columns.value, idx)?;
        points.push(SeriesPoint { time, value });
    }

    Ok(points)
}

fn to_unix_seconds(value: AnyValue, row: usize) -> Result<i64, LoadError> {
    match value {
        AnyValue::Datetime(ts, unit, _) => Ok(match unit {
            TimeUnit::Nanoseconds => ts / 1_000_000_000,
            TimeUnit::Microseconds => ts / 1_000_000,
            TimeUnit::Milliseconds => ts / 1_000,
        }),
        AnyValue::Date(days) => Ok(days as i64 * 86_400),
        AnyValue::Int64(secs) => Ok(secs),
        AnyValue::Int32(secs) => Ok(secs as i64),
        AnyValue::String(s) => OffsetDateTime::parse(s, &Rfc3339)
            .map(|dt| dt.unix_timestamp())
            .map_err(|err| LoadError::UnsupportedTimestamp {
                row,
                value: format!("{s} ({err})"),
            }),
        AnyValue::StringOwned(s) => to_unix_seconds(AnyValue::String(&s), row),
        other => Err(LoadError::UnsupportedTimestamp {
            row,
            value: format!("{other:?}"),
        }),
    }
}

fn to_f64(value: AnyValue, column: &str, row: usize) -> Result<f64, LoadError> {
    match value {
        AnyValue::Float64(v) => Ok(v),
        AnyValue::Float32(v) => Ok(v as f64),
        AnyValue::Int64(v) => Ok(v as f64),
        AnyValue::Int32(v) => Ok(v as f64),
        AnyValue::String(s) => s.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
            column: column.to_string(),
            row,
            value: s.to_string(),
        }),
        AnyValue::StringOwned(s) => to_f64(AnyValue::String(&s), column, row),
        other => Err(LoadError::InvalidNumber {
            column: column.to_string(),
            row,
            value: format!("{other:?}"),
        }),
    }
}
