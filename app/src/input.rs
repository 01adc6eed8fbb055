use std::path::PathBuf;

use clap::ValueEnum;
use odds_core::{DatasetSource, MarkerPosition, MarkerShape, Rgb, SeriesFormat};
use time::UtcOffset;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum InputFormat {
    Json,
    Csv,
    Parquet,
}

impl From<InputFormat> for SeriesFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Json => SeriesFormat::Json,
            InputFormat::Csv => SeriesFormat::Csv,
            InputFormat::Parquet => SeriesFormat::Parquet,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum InputMarkerShape {
    Circle,
    Square,
    ArrowUp,
    ArrowDown,
}

impl From<InputMarkerShape> for MarkerShape {
    fn from(shape: InputMarkerShape) -> Self {
        match shape {
            InputMarkerShape::Circle => MarkerShape::Circle,
            InputMarkerShape::Square => MarkerShape::Square,
            InputMarkerShape::ArrowUp => MarkerShape::ArrowUp,
            InputMarkerShape::ArrowDown => MarkerShape::ArrowDown,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum InputMarkerPosition {
    AboveBar,
    BelowBar,
    InBar,
}

impl From<InputMarkerPosition> for MarkerPosition {
    fn from(position: InputMarkerPosition) -> Self {
        match position {
            InputMarkerPosition::AboveBar => MarkerPosition::AboveBar,
            InputMarkerPosition::BelowBar => MarkerPosition::BelowBar,
            InputMarkerPosition::InBar => MarkerPosition::InBar,
        }
    }
}

/// Fallback colours for `--series` entries that omit one.
const PALETTE: &[u32] = &[0xea6555, 0xbdbdbd, 0x356ef8, 0x22c55e, 0xf59e0b, 0xa855f7];

/// Parses `TITLE=PATH[@COLOR]`.
pub fn parse_series(raw: &str) -> Result<DatasetSource, String> {
    let (title, rest) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TITLE=PATH[@COLOR], got '{raw}'"))?;
    let title = title.trim();
    if title.is_empty() {
        return Err("series title cannot be empty".into());
    }

    let (path, color) = match split_color(rest) {
        (path, Some(color)) => (path, Some(color.parse::<Rgb>().map_err(|e| e.to_string())?)),
        (path, None) => (path, None),
    };
    if path.trim().is_empty() {
        return Err(format!("series '{title}' has no path"));
    }

    Ok(DatasetSource::new(
        title,
        color.unwrap_or(Rgb(PALETTE[0])),
        PathBuf::from(path.trim()),
    ))
}

/// Gives palette colours to series parsed without an explicit one.
pub fn assign_palette(sources: &mut [DatasetSource], explicit: &[bool]) {
    for (idx, (source, has_color)) in sources.iter_mut().zip(explicit).enumerate() {
        if !has_color {
            source.color = Rgb(PALETTE[idx % PALETTE.len()]);
        }
    }
}

pub fn has_explicit_color(raw: &str) -> bool {
    raw.split_once('=')
        .is_some_and(|(_, rest)| split_color(rest).1.is_some())
}

/// Splits `PATH[@COLOR]`. Only a suffix that looks like a colour (`#...` or
/// `rgb(...)`) counts, so paths may contain `@`.
fn split_color(rest: &str) -> (&str, Option<&str>) {
    match rest.rsplit_once('@') {
        Some((path, color)) => {
            let color = color.trim();
            if color.starts_with('#') || color.starts_with("rgb(") {
                (path, Some(color))
            } else {
                (rest, None)
            }
        }
        None => (rest, None),
    }
}

/// Parses `+08:00`, `-5`, `+0530` or `UTC`.
pub fn parse_utc_offset(raw: &str) -> Result<UtcOffset, String> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
        return Ok(UtcOffset::UTC);
    }

    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'+') => (1, &trimmed[1..]),
        Some(b'-') => (-1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let invalid = || format!("invalid UTC offset: {raw}");
    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h, m),
        None if digits.len() == 4 => digits.split_at(2),
        None => (digits, "0"),
    };
    let hours: i8 = hours.parse().map_err(|_| invalid())?;
    let minutes: i8 = minutes.parse().map_err(|_| invalid())?;
    UtcOffset::from_hms(sign * hours, sign * minutes, 0).map_err(|_| invalid())
}
