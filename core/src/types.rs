use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ColorError;

/// One sample of a candidate's win probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Unix seconds.
    pub time: i64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    pub fn channels(self) -> (u8, u8, u8) {
        let Rgb(hex) = self;
        (
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        )
    }

    pub fn hex(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.channels();
        write!(f, "rgb({r}, {g}, {b})")
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    /// Accepts `#rrggbb` or `rgb(r, g, b)`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let invalid = || ColorError::Invalid(raw.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() != 6 {
                return Err(invalid());
            }
            return u32::from_str_radix(hex, 16).map(Rgb).map_err(|_| invalid());
        }

        let inner = trimmed
            .strip_prefix("rgb(")
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let parts: Vec<u8> = inner
            .split(',')
            .map(|p| p.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .map_err(|_| invalid())?;
        match parts.as_slice() {
            [r, g, b] => Ok(Rgb(((*r as u32) << 16) | ((*g as u32) << 8) | *b as u32)),
            _ => Err(invalid()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub title: String,
    pub color: Rgb,
    pub points: Vec<SeriesPoint>,
}

impl Dataset {
    pub fn new(title: impl Into<String>, color: Rgb, points: Vec<SeriesPoint>) -> Self {
        Self {
            title: title.into(),
            color,
            points,
        }
    }

    /// Exact-time lookup; points are kept sorted by time.
    pub fn value_at(&self, time: i64) -> Option<f64> {
        self.points
            .binary_search_by_key(&time, |p| p.time)
            .ok()
            .map(|idx| self.points[idx].value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
    ArrowUp,
    ArrowDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPosition {
    AboveBar,
    BelowBar,
    InBar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub time: i64,
    pub shape: MarkerShape,
    pub position: MarkerPosition,
    pub color: Rgb,
    pub size: Option<f32>,
    pub text: Option<String>,
}

/// A curated news moment tied to one candidate's series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactfulEvent {
    pub date: String,
    /// Free text; the title is the first `[...]` segment.
    pub event: String,
    pub impact_on: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ImpactfulEvent {
    pub fn title(&self) -> Option<&str> {
        let start = self.event.find('[')? + 1;
        let len = self.event[start..].find(']')?;
        Some(&self.event[start..start + len])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsEvent {
    pub date: String,
    pub main_events: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesColumns {
    pub time: String,
    pub value: String,
}

impl Default for SeriesColumns {
    fn default() -> Self {
        Self {
            time: "time".into(),
            value: "value".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesFormat {
    Json,
    Csv,
    Parquet,
}

impl SeriesFormat {
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(SeriesFormat::Json),
            "csv" => Some(SeriesFormat::Csv),
            "parquet" | "parq" => Some(SeriesFormat::Parquet),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_css_and_hex_colors() {
        assert_eq!("rgb(234, 101, 85)".parse::<Rgb>().unwrap(), Rgb(0xea6555));
        assert_eq!("#356ef8".parse::<Rgb>().unwrap(), Rgb(0x356ef8));
        assert!("rgb(1, 2)".parse::<Rgb>().is_err());
        assert!("#12345".parse::<Rgb>().is_err());
        assert_eq!(Rgb(0xbdbdbd).to_string(), "rgb(189, 189, 189)");
    }

    #[test]
    fn event_title_is_first_bracketed_segment() {
        let event = ImpactfulEvent {
            date: "2024-07-21".into(),
            event: "[Biden withdraws] from the race [late]".into(),
            impact_on: "Biden".into(),
            image: None,
        };
        assert_eq!(event.title(), Some("Biden withdraws"));

        let untitled = ImpactfulEvent {
            event: "no brackets here".into(),
            ..event
        };
        assert_eq!(untitled.title(), None);
    }

    #[test]
    fn detects_series_format_from_extension() {
        assert_eq!(SeriesFormat::detect(Path::new("a/trump.JSON")), Some(SeriesFormat::Json));
        assert_eq!(SeriesFormat::detect(Path::new("b.parq")), Some(SeriesFormat::Parquet));
        assert_eq!(SeriesFormat::detect(Path::new("c")), None);
    }

    #[test]
    fn value_at_requires_exact_time() {
        let ds = Dataset::new(
            "Trump",
            Rgb(0),
            vec![
                SeriesPoint { time: 10, value: 0.4 },
                SeriesPoint { time: 20, value: 0.6 },
            ],
        );
        assert_eq!(ds.value_at(20), Some(0.6));
        assert_eq!(ds.value_at(15), None);
    }
}
