use std::path::{Path, PathBuf};

use time::UtcOffset;
use tracing::{info, warn};

use crate::align::{MarkerMap, MarkerStyle, align_markers_with};
use crate::load::{load_impactful_events, load_news, load_series, validate_series};
use crate::viewport::TimeAxis;
use crate::{
    Dataset, ImpactfulEvent, LoadError, NewsEvent, Rgb, SeriesColumns, SeriesFormat,
};

/// Where one candidate's series lives and how to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSource {
    pub title: String,
    pub color: Rgb,
    pub path: PathBuf,
}

impl DatasetSource {
    pub fn new(title: impl Into<String>, color: Rgb, path: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            color,
            path: path.into(),
        }
    }
}

/// The three bundled candidates, relative to the data directory.
pub fn default_sources() -> Vec<DatasetSource> {
    vec![
        DatasetSource::new("Trump", Rgb(0xea6555), "polymarket_trump.json"),
        DatasetSource::new("Biden", Rgb(0xbdbdbd), "polymarket_biden.json"),
        DatasetSource::new("Harris", Rgb(0x356ef8), "polymarket_harris.json"),
    ]
}

pub const DEFAULT_EVENTS_FILE: &str = "impactful_events.json";
pub const DEFAULT_NEWS_FILE: &str = "main_events_by_date.json";

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub data_dir: PathBuf,
    pub series: Vec<DatasetSource>,
    pub events: PathBuf,
    pub news: PathBuf,
    pub format: Option<SeriesFormat>,
    pub columns: SeriesColumns,
    pub tz: UtcOffset,
    pub marker_style: MarkerStyle,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            series: default_sources(),
            events: PathBuf::from(DEFAULT_EVENTS_FILE),
            news: PathBuf::from(DEFAULT_NEWS_FILE),
            format: None,
            columns: SeriesColumns::default(),
            tz: UtcOffset::UTC,
            marker_style: MarkerStyle::default(),
        }
    }
}

impl CatalogConfig {
    /// Relative paths are resolved against `data_dir`.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }
}

/// Everything the chart needs, loaded once before the first render.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub datasets: Vec<Dataset>,
    pub markers: MarkerMap,
    pub axis: TimeAxis,
    pub events: Vec<ImpactfulEvent>,
    pub news: Vec<NewsEvent>,
    pub tz: UtcOffset,
}

impl Default for ChartData {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), UtcOffset::UTC)
    }
}

impl ChartData {
    pub fn new(
        datasets: Vec<Dataset>,
        events: Vec<ImpactfulEvent>,
        news: Vec<NewsEvent>,
        tz: UtcOffset,
    ) -> Self {
        Self::with_marker_style(datasets, events, news, tz, &MarkerStyle::default())
    }

    pub fn with_marker_style(
        datasets: Vec<Dataset>,
        events: Vec<ImpactfulEvent>,
        news: Vec<NewsEvent>,
        tz: UtcOffset,
        style: &MarkerStyle,
    ) -> Self {
        let markers = align_markers_with(&events, &datasets, tz, style);
        let axis = TimeAxis::from_datasets(&datasets);
        Self {
            datasets,
            markers,
            axis,
            events,
            news,
            tz,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }
}

pub struct Catalog;

impl Catalog {
    pub fn load(config: &CatalogConfig) -> Result<ChartData, LoadError> {
        let mut datasets = Vec::with_capacity(config.series.len());
        for source in &config.series {
            let path = config.resolve(&source.path);
            let points = load_series(&path, config.format, &config.columns)?;
            validate_series(&source.title, &points)?;
            if points.is_empty() {
                warn!(series = %source.title, "series is empty");
            }
            datasets.push(Dataset::new(source.title.clone(), source.color, points));
        }

        let events = load_impactful_events(config.resolve(&config.events))?;
        let news = load_news(config.resolve(&config.news))?;
        let data =
            ChartData::with_marker_style(datasets, events, news, config.tz, &config.marker_style);

        info!(
            series = data.datasets.len(),
            points = data.axis.len(),
            markers = data.markers.len(),
            events = data.events.len(),
            news_days = data.news.len(),
            "chart data loaded"
        );
        Ok(data)
    }
}
