mod error;
mod types;

pub mod align;
pub mod catalog;
pub mod dates;
pub mod hover;
pub mod load;
pub mod news;
pub mod viewport;

pub use align::{MarkerMap, MarkerStyle, align_markers, align_markers_with, closest_point};
pub use catalog::{Catalog, CatalogConfig, ChartData, DatasetSource, default_sources};
pub use error::{ColorError, DateError, LoadError};
pub use hover::{HoverState, PlotBounds, Tooltip, TooltipItem, TooltipLayout};
pub use news::{DetailPanel, news_for_day};
pub use types::{
    Dataset, ImpactfulEvent, Marker, MarkerPosition, MarkerShape, NewsEvent, Rgb, SeriesColumns,
    SeriesFormat, SeriesPoint,
};
pub use viewport::{TimeAxis, Viewport};
