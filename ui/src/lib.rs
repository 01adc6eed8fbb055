mod assets;
mod chart;
pub mod logging;

pub use assets::{DataAssets, application_with_assets};
pub use chart::{ChartMeta, ChartOptions, launch_chart};
