use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use odds_core::catalog::{DEFAULT_EVENTS_FILE, DEFAULT_NEWS_FILE};
use odds_core::{Catalog, CatalogConfig, MarkerStyle, SeriesColumns, default_sources};
use time::UtcOffset;
use tracing::{error, info};
use ui::logging::{LogOptions, init_logging};

mod input;
use input::{
    InputFormat, InputMarkerPosition, InputMarkerShape, assign_palette, has_explicit_color,
    parse_series, parse_utc_offset,
};

#[derive(Parser, Debug)]
#[command(name = "odds-chart")]
struct Args {
    /// Directory holding the bundled series, events and news files.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Series to plot as TITLE=PATH[@COLOR]. Repeatable. Defaults to the
    /// bundled Trump/Biden/Harris odds.
    #[arg(long = "series", value_name = "TITLE=PATH[@COLOR]")]
    series: Vec<String>,

    /// Impactful events JSON (relative to --data-dir).
    #[arg(long, default_value = DEFAULT_EVENTS_FILE)]
    events: PathBuf,

    /// Daily news JSON (relative to --data-dir).
    #[arg(long, default_value = DEFAULT_NEWS_FILE)]
    news: PathBuf,

    /// Series file format. If omitted, inferred from each file's extension.
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// Time column name for CSV/Parquet series.
    #[arg(long, default_value = "time")]
    time_column: String,

    /// Value column name for CSV/Parquet series.
    #[arg(long, default_value = "value")]
    value_column: String,

    /// Display timezone used for calendar days (e.g. +08:00, -5, UTC).
    #[arg(long, default_value = "UTC", value_parser = parse_utc_offset)]
    utc_offset: UtcOffset,

    /// Event marker shape.
    #[arg(long, value_enum, default_value = "circle")]
    marker_shape: InputMarkerShape,

    /// Where event markers sit relative to the line.
    #[arg(long, value_enum, default_value = "in-bar")]
    marker_position: InputMarkerPosition,

    /// Label event markers with their titles.
    #[arg(long)]
    marker_labels: bool,

    /// Tooltip width in pixels.
    #[arg(long, default_value_t = 256.0)]
    tooltip_width: f32,

    /// Plot height in pixels.
    #[arg(long, default_value_t = 500.0)]
    chart_height: f32,

    /// Log filter used when RUST_LOG is unset (e.g. debug, odds_core=trace).
    #[arg(long)]
    log_level: Option<String>,

    /// Mirror logs to a file under tmp/.
    #[arg(long)]
    log_file: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = init_logging(&LogOptions {
        level: args.log_level.clone(),
        to_file: args.log_file,
    })? {
        info!(path = %path.display(), "writing logs to file");
    }

    let series = if args.series.is_empty() {
        default_sources()
    } else {
        let explicit: Vec<bool> = args
            .series
            .iter()
            .map(String::as_str)
            .map(has_explicit_color)
            .collect();
        let mut sources = args
            .series
            .iter()
            .map(String::as_str)
            .map(parse_series)
            .collect::<Result<Vec<_>, _>>()
            .map_err(anyhow::Error::msg)?;
        assign_palette(&mut sources, &explicit);
        sources
    };

    let config = CatalogConfig {
        data_dir: args.data_dir.clone(),
        series,
        events: args.events.clone(),
        news: args.news.clone(),
        format: args.format.map(Into::into),
        columns: SeriesColumns {
            time: args.time_column.clone(),
            value: args.value_column.clone(),
        },
        tz: args.utc_offset,
        marker_style: MarkerStyle {
            shape: args.marker_shape.into(),
            position: args.marker_position.into(),
            labels: args.marker_labels,
            ..MarkerStyle::default()
        },
    };

    let load_result = Catalog::load(&config)
        .map_err(|e| format!("failed to load {}: {e}", args.data_dir.display()))
        .and_then(|data| {
            if data.is_empty() {
                Err(format!("no series points loaded from {}", args.data_dir.display()))
            } else {
                Ok(data)
            }
        });
    if let Err(message) = &load_result {
        error!("{message}");
    }

    let meta = ui::ChartMeta {
        source: "US presidential election odds".to_string(),
    };
    let options = ui::ChartOptions {
        tooltip_width: args.tooltip_width,
        chart_height: args.chart_height,
        ..ui::ChartOptions::default()
    };

    ui::launch_chart(load_result, meta, options, args.data_dir);
    Ok(())
}
