use std::path::PathBuf;

use gpui::{App, Bounds, WindowBounds, WindowOptions, prelude::*, px, size};
use odds_core::ChartData;
use odds_core::hover::DEFAULT_TOOLTIP_WIDTH;

use crate::assets::application_with_assets;

mod canvas;
mod detail;
mod error_view;
mod header;
mod view;

pub(crate) use view::ChartView;
use error_view::ErrorView;

#[derive(Clone)]
pub struct ChartMeta {
    pub source: String,
}

/// Presentation knobs; defaults follow the original web chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    pub tooltip_width: f32,
    pub chart_height: f32,
    pub line_width: f32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            tooltip_width: DEFAULT_TOOLTIP_WIDTH,
            chart_height: 500.0,
            line_width: 3.0,
        }
    }
}

/// Opens the chart window, or an error view when loading failed.
/// Event images are resolved against `asset_root`.
pub fn launch_chart(
    load_result: Result<ChartData, String>,
    meta: ChartMeta,
    options: ChartOptions,
    asset_root: PathBuf,
) {
    application_with_assets(asset_root).run(move |cx: &mut App| {
        gpui_component::theme::init(cx);

        let bounds = Bounds::centered(None, size(px(1200.), px(860.)), cx);
        let window_options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            focus: true,
            ..Default::default()
        };
        let opened = match load_result {
            Ok(data) => cx
                .open_window(window_options, move |_, cx| {
                    cx.new(|_| ChartView::new(data, meta, options))
                })
                .map(|_| ()),
            Err(message) => cx
                .open_window(window_options, move |_, cx| {
                    cx.new(|_| ErrorView::new(meta.source, message))
                })
                .map(|_| ()),
        };
        if let Err(err) = opened {
            tracing::error!(%err, "failed to open chart window");
            cx.quit();
            return;
        }
        cx.activate(true);
    });
}
