use gpui::{Bounds, Pixels};
use odds_core::hover::{HoverContext, HoverInput, resolve_hover};
use odds_core::viewport::{index_at, padded_value_bounds};
use odds_core::{ChartData, DetailPanel, HoverState, PlotBounds, TooltipLayout, Viewport};
use tracing::debug;

use super::super::{ChartMeta, ChartOptions};
use super::PRICE_AXIS_WIDTH;

pub(crate) struct ChartView {
    pub(super) data: ChartData,
    pub(super) source: String,
    pub(super) options: ChartOptions,
    pub(super) viewport: Viewport,
    pub(super) value_min: f64,
    pub(super) value_max: f64,
    pub(super) chart_bounds: Option<Bounds<Pixels>>,
    pub(super) last_drag_position: Option<(f32, f32)>,
    pub(super) dragging: bool,
    pub(super) drag_moved: bool,
    pub(super) hover: HoverState,
    pub(super) detail: DetailPanel,
}

impl ChartView {
    pub(crate) fn new(data: ChartData, meta: ChartMeta, options: ChartOptions) -> Self {
        let mut view = Self {
            data: ChartData::default(),
            source: meta.source,
            options,
            viewport: Viewport::fit_content(),
            value_min: 0.0,
            value_max: 1.0,
            chart_bounds: None,
            last_drag_position: None,
            dragging: false,
            drag_moved: false,
            hover: HoverState::Hidden,
            detail: DetailPanel::default(),
        };
        view.set_data(data);
        view
    }

    /// Swaps in a new bundle and rebuilds everything derived from it.
    pub(crate) fn set_data(&mut self, data: ChartData) {
        self.data = data;
        self.viewport = Viewport::fit_content();
        self.hover = HoverState::Hidden;
        self.detail.clear();
        self.dragging = false;
        self.last_drag_position = None;
        self.refresh_value_bounds();
    }

    pub(super) fn visible_range(&self) -> (usize, usize) {
        self.viewport.visible_range(self.data.axis.len())
    }

    pub(super) fn refresh_value_bounds(&mut self) {
        let (start, end) = self.visible_range();
        let last = end.checked_sub(1).and_then(|i| self.data.axis.get(i));
        let (min, max) = match (self.data.axis.get(start), last) {
            (Some(first), Some(last)) => padded_value_bounds(&self.data.datasets, first, last),
            _ => (0.0, 1.0),
        };
        self.value_min = min;
        self.value_max = max;
    }

    pub(super) fn plot_bounds(&self) -> Option<PlotBounds> {
        let b = self.chart_bounds?;
        Some(PlotBounds {
            x: f32::from(b.origin.x),
            y: f32::from(b.origin.y),
            width: f32::from(b.size.width),
            height: f32::from(b.size.height),
        })
    }

    /// Resolves the tooltip for an absolute pointer position.
    pub(crate) fn hover_at(&mut self, x: f32, y: f32) {
        let Some(bounds) = self.plot_bounds() else {
            self.hover = HoverState::Hidden;
            return;
        };
        let (start, end) = self.visible_range();
        let time = index_at(x - bounds.x, bounds.width, end - start)
            .and_then(|local| self.data.axis.get(start + local));

        let ctx = HoverContext {
            bounds,
            layout: TooltipLayout {
                price_scale_width: PRICE_AXIS_WIDTH,
                time_scale_width: bounds.width,
                tooltip_width: self.options.tooltip_width,
            },
            datasets: &self.data.datasets,
            events: &self.data.events,
            tz: self.data.tz,
        };
        let next = resolve_hover(
            HoverInput {
                pointer: Some((x, y)),
                time,
            },
            &ctx,
        );
        if next.time() != self.hover.time() {
            debug!(time = ?next.time(), "crosshair moved");
        }
        self.hover = next;
    }

    pub(crate) fn clear_hover(&mut self) {
        self.hover = HoverState::Hidden;
    }

    /// Loads the hovered day's news into the detail panel.
    pub(crate) fn click(&mut self) -> bool {
        self.detail
            .on_click(self.hover.time(), &self.data.news, self.data.tz)
    }
}
