//! Crosshair resolution: turns a pointer position and a hovered time into the
//! tooltip the chart should show.

use time::UtcOffset;

use crate::dates::{event_timestamp, format_tooltip_date};
use crate::{Dataset, ImpactfulEvent, Rgb};

pub const DEFAULT_TOOLTIP_WIDTH: f32 = 256.0;
pub const UNKNOWN_EVENT_TITLE: &str = "Unknown Event";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlotBounds {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipItem {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipEvent {
    /// `None` when the brackets are empty; nothing is drawn then.
    pub title: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Left edge relative to the chart row (price axis included).
    pub x: f32,
    pub time: i64,
    /// Sorted descending by value.
    pub items: Vec<TooltipItem>,
    pub event: Option<TooltipEvent>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum HoverState {
    #[default]
    Hidden,
    Shown(Tooltip),
}

impl HoverState {
    pub fn time(&self) -> Option<i64> {
        match self {
            HoverState::Hidden => None,
            HoverState::Shown(tip) => Some(tip.time),
        }
    }

    pub fn is_shown(&self) -> bool {
        matches!(self, HoverState::Shown(_))
    }
}

/// Widths that drive tooltip placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipLayout {
    pub price_scale_width: f32,
    pub time_scale_width: f32,
    pub tooltip_width: f32,
}

impl TooltipLayout {
    /// Centres the tooltip on the pointer, then keeps it inside the plot.
    /// `pointer_x` is relative to the plot's left edge.
    pub fn left(&self, pointer_x: f32) -> f32 {
        let mut left = pointer_x + self.price_scale_width - self.tooltip_width / 2.0;
        left = left.min(self.price_scale_width + self.time_scale_width - self.tooltip_width);
        left.max(self.price_scale_width)
    }
}

pub struct HoverInput {
    /// Absolute pointer position, `None` when the pointer left the chart.
    pub pointer: Option<(f32, f32)>,
    /// Axis time under the pointer.
    pub time: Option<i64>,
}

pub struct HoverContext<'a> {
    pub bounds: PlotBounds,
    pub layout: TooltipLayout,
    pub datasets: &'a [Dataset],
    pub events: &'a [ImpactfulEvent],
    pub tz: UtcOffset,
}

pub fn resolve_hover(input: HoverInput, ctx: &HoverContext<'_>) -> HoverState {
    let (Some((px, py)), Some(time)) = (input.pointer, input.time) else {
        return HoverState::Hidden;
    };
    if !ctx.bounds.contains(px, py) {
        return HoverState::Hidden;
    }

    let mut items: Vec<TooltipItem> = ctx
        .datasets
        .iter()
        .filter_map(|ds| {
            ds.value_at(time).map(|value| TooltipItem {
                label: ds.title.clone(),
                value,
                color: ds.color,
            })
        })
        .collect();
    items.sort_by(|a, b| b.value.total_cmp(&a.value));

    let event = if items.is_empty() {
        None
    } else {
        event_on_day(ctx.events, time, ctx.tz)
    };

    HoverState::Shown(Tooltip {
        x: ctx.layout.left(px - ctx.bounds.x),
        time,
        items,
        event,
    })
}

/// First impactful event whose `dd/mm/yy` matches the hovered time.
pub fn event_on_day(events: &[ImpactfulEvent], time: i64, tz: UtcOffset) -> Option<TooltipEvent> {
    let hovered = format_tooltip_date(time, tz)?;
    events
        .iter()
        .find(|event| {
            event_timestamp(&event.date, tz)
                .ok()
                .and_then(|t| format_tooltip_date(t, tz))
                .is_some_and(|d| d == hovered)
        })
        .map(|event| TooltipEvent {
            title: match event.title() {
                Some("") => None,
                Some(title) => Some(title.to_string()),
                None => Some(UNKNOWN_EVENT_TITLE.to_string()),
            },
            image: event.image.clone().filter(|s| !s.is_empty()),
        })
}

/// Probability as a whole percentage, `0.524` -> `52%`.
pub fn format_percent(value: f64) -> String {
    format!("{}%", (value * 100.0).round() as i64)
}
