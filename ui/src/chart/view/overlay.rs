use gpui::{Div, FontWeight, SharedString, div, img, prelude::*, px, rgb, rgba};
use odds_core::HoverState;
use odds_core::dates::format_tooltip_date;
use odds_core::hover::format_percent;

use super::ChartView;

const TOOLTIP_TOP: f32 = 100.0;
const EVENT_IMAGE_WIDTH: f32 = 180.0;
const EVENT_IMAGE_HEIGHT: f32 = 100.0;

impl ChartView {
    /// Floating crosshair tooltip, positioned within the chart row.
    pub(super) fn tooltip_overlay(&self) -> Option<Div> {
        let HoverState::Shown(tip) = &self.hover else {
            return None;
        };

        let mut values = div().flex().flex_col().flex_1().gap_1();
        for item in &tip.items {
            values = values.child(
                div()
                    .flex()
                    .flex_col()
                    .child(
                        div()
                            .text_color(rgb(item.color.hex()))
                            .child(format!("⬤ {}", item.label)),
                    )
                    .child(div().text_base().child(format_percent(item.value))),
            );
        }

        let mut top_row = div()
            .flex()
            .justify_between()
            .items_center()
            .child(values);
        if let Some(image) = tip.event.as_ref().and_then(|e| e.image.clone()) {
            top_row = top_row.child(
                img(SharedString::from(image))
                    .w(px(EVENT_IMAGE_WIDTH))
                    .h(px(EVENT_IMAGE_HEIGHT))
                    .ml(px(10.)),
            );
        }

        let mut tooltip = div()
            .absolute()
            .left(px(tip.x))
            .top(px(TOOLTIP_TOP))
            .w(px(self.options.tooltip_width))
            .p_2()
            .rounded_md()
            .shadow_lg()
            .bg(rgba(0x111827e6))
            .border_1()
            .border_color(rgb(0x1f2937))
            .text_xs()
            .text_color(gpui::white())
            .flex()
            .flex_col()
            .child(top_row);

        if let Some(title) = tip.event.as_ref().and_then(|e| e.title.clone()) {
            tooltip = tooltip.child(
                div()
                    .mt(px(10.))
                    .font_weight(FontWeight::BOLD)
                    .child(title),
            );
        }

        let date = format_tooltip_date(tip.time, self.data.tz)
            .unwrap_or_else(|| tip.time.to_string());
        Some(tooltip.child(div().text_color(rgb(0x9ca3af)).child(date)))
    }
}
