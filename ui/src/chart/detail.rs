use gpui::{Div, SharedString, div, prelude::*, px, rgb};
use gpui_component::scroll::ScrollableElement;
use odds_core::NewsEvent;

/// News list shown under the chart after a click on a day.
pub(super) fn news_panel(items: &[NewsEvent]) -> Div {
    let mut list = div()
        .flex()
        .flex_col()
        .gap_3()
        .p_3()
        .max_h(px(240.))
        .debug_selector(|| "news-list".to_string());

    if items.is_empty() {
        list = list.child(
            div()
                .text_sm()
                .text_color(rgb(0x9ca3af))
                .child("Click a day on the chart to list its headlines."),
        );
    }

    for item in items {
        let mut headlines = div().flex().flex_col().gap_1().pl_3();
        for headline in &item.main_events {
            headlines = headlines.child(
                div()
                    .text_sm()
                    .text_color(rgb(0xe5e7eb))
                    .child(SharedString::from(format!("• {headline}"))),
            );
        }
        list = list.child(
            div()
                .flex()
                .flex_col()
                .gap_1()
                .child(
                    div()
                        .text_sm()
                        .text_color(gpui::white())
                        .child(SharedString::from(item.date.clone())),
                )
                .child(headlines),
        );
    }

    div()
        .flex()
        .flex_col()
        .w_full()
        .bg(rgb(0x0f172a))
        .border_t_1()
        .border_color(rgb(0x1f2937))
        .child(list.overflow_y_scrollbar())
}
