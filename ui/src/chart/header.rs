use gpui::{SharedString, div, prelude::*, rgb};

/// Legend entry: series title, colour and latest value.
pub(super) struct LegendEntry {
    pub title: String,
    pub color: u32,
    pub latest: Option<String>,
}

pub(super) fn chart_header(
    source: &str,
    legend: Vec<LegendEntry>,
    point_count: usize,
    range_text: SharedString,
) -> impl IntoElement {
    let mut chips = div().flex().gap_3().items_center();
    for entry in legend {
        let label = match entry.latest {
            Some(latest) => format!("⬤ {} {latest}", entry.title),
            None => format!("⬤ {}", entry.title),
        };
        chips = chips.child(div().text_sm().text_color(rgb(entry.color)).child(label));
    }

    div()
        .flex()
        .justify_between()
        .items_center()
        .p_3()
        .bg(rgb(0x111827))
        .border_b_1()
        .border_color(rgb(0x1f2937))
        .child(
            div()
                .flex()
                .gap_4()
                .items_center()
                .child(div().text_sm().child(SharedString::from(source.to_string())))
                .child(chips),
        )
        .child(
            div()
                .flex()
                .gap_3()
                .text_sm()
                .child(format!("points: {point_count}"))
                .child(format!("range: {range_text}")),
        )
}
