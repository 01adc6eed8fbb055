use gpui::{
    Bounds, Context, DispatchPhase, MouseButton, MouseDownEvent, MouseExitEvent, MouseMoveEvent,
    MouseUpEvent, Pixels, Render, ScrollWheelEvent, SharedString, Window, canvas, div, prelude::*,
    px, rgb,
};
use odds_core::dates::format_axis_date;
use odds_core::hover::format_percent;

use super::super::canvas::{LABEL_WIDTH, line_canvas, marker_labels, visible_series};
use super::super::detail::news_panel;
use super::super::header::{LegendEntry, chart_header};
use super::{ChartView, PRICE_AXIS_WIDTH};

impl Render for ChartView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let (start, end) = self.visible_range();
        let bar_count = end - start;
        let (value_min, value_max) = (self.value_min, self.value_max);
        let range_text = SharedString::from(format!(
            "{} - {}",
            format_percent(value_min.max(0.0)),
            format_percent(value_max.min(1.0))
        ));
        let tooltip = self.tooltip_overlay();

        let value_labels = [
            format_percent(value_max.min(1.0)),
            format_percent(((value_min + value_max) * 0.5).clamp(0.0, 1.0)),
            format_percent(value_min.max(0.0)),
        ];

        let tz = self.data.tz;
        let axis_label = |idx: usize| {
            self.data
                .axis
                .get(idx)
                .and_then(|t| format_axis_date(t, tz))
                .unwrap_or_else(|| "---".into())
        };
        let start_label = axis_label(start);
        let mid_label = axis_label(start + bar_count.saturating_sub(1) / 2);
        let end_label = axis_label(end.saturating_sub(1));

        let legend = self
            .data
            .datasets
            .iter()
            .map(|ds| LegendEntry {
                title: ds.title.clone(),
                color: ds.color.hex(),
                latest: ds.points.last().map(|p| format_percent(p.value)),
            })
            .collect();

        let hover_local = self
            .hover
            .time()
            .and_then(|t| self.data.axis.index_of(t))
            .filter(|idx| (start..end).contains(idx))
            .map(|idx| idx - start);
        let series = visible_series(&self.data, start, end);
        let labels = self
            .chart_bounds
            .map(|b| {
                marker_labels(
                    &series,
                    bar_count,
                    value_min,
                    value_max,
                    f32::from(b.size.width),
                    f32::from(b.size.height),
                )
            })
            .unwrap_or_default();

        let track_chart_bounds =
            cx.processor(|this: &mut Self, bounds: Vec<Bounds<Pixels>>, _, _| {
                if let Some(canvas_bounds) = bounds.first() {
                    this.chart_bounds = Some(*canvas_bounds);
                }
            });

        let handle_scroll = cx.listener(|this: &mut Self, event: &ScrollWheelEvent, window, _| {
            this.handle_scroll(event, window);
        });

        let handle_mouse_down =
            cx.listener(|this: &mut Self, event: &MouseDownEvent, window, _| {
                this.handle_mouse_down(event, window);
            });

        let handle_mouse_up = cx.listener(|this: &mut Self, event: &MouseUpEvent, window, _| {
            this.handle_mouse_up(event, window);
        });

        let handle_mouse_move =
            cx.listener(|this: &mut Self, event: &MouseMoveEvent, window, _| {
                this.handle_hover(event);
                this.handle_drag(event, window);
            });

        let clear_hover = cx.listener(|this: &mut Self, event: &MouseMoveEvent, window, _| {
            let (x, y) = (f32::from(event.position.x), f32::from(event.position.y));
            let outside = this.plot_bounds().is_none_or(|b| !b.contains(x, y));
            if outside && this.hover.is_shown() {
                this.clear_hover();
                window.refresh();
            }
        });

        let leave_plot = cx.listener(|this: &mut Self, hovered: &bool, window, _| {
            if !*hovered && this.hover.is_shown() {
                this.clear_hover();
                window.refresh();
            }
        });

        // Leaving the window sends no move event, so watch for the exit itself.
        let view = cx.entity().downgrade();
        let exit_watch = canvas(
            |_, _, _| {},
            move |_, _, window, _| {
                window.on_mouse_event(move |_: &MouseExitEvent, phase, window, cx| {
                    if phase != DispatchPhase::Bubble {
                        return;
                    }
                    if view.update(cx, |this, _| this.handle_pointer_exit()).unwrap_or(false) {
                        window.refresh();
                    }
                });
            },
        )
        .absolute()
        .size_full();

        let chart = line_canvas(
            series,
            bar_count,
            value_min,
            value_max,
            self.options.line_width,
            hover_local,
        )
        .flex_1()
        .w_full()
        .h_full();

        let mut canvas_region = div()
            .flex_1()
            .w_full()
            .h_full()
            .relative()
            .on_children_prepainted(track_chart_bounds)
            .child(chart);
        for label in labels {
            canvas_region = canvas_region.child(
                div()
                    .absolute()
                    .left(px(label.left))
                    .top(px(label.top))
                    .w(px(LABEL_WIDTH))
                    .text_center()
                    .text_xs()
                    .text_color(rgb(label.color))
                    .child(label.text),
            );
        }
        let canvas_region = canvas_region.id("chart-canvas").on_hover(leave_plot);

        let price_axis = div()
            .w(px(PRICE_AXIS_WIDTH))
            .h_full()
            .flex()
            .flex_col()
            .justify_between()
            .items_end()
            .px_2()
            .bg(rgb(0x0f172a))
            .border_r_1()
            .border_color(rgb(0x1f2937))
            .text_xs()
            .text_color(rgb(0x9ca3af))
            .child(value_labels[0].clone())
            .child(value_labels[1].clone())
            .child(value_labels[2].clone());

        let mut chart_row = div()
            .flex()
            .w_full()
            .h(px(self.options.chart_height))
            .relative()
            .on_mouse_down(MouseButton::Left, handle_mouse_down)
            .on_mouse_move(handle_mouse_move)
            .on_mouse_up(MouseButton::Left, handle_mouse_up)
            .on_scroll_wheel(handle_scroll)
            .debug_selector(|| "chart-plot".to_string())
            .child(price_axis)
            .child(canvas_region);
        if let Some(tip) = tooltip {
            chart_row = chart_row.child(tip);
        }

        let time_axis = div()
            .h(px(28.))
            .pl(px(PRICE_AXIS_WIDTH))
            .pr_3()
            .flex()
            .items_center()
            .justify_between()
            .text_xs()
            .text_color(rgb(0x9ca3af))
            .bg(rgb(0x0f172a))
            .border_t_1()
            .border_color(rgb(0x1f2937))
            .child(start_label)
            .child(mid_label)
            .child(end_label);

        div()
            .flex()
            .flex_col()
            .w_full()
            .h_full()
            .bg(rgb(0x0b1220))
            .text_color(gpui::white())
            .relative()
            .on_mouse_move(clear_hover)
            .child(exit_watch)
            .child(chart_header(
                &self.source,
                legend,
                self.data.axis.len(),
                range_text,
            ))
            .child(chart_row)
            .child(time_axis)
            .child(news_panel(self.detail.items()))
    }
}

#[cfg(test)]
mod tests {
    use gpui::{Modifiers, TestAppContext, point, px, size};
    use odds_core::{ChartData, Dataset, HoverState, NewsEvent, Rgb, SeriesPoint, Viewport};
    use time::UtcOffset;

    use super::*;
    use crate::{ChartMeta, ChartOptions};

    const DAY: i64 = 1_718_236_800;

    fn sample_view() -> ChartView {
        let trump = Dataset::new(
            "Trump",
            Rgb(0xea6555),
            vec![
                SeriesPoint { time: DAY, value: 0.52 },
                SeriesPoint {
                    time: DAY + 86_400,
                    value: 0.55,
                },
            ],
        );
        let news = vec![NewsEvent {
            date: "2024-06-13".into(),
            main_events: vec!["Poll released".into()],
        }];
        ChartView::new(
            ChartData::new(vec![trump], Vec::new(), news, UtcOffset::UTC),
            ChartMeta {
                source: "test".to_string(),
            },
            ChartOptions::default(),
        )
    }

    #[gpui::test]
    async fn click_without_hover_leaves_news_empty(cx: &TestAppContext) {
        let mut cx = cx.clone();
        cx.update(gpui_component::theme::init);
        let (chart, cx) = cx.add_window_view(|_, _| sample_view());
        cx.refresh().expect("refresh");
        cx.run_until_parked();
        let plot = cx.debug_bounds("chart-plot").expect("chart-plot bounds");

        chart.update(cx, |chart, _| chart.clear_hover());
        cx.simulate_click(plot.center(), Modifiers::none());

        let items = chart.update(cx, |chart, _| chart.detail.items().len());
        assert_eq!(items, 0);
    }

    #[gpui::test]
    async fn click_on_hovered_day_lists_its_news(cx: &TestAppContext) {
        let mut cx = cx.clone();
        cx.update(gpui_component::theme::init);
        let (chart, cx) = cx.add_window_view(|_, _| sample_view());
        cx.refresh().expect("refresh");
        cx.run_until_parked();
        let plot = cx.debug_bounds("chart-plot").expect("chart-plot bounds");
        let first_bar = point(plot.origin.x + px(PRICE_AXIS_WIDTH + 4.0), plot.center().y);

        let hovered = chart.update(cx, |chart, _| {
            chart.hover_at(f32::from(first_bar.x), f32::from(first_bar.y));
            chart.hover.time()
        });
        assert_eq!(hovered, Some(DAY));

        cx.simulate_click(first_bar, Modifiers::none());
        let dates: Vec<String> = chart.update(cx, |chart, _| {
            chart.detail.items().iter().map(|n| n.date.clone()).collect()
        });
        assert_eq!(dates, vec!["2024-06-13".to_string()]);
    }

    #[gpui::test]
    async fn hovering_off_the_plot_hides_the_tooltip(cx: &TestAppContext) {
        let mut cx = cx.clone();
        cx.update(gpui_component::theme::init);
        let (chart, cx) = cx.add_window_view(|_, _| sample_view());
        cx.refresh().expect("refresh");
        cx.run_until_parked();
        let plot = cx.debug_bounds("chart-plot").expect("chart-plot bounds");
        let (cx_x, cx_y) = (f32::from(plot.center().x), f32::from(plot.center().y));
        let left_of_plot = f32::from(plot.origin.x) - 10.0;

        chart.update(cx, |chart, _| {
            chart.hover_at(cx_x, cx_y);
            assert!(chart.hover.is_shown());
            chart.hover_at(left_of_plot, cx_y);
            assert_eq!(chart.hover.time(), None);
        });
    }

    #[gpui::test]
    async fn leaving_the_window_hides_the_tooltip(cx: &TestAppContext) {
        let mut cx = cx.clone();
        cx.update(gpui_component::theme::init);
        let (chart, cx) = cx.add_window_view(|_, _| sample_view());
        cx.refresh().expect("refresh");
        cx.run_until_parked();
        let plot = cx.debug_bounds("chart-plot").expect("chart-plot bounds");
        let center = plot.center();

        chart.update(cx, |chart, _| {
            chart.hover_at(f32::from(center.x), f32::from(center.y));
            assert!(chart.hover.is_shown());
        });
        cx.simulate_event(MouseExitEvent {
            position: center,
            pressed_button: None,
            modifiers: Modifiers::none(),
        });

        let time = chart.update(cx, |chart, _| chart.hover.time());
        assert_eq!(time, None);
    }

    #[test]
    fn set_data_resets_viewport_hover_and_news() {
        let mut chart = sample_view();
        chart.chart_bounds = Some(Bounds {
            origin: point(px(100.), px(50.)),
            size: size(px(400.), px(300.)),
        });

        chart.viewport.zoom_by(-1.0, chart.data.axis.len());
        chart.hover_at(101.0, 60.0);
        assert_eq!(chart.hover.time(), Some(DAY));
        assert!(chart.click());
        assert_eq!(chart.detail.items().len(), 1);
        assert_ne!(chart.viewport, Viewport::fit_content());

        let harris = Dataset::new(
            "Harris",
            Rgb(0x356ef8),
            vec![SeriesPoint {
                time: DAY + 86_400,
                value: 0.6,
            }],
        );
        chart.set_data(ChartData::new(vec![harris], Vec::new(), Vec::new(), UtcOffset::UTC));

        assert_eq!(chart.viewport, Viewport::fit_content());
        assert_eq!(chart.hover, HoverState::Hidden);
        assert!(chart.detail.items().is_empty());
        assert_eq!(chart.data.axis.len(), 1);
    }
}
