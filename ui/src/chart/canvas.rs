use gpui::{
    BorderStyle, Bounds, Canvas, PathBuilder, Window, canvas, point, px, quad, rgb, rgba, size,
    transparent_black,
};
use odds_core::viewport::bar_center;
use odds_core::{ChartData, MarkerPosition, MarkerShape};

/// Base marker radius in px, scaled by the marker's size.
const MARKER_RADIUS: f32 = 4.0;
pub(super) const LABEL_WIDTH: f32 = 120.0;
const LABEL_HEIGHT: f32 = 14.0;

#[derive(Clone)]
pub(super) struct MarkerPaint {
    pub idx: usize,
    pub value: f64,
    pub shape: MarkerShape,
    pub position: MarkerPosition,
    pub size: f32,
    pub text: Option<String>,
}

/// A marker label, placed in plot-local px.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct MarkerLabel {
    pub left: f32,
    pub top: f32,
    pub text: String,
    pub color: u32,
}

#[derive(Clone)]
pub(super) struct SeriesPaint {
    pub color: u32,
    /// (visible-local bar index, value)
    pub points: Vec<(usize, f64)>,
    pub markers: Vec<MarkerPaint>,
}

/// Builds per-series paint lists for the bars in `[start, end)`.
pub(super) fn visible_series(data: &ChartData, start: usize, end: usize) -> Vec<SeriesPaint> {
    let times = &data.axis.times()[start..end];
    let (Some(&first), Some(&last)) = (times.first(), times.last()) else {
        return Vec::new();
    };
    let local = |time: i64| times.binary_search(&time).ok();

    data.datasets
        .iter()
        .map(|ds| {
            let points = ds
                .points
                .iter()
                .filter(|p| p.time >= first && p.time <= last)
                .filter_map(|p| local(p.time).map(|idx| (idx, p.value)))
                .collect();
            let markers = data
                .markers
                .markers_for(&ds.title)
                .iter()
                .filter_map(|m| {
                    Some(MarkerPaint {
                        idx: local(m.time)?,
                        value: ds.value_at(m.time)?,
                        shape: m.shape,
                        position: m.position,
                        size: m.size.unwrap_or(1.0),
                        text: m.text.clone(),
                    })
                })
                .collect();
            SeriesPaint {
                color: ds.color.hex(),
                points,
                markers,
            }
        })
        .collect()
}

pub(super) fn line_canvas(
    series: Vec<SeriesPaint>,
    bar_count: usize,
    value_min: f64,
    value_max: f64,
    line_width: f32,
    hover_local: Option<usize>,
) -> Canvas<Vec<SeriesPaint>> {
    canvas(
        move |_, _, _| series.clone(),
        move |bounds, series, window, _| {
            window.paint_quad(quad(
                bounds,
                px(0.),
                rgb(0x0b1220),
                px(0.),
                transparent_black(),
                BorderStyle::default(),
            ));

            let width = f32::from(bounds.size.width);
            let height = f32::from(bounds.size.height);
            let ox = f32::from(bounds.origin.x);
            let oy = f32::from(bounds.origin.y);
            if bar_count == 0 || height <= 0.0 || width <= 0.0 {
                return;
            }

            let value_to_y = |value: f64| oy + value_y(value, value_min, value_max, height);
            let idx_to_x = |idx: usize| ox + bar_center(idx, width, bar_count);

            // gridlines (min/mid/max)
            for frac in [0.0f32, 0.5, 1.0] {
                let y = oy + height * (1.0 - frac);
                let mut builder = PathBuilder::stroke(px(1.));
                builder.move_to(point(px(ox), px(y)));
                builder.line_to(point(px(ox + width), px(y)));
                if let Ok(path) = builder.build() {
                    window.paint_path(path, rgb(0x1f2937));
                }
            }

            if let Some(local_idx) = hover_local {
                let x = idx_to_x(local_idx);
                let mut builder = PathBuilder::stroke(px(2.));
                builder.move_to(point(px(x), px(oy)));
                builder.line_to(point(px(x), px(oy + height)));
                if let Ok(path) = builder.build() {
                    window.paint_path(path, rgba(0x9ca3af40));
                }
            }

            for s in &series {
                if s.points.len() >= 2 {
                    let mut builder = PathBuilder::stroke(px(line_width));
                    let (first_idx, first_value) = s.points[0];
                    builder.move_to(point(px(idx_to_x(first_idx)), px(value_to_y(first_value))));
                    for &(idx, value) in &s.points[1..] {
                        builder.line_to(point(px(idx_to_x(idx)), px(value_to_y(value))));
                    }
                    if let Ok(path) = builder.build() {
                        window.paint_path(path, rgb(s.color));
                    }
                }

                for m in &s.markers {
                    paint_marker(window, m, idx_to_x(m.idx), value_to_y(m.value), s.color);
                }
            }
        },
    )
}

/// Plot-local y of `value` in a plot `height` px tall.
fn value_y(value: f64, value_min: f64, value_max: f64, height: f32) -> f32 {
    let range = (value_max - value_min).max(1e-9);
    let normalized = ((value - value_min) / range).clamp(0.0, 1.0);
    (1.0 - normalized as f32) * height
}

/// Marker centre y for a point drawn at `y`.
fn marker_y(position: MarkerPosition, y: f32, r: f32) -> f32 {
    match position {
        MarkerPosition::InBar => y,
        MarkerPosition::AboveBar => y - r * 2.0,
        MarkerPosition::BelowBar => y + r * 2.0,
    }
}

/// Labels for every marker carrying text. Below-bar labels hang under the
/// marker, the rest sit above it.
pub(super) fn marker_labels(
    series: &[SeriesPaint],
    bar_count: usize,
    value_min: f64,
    value_max: f64,
    width: f32,
    height: f32,
) -> Vec<MarkerLabel> {
    if bar_count == 0 || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }
    let mut labels = Vec::new();
    for s in series {
        for m in &s.markers {
            let Some(text) = &m.text else {
                continue;
            };
            let r = MARKER_RADIUS * m.size;
            let x = bar_center(m.idx, width, bar_count);
            let y = marker_y(m.position, value_y(m.value, value_min, value_max, height), r);
            let top = match m.position {
                MarkerPosition::BelowBar => y + r + 2.0,
                _ => y - r - 2.0 - LABEL_HEIGHT,
            };
            labels.push(MarkerLabel {
                left: x - LABEL_WIDTH / 2.0,
                top,
                text: text.clone(),
                color: s.color,
            });
        }
    }
    labels
}

fn paint_marker(window: &mut Window, marker: &MarkerPaint, x: f32, y: f32, color: u32) {
    let r = MARKER_RADIUS * marker.size;
    let y = marker_y(marker.position, y, r);

    match marker.shape {
        MarkerShape::Circle | MarkerShape::Square => {
            let corner = if marker.shape == MarkerShape::Circle { r } else { 0.0 };
            let marker_bounds = Bounds {
                origin: point(px(x - r), px(y - r)),
                size: size(px(r * 2.0), px(r * 2.0)),
            };
            window.paint_quad(quad(
                marker_bounds,
                px(corner),
                rgb(color),
                px(1.),
                rgb(0x0b1220),
                BorderStyle::default(),
            ));
        }
        MarkerShape::ArrowUp | MarkerShape::ArrowDown => {
            let tip = if marker.shape == MarkerShape::ArrowUp { -r } else { r };
            let mut builder = PathBuilder::fill();
            builder.move_to(point(px(x), px(y + tip)));
            builder.line_to(point(px(x - r), px(y - tip)));
            builder.line_to(point(px(x + r), px(y - tip)));
            builder.close();
            if let Ok(path) = builder.build() {
                window.paint_path(path, rgb(color));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odds_core::{Dataset, ImpactfulEvent, MarkerStyle, Rgb, SeriesPoint};
    use time::UtcOffset;

    const DAY: i64 = 86_400;

    fn data() -> ChartData {
        let trump = Dataset::new(
            "Trump",
            Rgb(0xea6555),
            (0..5)
                .map(|d| SeriesPoint {
                    time: d * DAY,
                    value: 0.5,
                })
                .collect(),
        );
        let harris = Dataset::new(
            "Harris",
            Rgb(0x356ef8),
            vec![SeriesPoint {
                time: 3 * DAY,
                value: 0.4,
            }],
        );
        let events = vec![ImpactfulEvent {
            date: "1970-01-04".into(),
            event: "[Convention]".into(),
            impact_on: "Trump".into(),
            image: None,
        }];
        ChartData::new(vec![trump, harris], events, Vec::new(), UtcOffset::UTC)
    }

    #[test]
    fn visible_series_uses_local_indices() {
        let paints = visible_series(&data(), 2, 5);
        assert_eq!(paints.len(), 2);
        assert_eq!(paints[0].points, vec![(0, 0.5), (1, 0.5), (2, 0.5)]);
        assert_eq!(paints[0].markers.len(), 1);
        assert_eq!(paints[0].markers[0].idx, 1);
        assert_eq!(paints[1].points, vec![(1, 0.4)]);
    }

    #[test]
    fn markers_outside_window_are_dropped() {
        let paints = visible_series(&data(), 0, 2);
        assert!(paints[0].markers.is_empty());
        assert!(paints[1].points.is_empty());
        assert!(visible_series(&ChartData::default(), 0, 0).is_empty());
    }

    #[test]
    fn labels_follow_marker_position() {
        let style = MarkerStyle {
            position: MarkerPosition::BelowBar,
            labels: true,
            ..MarkerStyle::default()
        };
        let base = data();
        let styled = ChartData::with_marker_style(
            base.datasets.clone(),
            base.events.clone(),
            Vec::new(),
            UtcOffset::UTC,
            &style,
        );
        let paints = visible_series(&styled, 0, 5);
        assert_eq!(paints[0].markers[0].text.as_deref(), Some("Convention"));

        // five bars over 500px, value 0.5 in [0, 1] over 200px
        let labels = marker_labels(&paints, 5, 0.0, 1.0, 500.0, 200.0);
        let r = MARKER_RADIUS * 1.5;
        assert_eq!(
            labels,
            vec![MarkerLabel {
                left: 350.0 - LABEL_WIDTH / 2.0,
                top: 100.0 + r * 2.0 + r + 2.0,
                text: "Convention".into(),
                color: 0xea6555,
            }]
        );

        assert!(marker_labels(&visible_series(&base, 0, 5), 5, 0.0, 1.0, 500.0, 200.0).is_empty());
        assert!(marker_labels(&paints, 0, 0.0, 1.0, 500.0, 200.0).is_empty());
    }
}
