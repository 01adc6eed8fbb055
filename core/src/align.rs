use std::collections::BTreeMap;

use time::UtcOffset;
use tracing::debug;

use crate::dates::event_timestamp;
use crate::{Dataset, ImpactfulEvent, Marker, MarkerPosition, MarkerShape, SeriesPoint};

pub const EVENT_MARKER_SIZE: f32 = 1.5;

/// How event markers are drawn. The default is a 1.5x circle sitting on the
/// line with no label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub position: MarkerPosition,
    pub size: f32,
    /// Label each marker with its event title.
    pub labels: bool,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            shape: MarkerShape::Circle,
            position: MarkerPosition::InBar,
            size: EVENT_MARKER_SIZE,
            labels: false,
        }
    }
}

/// Point minimising `|time - target|`; the earliest wins a tie.
pub fn closest_point(points: &[SeriesPoint], target: i64) -> Option<&SeriesPoint> {
    let mut best: Option<&SeriesPoint> = None;
    for point in points {
        match best {
            Some(b) if point.time.abs_diff(target) >= b.time.abs_diff(target) => {}
            _ => best = Some(point),
        }
    }
    best
}

/// Markers derived from the impactful events, keyed by dataset title and
/// sorted ascending by time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerMap {
    by_title: BTreeMap<String, Vec<Marker>>,
}

impl MarkerMap {
    pub fn markers_for(&self, title: &str) -> &[Marker] {
        self.by_title.get(title).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_title.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn align_markers(
    events: &[ImpactfulEvent],
    datasets: &[Dataset],
    tz: UtcOffset,
) -> MarkerMap {
    align_markers_with(events, datasets, tz, &MarkerStyle::default())
}

pub fn align_markers_with(
    events: &[ImpactfulEvent],
    datasets: &[Dataset],
    tz: UtcOffset,
    style: &MarkerStyle,
) -> MarkerMap {
    let mut by_title: BTreeMap<String, Vec<Marker>> = BTreeMap::new();

    for event in events {
        let Some(dataset) = datasets.iter().find(|ds| ds.title == event.impact_on) else {
            debug!(impact_on = %event.impact_on, date = %event.date, "no dataset for event");
            continue;
        };
        let event_time = match event_timestamp(&event.date, tz) {
            Ok(t) => t,
            Err(err) => {
                debug!(%err, "skipping event");
                continue;
            }
        };
        let Some(point) = closest_point(&dataset.points, event_time) else {
            continue;
        };

        by_title
            .entry(dataset.title.clone())
            .or_default()
            .push(Marker {
                time: point.time,
                shape: style.shape,
                position: style.position,
                color: dataset.color,
                size: Some(style.size),
                text: style
                    .labels
                    .then(|| event.title())
                    .flatten()
                    .filter(|title| !title.is_empty())
                    .map(str::to_string),
            });
    }

    for markers in by_title.values_mut() {
        markers.sort_by_key(|m| m.time);
    }

    MarkerMap { by_title }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgb;

    fn pt(time: i64, value: f64) -> SeriesPoint {
        SeriesPoint { time, value }
    }

    fn event(date: &str, impact_on: &str) -> ImpactfulEvent {
        ImpactfulEvent {
            date: date.into(),
            event: "[Debate] night".into(),
            impact_on: impact_on.into(),
            image: None,
        }
    }

    #[test]
    fn closest_point_prefers_first_on_tie() {
        let points = [pt(0, 0.1), pt(10, 0.2), pt(20, 0.3)];
        assert_eq!(closest_point(&points, 5).unwrap().time, 0);
        assert_eq!(closest_point(&points, 16).unwrap().time, 20);
        assert_eq!(closest_point(&points, -100).unwrap().time, 0);
        assert!(closest_point(&[], 5).is_none());
    }

    #[test]
    fn event_on_series_day_lands_on_that_point() {
        let trump = Dataset::new(
            "Trump",
            Rgb(0xea6555),
            vec![pt(1_718_150_400, 0.5), pt(1_718_236_800, 0.52), pt(1_718_323_200, 0.55)],
        );
        let markers = align_markers(&[event("2024-06-13", "Trump")], &[trump], UtcOffset::UTC);

        let placed = markers.markers_for("Trump");
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].time, 1_718_236_800);
        assert_eq!(placed[0].color, Rgb(0xea6555));
        assert_eq!(placed[0].shape, MarkerShape::Circle);
        assert_eq!(placed[0].position, MarkerPosition::InBar);
    }

    #[test]
    fn unmatched_targets_and_bad_dates_are_skipped() {
        let harris = Dataset::new("Harris", Rgb(0x356ef8), vec![pt(0, 0.3)]);
        let markers = align_markers(
            &[event("2024-06-13", "Kennedy"), event("soon", "Harris")],
            &[harris],
            UtcOffset::UTC,
        );
        assert!(markers.is_empty());
        assert!(markers.markers_for("Harris").is_empty());
    }

    #[test]
    fn markers_are_sorted_and_datasets_untouched() {
        let day = 86_400;
        let points = vec![pt(0, 0.1), pt(day, 0.2), pt(2 * day, 0.3)];
        let biden = Dataset::new("Biden", Rgb(0xbdbdbd), points.clone());
        let events = [
            event("1970-01-03", "Biden"),
            event("1970-01-01", "Biden"),
            event("1970-01-02", "Biden"),
        ];

        let markers = align_markers(&events, std::slice::from_ref(&biden), UtcOffset::UTC);
        let times: Vec<i64> = markers.markers_for("Biden").iter().map(|m| m.time).collect();
        assert_eq!(times, vec![0, day, 2 * day]);
        assert_eq!(biden.points, points);
    }

    #[test]
    fn style_carries_shape_position_and_labels() {
        let trump = Dataset::new("Trump", Rgb(0xea6555), vec![pt(0, 0.5)]);
        let mut untitled = event("1970-01-01", "Trump");
        untitled.event = "[] clip".into();
        let style = MarkerStyle {
            shape: MarkerShape::ArrowDown,
            position: MarkerPosition::AboveBar,
            size: 2.0,
            labels: true,
        };

        let markers = align_markers_with(
            &[event("1970-01-01", "Trump"), untitled],
            &[trump],
            UtcOffset::UTC,
            &style,
        );
        let placed = markers.markers_for("Trump");
        assert_eq!(placed.len(), 2);
        assert!(placed.iter().all(|m| m.shape == MarkerShape::ArrowDown));
        assert!(placed.iter().all(|m| m.position == MarkerPosition::AboveBar));
        assert_eq!(placed[0].size, Some(2.0));
        assert_eq!(placed[0].text.as_deref(), Some("Debate"));
        assert_eq!(placed[1].text, None);

        let trump = Dataset::new("Trump", Rgb(0xea6555), vec![pt(0, 0.5)]);
        let plain = align_markers(&[event("1970-01-01", "Trump")], &[trump], UtcOffset::UTC);
        assert_eq!(plain.markers_for("Trump")[0].text, None);
    }
}
