use crate::Dataset;

/// Sorted union of every series timestamp. Bars are laid out evenly by index
/// along this axis, so gaps in time do not show up as gaps on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeAxis {
    times: Vec<i64>,
}

impl TimeAxis {
    pub fn from_datasets(datasets: &[Dataset]) -> Self {
        let mut times: Vec<i64> = datasets
            .iter()
            .flat_map(|ds| ds.points.iter().map(|p| p.time))
            .collect();
        times.sort_unstable();
        times.dedup();
        Self { times }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<i64> {
        self.times.get(idx).copied()
    }

    pub fn times(&self) -> &[i64] {
        &self.times
    }

    pub fn index_of(&self, time: i64) -> Option<usize> {
        self.times.binary_search(&time).ok()
    }
}

/// Zoom/pan state over a [`TimeAxis`]. `zoom == 1.0` shows everything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset: f32,
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::fit_content()
    }
}

impl Viewport {
    pub fn fit_content() -> Self {
        Self {
            offset: 0.0,
            zoom: 1.0,
        }
    }

    pub fn visible_len(&self, total: usize) -> f32 {
        if total == 0 {
            return 0.0;
        }
        let zoom = self.zoom.max(1.0).min(total as f32);
        (total as f32 / zoom).max(1.0)
    }

    pub fn clamp_offset(offset: f32, total: usize, visible_count: usize) -> f32 {
        if total == 0 {
            return 0.0;
        }
        let max_start = total.saturating_sub(visible_count);
        offset.clamp(0.0, max_start as f32)
    }

    /// Half-open index range `[start, end)` currently on screen.
    pub fn visible_range(&self, total: usize) -> (usize, usize) {
        if total == 0 {
            return (0, 0);
        }
        let visible = self.visible_len(total).round().max(1.0) as usize;
        let start = Self::clamp_offset(self.offset, total, visible).round() as usize;
        let end = (start + visible).min(total);
        (start, end)
    }

    /// Zooms around the centre of the visible window. Negative `scroll_y`
    /// zooms in.
    pub fn zoom_by(&mut self, scroll_y: f32, total: usize) {
        if total == 0 || scroll_y.abs() < f32::EPSILON {
            return;
        }
        let center = self.offset + self.visible_len(total) * 0.5;
        let factor = if scroll_y < 0.0 { 1.1 } else { 0.9 };
        self.zoom = (self.zoom * factor).clamp(1.0, total as f32);
        let new_visible = self.visible_len(total);
        let visible_count = new_visible.round().max(1.0) as usize;
        self.offset = Self::clamp_offset(center - new_visible * 0.5, total, visible_count);
    }

    /// Pans by a horizontal pointer delta over a plot `width` pixels wide.
    pub fn pan_by(&mut self, dx: f32, width: f32, total: usize) {
        let visible = self.visible_len(total);
        if visible <= 0.0 {
            return;
        }
        let bars_per_px = visible / width.max(1e-3);
        let visible_count = visible.round().max(1.0) as usize;
        self.offset = Self::clamp_offset(self.offset - dx * bars_per_px, total, visible_count);
    }
}

/// Bar width in pixels when `count` bars share `width`.
pub fn bar_width(width: f32, count: usize) -> f32 {
    (width / count.max(1) as f32).max(f32::EPSILON)
}

/// Maps a plot-local x to the bar under it, within `count` visible bars.
pub fn index_at(local_x: f32, width: f32, count: usize) -> Option<usize> {
    if count == 0 || width <= 0.0 || local_x < 0.0 || local_x > width {
        return None;
    }
    let idx = (local_x / bar_width(width, count)).floor() as usize;
    Some(idx.min(count - 1))
}

/// Centre x of bar `idx`, relative to the plot origin.
pub fn bar_center(idx: usize, width: f32, count: usize) -> f32 {
    let w = bar_width(width, count);
    idx as f32 * w + w * 0.5
}

/// Min/max value over `[start_time, end_time]` across all series, padded by 1%.
pub fn padded_value_bounds(datasets: &[Dataset], start_time: i64, end_time: i64) -> (f64, f64) {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for p in datasets
        .iter()
        .flat_map(|ds| ds.points.iter())
        .filter(|p| p.time >= start_time && p.time <= end_time)
    {
        min = min.min(p.value);
        max = max.max(p.value);
    }
    if min > max {
        return (0.0, 1.0);
    }
    if min == max {
        max = min + 0.01;
    }
    let pad = (max - min) * 0.01;
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rgb, SeriesPoint};

    fn ds(times: &[(i64, f64)]) -> Dataset {
        Dataset::new(
            "x",
            Rgb(0),
            times
                .iter()
                .map(|&(time, value)| SeriesPoint { time, value })
                .collect(),
        )
    }

    #[test]
    fn axis_is_sorted_union() {
        let axis = TimeAxis::from_datasets(&[ds(&[(1, 0.1), (3, 0.2)]), ds(&[(2, 0.5), (3, 0.4)])]);
        assert_eq!(axis.times(), &[1, 2, 3]);
        assert_eq!(axis.index_of(2), Some(1));
        assert_eq!(axis.index_of(4), None);
    }

    #[test]
    fn fit_content_shows_everything() {
        assert_eq!(Viewport::fit_content().visible_range(10), (0, 10));
        assert_eq!(Viewport::fit_content().visible_range(0), (0, 0));
    }

    #[test]
    fn zoom_and_pan_stay_in_bounds() {
        let mut vp = Viewport::fit_content();
        for _ in 0..10 {
            vp.zoom_by(-1.0, 100);
        }
        let (start, end) = vp.visible_range(100);
        assert!(end - start < 100);
        assert!(start > 0);

        vp.pan_by(10_000.0, 500.0, 100);
        assert_eq!(vp.visible_range(100).0, 0);
        vp.pan_by(-10_000.0, 500.0, 100);
        assert_eq!(vp.visible_range(100).1, 100);

        for _ in 0..50 {
            vp.zoom_by(1.0, 100);
        }
        assert_eq!(vp.visible_range(100), (0, 100));
    }

    #[test]
    fn index_at_maps_pixels_to_bars() {
        assert_eq!(index_at(0.0, 100.0, 4), Some(0));
        assert_eq!(index_at(26.0, 100.0, 4), Some(1));
        assert_eq!(index_at(100.0, 100.0, 4), Some(3));
        assert_eq!(index_at(101.0, 100.0, 4), None);
        assert_eq!(index_at(-1.0, 100.0, 4), None);
        assert_eq!(index_at(50.0, 100.0, 0), None);
        assert_eq!(bar_center(1, 100.0, 4), 37.5);
    }

    #[test]
    fn value_bounds_cover_window_only() {
        let data = [ds(&[(0, 0.1), (1, 0.5), (2, 0.9)])];
        let (lo, hi) = padded_value_bounds(&data, 0, 1);
        assert!(lo < 0.1 && lo > 0.09);
        assert!(hi > 0.5 && hi < 0.51);
        assert_eq!(padded_value_bounds(&data, 10, 20), (0.0, 1.0));
    }
}
