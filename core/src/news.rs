use time::UtcOffset;
use tracing::debug;

use crate::NewsEvent;
use crate::dates::format_calendar_date;

/// News items whose `date` equals the calendar day of `time`.
pub fn news_for_day(news: &[NewsEvent], time: i64, tz: UtcOffset) -> Vec<NewsEvent> {
    let Some(day) = format_calendar_date(time, tz) else {
        return Vec::new();
    };
    news.iter().filter(|item| item.date == day).cloned().collect()
}

/// The list shown under the chart after a click.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailPanel {
    items: Vec<NewsEvent>,
}

impl DetailPanel {
    pub fn items(&self) -> &[NewsEvent] {
        &self.items
    }

    /// Replaces the list with the hovered day's news. Returns `false` and
    /// leaves the list alone when nothing is hovered.
    pub fn on_click(&mut self, hovered: Option<i64>, news: &[NewsEvent], tz: UtcOffset) -> bool {
        let Some(time) = hovered else {
            return false;
        };
        self.items = news_for_day(news, time, tz);
        debug!(time, matches = self.items.len(), "detail panel updated");
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
