//! Calendar parsing and formatting shared by the aligner, the tooltip and the
//! news lookup. Series timestamps and event dates only meet through these
//! day-granularity strings.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::DateError;

/// Epoch seconds for an event date.
///
/// A bare `YYYY-MM-DD` is midnight UTC. RFC 3339 strings carry their own
/// offset. Date-times without an offset are read in the display offset `tz`.
pub fn event_timestamp(raw: &str, tz: UtcOffset) -> Result<i64, DateError> {
    let trimmed = raw.trim();
    let unparseable = || DateError::Unparseable(raw.to_string());

    if let Ok(date) = Date::parse(trimmed, format_description!("[year]-[month]-[day]")) {
        return Ok(date.midnight().assume_utc().unix_timestamp());
    }
    if let Ok(dt) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(dt.unix_timestamp());
    }

    let normalized = trimmed.replacen('T', " ", 1);
    PrimitiveDateTime::parse(
        &normalized,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            &normalized,
            format_description!("[year]-[month]-[day] [hour]:[minute]"),
        )
    })
    .map(|dt| dt.assume_offset(tz).unix_timestamp())
    .map_err(|_| unparseable())
}

fn at_offset(time: i64, tz: UtcOffset) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(time)
        .ok()
        .map(|dt| dt.to_offset(tz))
}

/// `YYYY-MM-DD`, the key used by the news dataset.
pub fn format_calendar_date(time: i64, tz: UtcOffset) -> Option<String> {
    at_offset(time, tz)?
        .format(format_description!("[year]-[month]-[day]"))
        .ok()
}

/// `dd/mm/yy`, shown in the tooltip and used to match impactful events.
pub fn format_tooltip_date(time: i64, tz: UtcOffset) -> Option<String> {
    at_offset(time, tz)?
        .format(format_description!("[day]/[month]/[year repr:last_two]"))
        .ok()
}

/// Short axis label (`Jun 13 '24`).
pub fn format_axis_date(time: i64, tz: UtcOffset) -> Option<String> {
    at_offset(time, tz)?
        .format(format_description!(
            "[month repr:short] [day] '[year repr:last_two]"
        ))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::offset;

    #[test]
    fn date_only_is_utc_midnight() {
        assert_eq!(
            event_timestamp("2024-06-13", offset!(+8)).unwrap(),
            1_718_236_800
        );
    }

    #[test]
    fn naive_datetime_uses_display_offset() {
        let utc = event_timestamp("2024-06-13 08:00", UtcOffset::UTC).unwrap();
        let plus8 = event_timestamp("2024-06-13T08:00:00", offset!(+8)).unwrap();
        assert_eq!(utc - plus8, 8 * 3600);
        assert_eq!(
            event_timestamp("2024-06-13T08:00:00Z", offset!(+8)).unwrap(),
            utc
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            event_timestamp("June 13th", UtcOffset::UTC),
            Err(DateError::Unparseable("June 13th".into()))
        );
    }

    #[test]
    fn formats_day_granularity_strings() {
        let ts = 1_718_236_800;
        assert_eq!(
            format_calendar_date(ts, UtcOffset::UTC).as_deref(),
            Some("2024-06-13")
        );
        assert_eq!(
            format_tooltip_date(ts, UtcOffset::UTC).as_deref(),
            Some("13/06/24")
        );
        assert_eq!(
            format_calendar_date(ts, offset!(-5)).as_deref(),
            Some("2024-06-12")
        );
        assert_eq!(
            format_axis_date(ts, UtcOffset::UTC).as_deref(),
            Some("Jun 13 '24")
        );
    }
}
