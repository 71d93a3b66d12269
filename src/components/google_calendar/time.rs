use super::models::CalendarEvent;
use crate::error::{google_calendar_error, BotResult};
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use chrono_tz::Tz;

/// Get event start time as a timezone-aware DateTime.
///
/// All-day events carry a date with no time component and resolve to
/// `None` — they have no meeting instant to compare against.
pub fn event_start(event: &CalendarEvent) -> BotResult<Option<DateTime<FixedOffset>>> {
    if let Some(start_time) = &event.start_date_time {
        let dt = DateTime::parse_from_rfc3339(start_time)
            .map_err(|e| google_calendar_error(&format!("Failed to parse datetime: {}", e)))?;
        Ok(Some(dt))
    } else {
        Ok(None)
    }
}

/// Compute the `[start-of-day, start-of-day + 24h)` bounds of "today"
/// in the given timezone
pub fn day_bounds(tz: Tz, now: DateTime<Utc>) -> BotResult<(DateTime<Tz>, DateTime<Tz>)> {
    let local_now = now.with_timezone(&tz);
    let midnight = local_now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| google_calendar_error("Failed to create datetime"))?;

    let start = match tz.from_local_datetime(&midnight) {
        chrono::LocalResult::Single(dt) => dt,
        // DST transitions at midnight; take the earlier reading
        chrono::LocalResult::Ambiguous(dt, _) => dt,
        chrono::LocalResult::None => {
            return Err(google_calendar_error("Invalid local time"));
        }
    };

    Ok((start, start + Duration::hours(24)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_start_with_datetime() {
        let event = CalendarEvent {
            id: "e1".to_string(),
            start_date_time: Some("2024-01-01T10:00:00+02:00".to_string()),
            ..Default::default()
        };
        let start = event_start(&event).unwrap().unwrap();
        assert_eq!(start.to_rfc3339(), "2024-01-01T10:00:00+02:00");
    }

    #[test]
    fn test_event_start_all_day() {
        let event = CalendarEvent {
            id: "e2".to_string(),
            start_date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        assert!(event_start(&event).unwrap().is_none());
    }

    #[test]
    fn test_event_start_invalid() {
        let event = CalendarEvent {
            id: "e3".to_string(),
            start_date_time: Some("not a timestamp".to_string()),
            ..Default::default()
        };
        assert!(event_start(&event).is_err());
    }

    #[test]
    fn test_day_bounds_utc() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 15, 30, 0).unwrap();
        let (start, end) = day_bounds(chrono_tz::UTC, now).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2024-01-02T00:00:00+00:00");
    }

    #[test]
    fn test_day_bounds_offset_timezone() {
        // 23:30 UTC on Jan 1 is already Jan 2 in Helsinki
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        let (start, end) = day_bounds(chrono_tz::Europe::Helsinki, now).unwrap();
        assert_eq!(start.to_rfc3339(), "2024-01-02T00:00:00+02:00");
        assert_eq!(end.to_rfc3339(), "2024-01-03T00:00:00+02:00");
    }
}
