use super::extract::extract_meet_url;
use crate::components::google_calendar::models::CalendarEvent;
use crate::components::google_calendar::time::event_start;
use crate::error::BotResult;
use chrono::{DateTime, Duration, FixedOffset, Utc};

/// Width of the join window before a meeting starts, in seconds
pub const JOIN_WINDOW_SECS: i64 = 60;

/// What to do with one event at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinDecision {
    /// No join URL, all-day event, or the window has already passed
    Skip,
    /// Meeting is still in the future; time remaining until start
    Wait(Duration),
    /// Inside the join window; open this URL now
    Join(String),
}

/// Check whether `now` falls inside the join window of a meeting
/// starting at `start`: from 60 seconds before the start up to and
/// including the start instant itself.
pub fn is_time_to_join(start: DateTime<FixedOffset>, now: DateTime<Utc>) -> bool {
    let delta = now.signed_duration_since(start);
    delta >= Duration::seconds(-JOIN_WINDOW_SECS) && delta <= Duration::zero()
}

/// Evaluate one event against the current time.
///
/// Pure: takes the clock as an argument, touches no state.
pub fn evaluate(event: &CalendarEvent, now: DateTime<Utc>) -> BotResult<JoinDecision> {
    let url = match extract_meet_url(event) {
        Some(url) => url,
        None => return Ok(JoinDecision::Skip),
    };

    // All-day events carry no meeting time
    let start = match event_start(event)? {
        Some(start) => start,
        None => return Ok(JoinDecision::Skip),
    };

    if is_time_to_join(start, now) {
        return Ok(JoinDecision::Join(url));
    }

    let until_start = start.with_timezone(&Utc).signed_duration_since(now);
    if until_start > Duration::zero() {
        Ok(JoinDecision::Wait(until_start))
    } else {
        // Window already closed; the meeting stays missed for this run
        Ok(JoinDecision::Skip)
    }
}
