use crate::components::google_calendar::models::CalendarEvent;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MEET_URL: Regex =
        Regex::new(r"https://meet\.google\.com/[a-z-]+").expect("Invalid meet URL pattern");
}

/// Extract a Google Meet URL from an event.
///
/// Structured conference data is authoritative when present; the
/// description scan is a fallback for events where the link was only
/// pasted into the notes.
pub fn extract_meet_url(event: &CalendarEvent) -> Option<String> {
    if let Some(conference) = &event.conference_data {
        if let Some(video) = conference
            .entry_points
            .iter()
            .find(|ep| ep.entry_point_type == "video")
        {
            return video.uri.clone();
        }
    }

    let description = event.description.as_deref().unwrap_or("");
    MEET_URL
        .find(description)
        .map(|m| m.as_str().to_string())
}
