use async_trait::async_trait;
use kokousbotti::components::google_calendar::models::{
    CalendarEvent, ConferenceData, EntryPoint,
};
use kokousbotti::components::joiner::{extract_meet_url, EventSource};
use kokousbotti::error::BotResult;

/// Mock implementation of the calendar fetch boundary for testing
#[derive(Debug, Clone, Default)]
pub struct MockEventSource {
    events: Vec<CalendarEvent>,
}

impl MockEventSource {
    /// Create a new mock source with predefined events
    pub fn new() -> Self {
        let events = vec![
            CalendarEvent {
                id: "event1".to_string(),
                summary: Some("Standup".to_string()),
                description: Some("Daily sync".to_string()),
                start_date_time: Some("2024-01-01T10:00:00+00:00".to_string()),
                end_date_time: Some("2024-01-01T10:15:00+00:00".to_string()),
                conference_data: Some(ConferenceData {
                    entry_points: vec![EntryPoint {
                        entry_point_type: "video".to_string(),
                        uri: Some("https://meet.x.com/abc-defg".to_string()),
                    }],
                }),
                ..Default::default()
            },
            CalendarEvent {
                id: "event2".to_string(),
                summary: Some("Planning".to_string()),
                description: Some("Join: https://meet.google.com/abc-defg-hij".to_string()),
                start_date_time: Some("2024-01-01T14:00:00+00:00".to_string()),
                end_date_time: Some("2024-01-01T15:00:00+00:00".to_string()),
                ..Default::default()
            },
        ];

        Self { events }
    }
}

#[async_trait]
impl EventSource for MockEventSource {
    async fn today_events(&self) -> BotResult<Vec<CalendarEvent>> {
        Ok(self.events.clone())
    }
}

/// Test that demonstrates how to use the mock
#[tokio::test]
async fn test_mock_event_source() {
    let source = MockEventSource::new();

    let events = source.today_events().await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "event1");
    assert_eq!(events[1].id, "event2");
}

/// Structured conference data wins over the description, regardless of
/// description content
#[tokio::test]
async fn test_extractor_prefers_conference_data() {
    let source = MockEventSource::new();
    let events = source.today_events().await.unwrap();

    let url = extract_meet_url(&events[0]);
    assert_eq!(url.as_deref(), Some("https://meet.x.com/abc-defg"));
}

/// Without conference data the first meet link in the description is used
#[tokio::test]
async fn test_extractor_falls_back_to_description() {
    let source = MockEventSource::new();
    let events = source.today_events().await.unwrap();

    let url = extract_meet_url(&events[1]);
    assert_eq!(url.as_deref(), Some("https://meet.google.com/abc-defg-hij"));
}

/// An event with neither conference data nor a link yields nothing
#[tokio::test]
async fn test_extractor_returns_none_without_link() {
    let event = CalendarEvent {
        id: "event3".to_string(),
        summary: Some("1:1".to_string()),
        description: Some("Meet at the coffee machine".to_string()),
        start_date_time: Some("2024-01-01T16:00:00+00:00".to_string()),
        ..Default::default()
    };

    assert!(extract_meet_url(&event).is_none());
}

/// Conference data with only non-video entry points falls through to
/// the description scan
#[tokio::test]
async fn test_extractor_ignores_phone_entry_points() {
    let event = CalendarEvent {
        id: "event4".to_string(),
        summary: Some("All hands".to_string()),
        description: Some("Backup link: https://meet.google.com/xyz-abcd-efg".to_string()),
        start_date_time: Some("2024-01-01T16:00:00+00:00".to_string()),
        conference_data: Some(ConferenceData {
            entry_points: vec![EntryPoint {
                entry_point_type: "phone".to_string(),
                uri: Some("tel:+1-555-0100".to_string()),
            }],
        }),
        ..Default::default()
    };

    assert_eq!(
        extract_meet_url(&event).as_deref(),
        Some("https://meet.google.com/xyz-abcd-efg")
    );
}
