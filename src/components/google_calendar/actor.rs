use super::models::{CalendarEvent, ConferenceData};
use super::time::day_bounds;
use super::token::TokenManager;
use crate::config::Config;
use crate::error::{google_calendar_error, BotResult};
use chrono::Utc;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::info;
use url::Url;

/// The Google Calendar actor that processes messages
pub struct GoogleCalendarActor {
    config: Arc<RwLock<Config>>,
    token_manager: TokenManager,
    client: Client,
    command_rx: mpsc::Receiver<GoogleCalendarCommand>,
}

/// Commands that can be sent to the Google Calendar actor
pub enum GoogleCalendarCommand {
    GetTodayEvents(mpsc::Sender<BotResult<Vec<CalendarEvent>>>),
    Shutdown,
}

/// Handle for communicating with the Google Calendar actor
#[derive(Clone)]
pub struct GoogleCalendarActorHandle {
    command_tx: mpsc::Sender<GoogleCalendarCommand>,
}

impl GoogleCalendarActorHandle {
    /// Get today's events from the calendar
    pub async fn get_today_events(&self) -> BotResult<Vec<CalendarEvent>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(GoogleCalendarCommand::GetTodayEvents(response_tx))
            .await
            .map_err(|e| google_calendar_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| google_calendar_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> BotResult<()> {
        let _ = self.command_tx.send(GoogleCalendarCommand::Shutdown).await;
        Ok(())
    }
}

impl GoogleCalendarActor {
    /// Create a new actor and return its handle
    pub fn new(config: Arc<RwLock<Config>>) -> (Self, GoogleCalendarActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            config: Arc::clone(&config),
            token_manager: TokenManager::new(config),
            client: Client::new(),
            command_rx,
        };

        let handle = GoogleCalendarActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Google Calendar actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                GoogleCalendarCommand::GetTodayEvents(response_tx) => {
                    let result = Self::get_today_events(
                        Arc::clone(&self.config),
                        self.token_manager.clone(),
                        self.client.clone(),
                    )
                    .await;

                    let _ = response_tx.send(result).await;
                }
                GoogleCalendarCommand::Shutdown => {
                    info!("Google Calendar actor shutting down");
                    break;
                }
            }
        }

        info!("Google Calendar actor shut down");
    }

    /// Get today's events from the calendar, expanded to single
    /// instances and ordered by start time
    pub async fn get_today_events(
        config: Arc<RwLock<Config>>,
        token_manager: TokenManager,
        client: Client,
    ) -> BotResult<Vec<CalendarEvent>> {
        // Get calendar ID and timezone from config
        let (calendar_id, tz) = {
            let config_read = config.read().await;
            (config_read.google_calendar_id.clone(), config_read.tz()?)
        };

        // Get authentication token
        let token = token_manager.get_token().await?;
        let access_token = token
            .get("access_token")
            .and_then(|t| t.as_str())
            .ok_or_else(|| google_calendar_error("No access token available"))?;

        // Today's bounds in the configured timezone
        let (day_start, day_end) = day_bounds(tz, Utc::now())?;
        let time_min = day_start.to_rfc3339();
        let time_max = day_end.to_rfc3339();

        // Build URL with query parameters
        let url_str = format!(
            "https://www.googleapis.com/calendar/v3/calendars/{}/events",
            calendar_id
        );

        let mut url = Url::parse(&url_str)
            .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;

        let mut query_params = HashMap::new();
        query_params.insert("timeMin", time_min);
        query_params.insert("timeMax", time_max);
        query_params.insert("singleEvents", "true".to_string());
        query_params.insert("orderBy", "startTime".to_string());

        for (key, value) in query_params {
            url.query_pairs_mut().append_pair(key, &value);
        }

        // Make API request
        let response = client
            .get(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to fetch events: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to fetch events: HTTP {} - {}",
                status, error_body
            )));
        }

        let response_data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse events response: {}", e)))?;

        // Parse events from response
        let events = response_data
            .get("items")
            .and_then(|i| i.as_array())
            .ok_or_else(|| google_calendar_error("No items in response"))?;

        // Convert to CalendarEvent objects
        let calendar_events = events.iter().map(Self::parse_event).collect();

        Ok(calendar_events)
    }

    fn parse_event(event: &serde_json::Value) -> CalendarEvent {
        let id = event
            .get("id")
            .and_then(|id| id.as_str())
            .unwrap_or("")
            .to_string();
        let summary = event
            .get("summary")
            .and_then(|s| s.as_str())
            .map(|s| s.to_string());
        let description = event
            .get("description")
            .and_then(|s| s.as_str())
            .map(|s| s.to_string());
        let created = event
            .get("created")
            .and_then(|s| s.as_str())
            .map(|s| s.to_string());

        let start_date_time = event
            .get("start")
            .and_then(|start| start.get("dateTime"))
            .and_then(|dt| dt.as_str())
            .map(|s| s.to_string());

        let start_date = event
            .get("start")
            .and_then(|start| start.get("date"))
            .and_then(|d| d.as_str())
            .map(|s| s.to_string());

        let end_date_time = event
            .get("end")
            .and_then(|end| end.get("dateTime"))
            .and_then(|dt| dt.as_str())
            .map(|s| s.to_string());

        let end_date = event
            .get("end")
            .and_then(|end| end.get("date"))
            .and_then(|d| d.as_str())
            .map(|s| s.to_string());

        let conference_data = event
            .get("conferenceData")
            .cloned()
            .and_then(|cd| serde_json::from_value::<ConferenceData>(cd).ok());

        CalendarEvent {
            id,
            summary,
            description,
            created,
            start_date_time,
            start_date,
            end_date_time,
            end_date,
            conference_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_event_with_conference_data() {
        let raw = json!({
            "id": "abc123",
            "summary": "Standup",
            "start": { "dateTime": "2024-01-01T10:00:00+00:00" },
            "end": { "dateTime": "2024-01-01T10:15:00+00:00" },
            "conferenceData": {
                "entryPoints": [
                    { "entryPointType": "video", "uri": "https://meet.google.com/abc-defg-hij" }
                ]
            }
        });

        let event = GoogleCalendarActor::parse_event(&raw);
        assert_eq!(event.id, "abc123");
        assert_eq!(event.summary.as_deref(), Some("Standup"));
        assert_eq!(
            event.start_date_time.as_deref(),
            Some("2024-01-01T10:00:00+00:00")
        );

        let cd = event.conference_data.unwrap();
        assert_eq!(cd.entry_points.len(), 1);
        assert_eq!(cd.entry_points[0].entry_point_type, "video");
        assert_eq!(
            cd.entry_points[0].uri.as_deref(),
            Some("https://meet.google.com/abc-defg-hij")
        );
    }

    #[test]
    fn test_parse_all_day_event() {
        let raw = json!({
            "id": "allday1",
            "summary": "Vacation",
            "start": { "date": "2024-01-01" },
            "end": { "date": "2024-01-02" }
        });

        let event = GoogleCalendarActor::parse_event(&raw);
        assert_eq!(event.start_date.as_deref(), Some("2024-01-01"));
        assert!(event.start_date_time.is_none());
        assert!(event.conference_data.is_none());
    }
}
