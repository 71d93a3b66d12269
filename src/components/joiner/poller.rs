use super::browser::UrlOpener;
use super::decision::{evaluate, JoinDecision};
use crate::components::google_calendar::{CalendarEvent, GoogleCalendarHandle};
use crate::error::BotResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

/// Source of today's calendar events
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn today_events(&self) -> BotResult<Vec<CalendarEvent>>;
}

#[async_trait]
impl EventSource for GoogleCalendarHandle {
    async fn today_events(&self) -> BotResult<Vec<CalendarEvent>> {
        self.get_today_events().await
    }
}

/// The poll loop: fetches today's events each tick and opens the
/// meeting link of anything whose join window has arrived, once per
/// event per process lifetime.
pub struct MeetingJoiner<S, O> {
    source: S,
    opener: O,
    joined: HashSet<String>,
}

impl<S: EventSource, O: UrlOpener> MeetingJoiner<S, O> {
    pub fn new(source: S, opener: O) -> Self {
        Self {
            source,
            opener,
            joined: HashSet::new(),
        }
    }

    /// Whether an event has already been joined in this process run
    #[allow(dead_code)]
    pub fn has_joined(&self, event_id: &str) -> bool {
        self.joined.contains(event_id)
    }

    /// One evaluation pass over today's events. Returns the number of
    /// meetings joined during this tick.
    ///
    /// A fetch failure is logged and treated as "no events this tick";
    /// the next tick retries independently.
    pub async fn tick(&mut self, now: DateTime<Utc>) -> usize {
        info!("Checking today's events");

        let events = match self.source.today_events().await {
            Ok(events) => events,
            Err(e) => {
                error!("Failed to fetch events: {}", e);
                Vec::new()
            }
        };

        let mut joined_count = 0;

        for event in events {
            if self.joined.contains(&event.id) {
                continue;
            }

            let summary = event.summary.as_deref().unwrap_or("Untitled").to_string();

            match evaluate(&event, now) {
                Ok(JoinDecision::Join(url)) => {
                    info!("Joining meeting \"{}\"", summary);
                    match self.opener.open(&url) {
                        Ok(()) => {
                            // Marked handled only after a successful open
                            self.joined.insert(event.id.clone());
                            joined_count += 1;
                        }
                        Err(e) => {
                            error!("Failed to open meeting \"{}\": {}", summary, e);
                        }
                    }
                }
                Ok(JoinDecision::Wait(until_start)) => {
                    info!("Meeting \"{}\" in {} min", summary, until_start.num_minutes());
                }
                Ok(JoinDecision::Skip) => {}
                Err(e) => {
                    warn!("Skipping event \"{}\": {}", summary, e);
                }
            }
        }

        joined_count
    }

    /// Drive the loop off a fixed-interval ticker until shutdown
    pub async fn run(mut self, interval: Duration, mut shutdown_rx: oneshot::Receiver<()>) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick(Utc::now()).await;
                }
                _ = &mut shutdown_rx => {
                    info!("Poll loop stopping");
                    break;
                }
            }
        }
    }
}
