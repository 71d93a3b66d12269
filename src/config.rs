use crate::error::{config_error, env_error, BotResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;

/// Default poll interval between calendar checks, in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Default path of the locally persisted OAuth token
pub const DEFAULT_TOKEN_PATH: &str = "token.json";

/// Main configuration structure for the daemon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google Calendar API client ID
    pub google_client_id: String,
    /// Google Calendar API client secret
    pub google_client_secret: String,
    /// Google Calendar ID to monitor
    pub google_calendar_id: String,
    /// Path to the locally persisted OAuth token file
    pub token_path: String,
    /// Timezone used to compute "today" bounds
    pub timezone: String,
    /// Seconds between polling ticks
    pub poll_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> BotResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let google_client_id =
            env::var("GOOGLE_CLIENT_ID").map_err(|_| env_error("GOOGLE_CLIENT_ID"))?;
        let google_client_secret =
            env::var("GOOGLE_CLIENT_SECRET").map_err(|_| env_error("GOOGLE_CLIENT_SECRET"))?;

        // The primary calendar unless overridden
        let google_calendar_id =
            env::var("GOOGLE_CALENDAR_ID").unwrap_or_else(|_| String::from("primary"));

        let token_path =
            env::var("TOKEN_PATH").unwrap_or_else(|_| String::from(DEFAULT_TOKEN_PATH));

        // Default timezone
        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from("UTC"));

        let poll_interval_secs = match env::var("POLL_INTERVAL_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| env_error("Invalid POLL_INTERVAL_SECS format"))?,
            Err(_) => DEFAULT_POLL_INTERVAL_SECS,
        };

        let config = Config {
            google_client_id,
            google_client_secret,
            google_calendar_id,
            token_path,
            timezone,
            poll_interval_secs,
        };

        // Fail early on an unparseable timezone
        config.tz()?;

        Ok(config)
    }

    /// Parse the configured timezone
    pub fn tz(&self) -> BotResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }
}
