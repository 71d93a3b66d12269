use crate::error::{BotResult, Error};
use tracing::info;

/// Boundary for the fire-and-forget "open this URL" action
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> BotResult<()>;
}

/// Opens URLs in the user's default browser
#[derive(Debug, Clone, Default)]
pub struct Browser;

impl UrlOpener for Browser {
    fn open(&self, url: &str) -> BotResult<()> {
        info!("Opening Google Meet in browser: {}", url);
        webbrowser::open(url)
            .map_err(|e| Error::Browser(format!("Failed to open browser: {}", e)))?;
        Ok(())
    }
}
