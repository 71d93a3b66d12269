pub mod browser;
pub mod decision;
pub mod extract;
mod poller;

pub use browser::{Browser, UrlOpener};
pub use decision::{evaluate, is_time_to_join, JoinDecision, JOIN_WINDOW_SECS};
pub use extract::extract_meet_url;
pub use poller::{EventSource, MeetingJoiner};
