// Export components
pub mod google_calendar;
pub mod joiner;

// Re-export Google Calendar handle
pub use google_calendar::GoogleCalendarHandle;
// Re-export the meeting joiner
pub use joiner::MeetingJoiner;
