/// Simplified calendar event representation
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub created: Option<String>,
    pub start_date_time: Option<String>,
    pub start_date: Option<String>,
    pub end_date_time: Option<String>,
    pub end_date: Option<String>,
    pub conference_data: Option<ConferenceData>,
}

/// Structured conference attachment on an event, as returned by the API
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct ConferenceData {
    #[serde(rename = "entryPoints", default)]
    pub entry_points: Vec<EntryPoint>,
}

/// One way of joining a conference (video, phone, sip, ...)
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct EntryPoint {
    #[serde(rename = "entryPointType", default)]
    pub entry_point_type: String,
    pub uri: Option<String>,
}
