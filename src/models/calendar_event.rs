use chrono::{DateTime, NaiveDateTime, Utc};

/// One sunrise or sunset, ready to be written as a VEVENT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    /// When the calendar was generated, not when the sun does anything.
    pub created_at: DateTime<Utc>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub summary: String,
}

/// Calendar-level header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMetadata {
    pub product_id: String,
    pub calendar_name: String,
    pub timezone: String,
}
