use chrono::{DateTime, NaiveDateTime, Utc};

use crate::errors::CalendarError;
use crate::models::calendar_event::{CalendarEvent, CalendarMetadata};

const LOCAL_FORMAT: &str = "%Y%m%dT%H%M%S";
const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Renders the whole calendar. Summaries are written as-is, with no escaping.
pub fn serialize(events: &[CalendarEvent], metadata: &CalendarMetadata) -> String {
    let mut ics = String::new();
    ics.push_str("BEGIN:VCALENDAR\n");
    ics.push_str(&format!("PRODID:{}\n", metadata.product_id));
    ics.push_str("VERSION:2.0\nCALSCALE:GREGORIAN\nMETHOD:PUBLISH\n");
    ics.push_str(&format!("X-WR-CALNAME:{}\n", metadata.calendar_name));
    ics.push_str(&format!("X-WR-TIMEZONE:{}\n", metadata.timezone));
    for event in events {
        ics.push_str(&vevent(event, &metadata.timezone));
    }
    ics.push_str("END:VCALENDAR\n");
    ics
}

fn vevent(event: &CalendarEvent, tz: &str) -> String {
    format!(
        "BEGIN:VEVENT\n\
         UID:{uid}\n\
         DTSTAMP:{stamp}\n\
         DTSTART;TZID={tz}:{start}\n\
         DTEND;TZID={tz}:{end}\n\
         SUMMARY:{summary}\n\
         END:VEVENT\n",
        uid = event.uid,
        stamp = event.created_at.format(UTC_FORMAT),
        tz = tz,
        start = event.start.format(LOCAL_FORMAT),
        end = event.end.format(LOCAL_FORMAT),
        summary = event.summary,
    )
}

/// An event block read back out of a calendar document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEvent {
    pub uid: String,
    pub created_at: DateTime<Utc>,
    pub timezone: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub summary: String,
}

#[derive(Default)]
struct PartialEvent {
    uid: Option<String>,
    created_at: Option<DateTime<Utc>>,
    timezone: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    summary: Option<String>,
}

impl PartialEvent {
    fn finish(self, line_no: usize) -> Result<ParsedEvent, CalendarError> {
        let missing = |field: &str| {
            CalendarError::InvalidInput(format!(
                "event ending on line {} has no {}",
                line_no, field
            ))
        };
        Ok(ParsedEvent {
            uid: self.uid.ok_or_else(|| missing("UID"))?,
            created_at: self.created_at.ok_or_else(|| missing("DTSTAMP"))?,
            timezone: self.timezone,
            start: self.start.ok_or_else(|| missing("DTSTART"))?,
            end: self.end.ok_or_else(|| missing("DTEND"))?,
            summary: self.summary.ok_or_else(|| missing("SUMMARY"))?,
        })
    }
}

/// Reads every VEVENT block of a document produced by [`serialize`].
pub fn parse_events(document: &str) -> Result<Vec<ParsedEvent>, CalendarError> {
    let mut events = Vec::new();
    let mut current: Option<PartialEvent> = None;

    for (idx, raw) in document.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end_matches('\r');
        match line {
            "BEGIN:VEVENT" => {
                if current.is_some() {
                    return Err(CalendarError::InvalidInput(format!(
                        "nested VEVENT on line {}",
                        line_no
                    )));
                }
                current = Some(PartialEvent::default());
                continue;
            }
            "END:VEVENT" => {
                let Some(partial) = current.take() else {
                    return Err(CalendarError::InvalidInput(format!(
                        "END:VEVENT without BEGIN on line {}",
                        line_no
                    )));
                };
                events.push(partial.finish(line_no)?);
                continue;
            }
            _ => {}
        }

        let Some(partial) = current.as_mut() else {
            continue;
        };
        let Some((name, value)) = line.split_once(':') else {
            return Err(CalendarError::InvalidInput(format!(
                "line {} is not a property: {}",
                line_no, line
            )));
        };
        let (property, params) = match name.split_once(';') {
            Some((property, params)) => (property, Some(params)),
            None => (name, None),
        };
        match property {
            "UID" => partial.uid = Some(value.to_string()),
            "SUMMARY" => partial.summary = Some(value.to_string()),
            "DTSTAMP" => {
                let stamp = NaiveDateTime::parse_from_str(value, UTC_FORMAT)
                    .map_err(|_| CalendarError::InvalidTimestamp(value.to_string()))?;
                partial.created_at = Some(stamp.and_utc());
            }
            "DTSTART" | "DTEND" => {
                let local = NaiveDateTime::parse_from_str(value, LOCAL_FORMAT)
                    .map_err(|_| CalendarError::InvalidTimestamp(value.to_string()))?;
                if let Some(tz) = params.and_then(|p| p.strip_prefix("TZID=")) {
                    partial.timezone = Some(tz.to_string());
                }
                if property == "DTSTART" {
                    partial.start = Some(local);
                } else {
                    partial.end = Some(local);
                }
            }
            _ => {}
        }
    }

    if current.is_some() {
        return Err(CalendarError::InvalidInput(
            "document ends inside a VEVENT".to_string(),
        ));
    }
    Ok(events)
}
