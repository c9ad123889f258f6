use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use uuid::Uuid;

use super::matcher::nearest_index;
use crate::config::ForecastSettings;
use crate::errors::CalendarError;
use crate::models::calendar_event::CalendarEvent;
use crate::models::forecast::{CloudSample, DailySeries, HourlySeries, SolarEvent, SolarLabel};

/// Source of the opaque part of each event uid.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        let mut hex = Uuid::new_v4().simple().to_string();
        hex.truncate(8);
        hex
    }
}

pub fn event_summary(label: SolarLabel, sample: &CloudSample) -> String {
    format!("{} — L/M/H clouds: {}", label, sample)
}

/// Two events per day (sunrise, then sunset), each titled with the cloud
/// layers of the nearest hourly sample.
pub fn build_events<G: IdGenerator + ?Sized>(
    daily: &DailySeries,
    hourly: &HourlySeries,
    settings: &ForecastSettings,
    ids: &G,
    created_at: DateTime<Utc>,
) -> Result<Vec<CalendarEvent>, CalendarError> {
    if hourly.is_empty() && !(daily.sunrise.is_empty() && daily.sunset.is_empty()) {
        return Err(CalendarError::InvalidInput(
            "hourly series is empty but daily series is not".to_string(),
        ));
    }

    let days = daily.day_count();
    if daily.sunrise.len() != daily.sunset.len() {
        log::debug!(
            "sunrise/sunset counts differ ({} vs {}), keeping {} days",
            daily.sunrise.len(),
            daily.sunset.len(),
            days
        );
    }

    let duration = Duration::try_minutes(settings.event_minutes).ok_or_else(|| {
        CalendarError::InvalidInput(format!(
            "event length of {} minutes is out of range",
            settings.event_minutes
        ))
    })?;
    let mut issued: HashSet<String> = HashSet::new();
    let mut events = Vec::with_capacity(days * 2);

    for i in 0..days {
        for solar in [
            SolarEvent { label: SolarLabel::Sunrise, instant: daily.sunrise[i] },
            SolarEvent { label: SolarLabel::Sunset, instant: daily.sunset[i] },
        ] {
            let idx = nearest_index(&hourly.time, solar.instant)?;
            let sample = hourly.sample(idx).ok_or_else(|| {
                CalendarError::MalformedResponse(format!("no cloud sample at index {}", idx))
            })?;
            log::debug!(
                "{} at {} matched hourly sample {} ({})",
                solar.label,
                solar.instant,
                hourly.time[idx],
                sample
            );

            let end = solar.instant.checked_add_signed(duration).ok_or_else(|| {
                CalendarError::InvalidInput(format!(
                    "{} at {} plus {} minutes overflows",
                    solar.label, solar.instant, settings.event_minutes
                ))
            })?;

            let uid = unique_uid(&mut issued, &solar, ids, &settings.uid_domain);
            events.push(CalendarEvent {
                uid,
                created_at,
                start: solar.instant,
                end,
                summary: event_summary(solar.label, &sample),
            });
        }
    }
    Ok(events)
}

fn unique_uid<G: IdGenerator + ?Sized>(
    issued: &mut HashSet<String>,
    solar: &SolarEvent,
    ids: &G,
    domain: &str,
) -> String {
    let base = uid_for(solar.label, solar.instant, &ids.next_id());
    let mut uid = format!("{}@{}", base, domain);
    let mut n = 2;
    while issued.contains(&uid) {
        uid = format!("{}-{}@{}", base, n, domain);
        n += 1;
    }
    issued.insert(uid.clone());
    uid
}

fn uid_for(label: SolarLabel, instant: NaiveDateTime, suffix: &str) -> String {
    format!("{}-{}-{}", label, instant.date(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use serde_json::Number;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedIds;

    impl IdGenerator for FixedIds {
        fn next_id(&self) -> String {
            "deadbeef".to_string()
        }
    }

    struct CountingIds(AtomicUsize);

    impl IdGenerator for CountingIds {
        fn next_id(&self) -> String {
            format!("{:08x}", self.0.fetch_add(1, Ordering::SeqCst))
        }
    }

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn n(v: u64) -> Option<Number> {
        Some(Number::from(v))
    }

    fn three_hours() -> HourlySeries {
        HourlySeries::new(
            vec![at(18, 7, 0), at(18, 8, 0), at(18, 9, 0)],
            vec![n(10), n(40), n(70)],
            vec![n(20), n(50), n(80)],
            vec![n(30), n(60), n(90)],
        )
        .unwrap()
    }

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 18, 2, 0, 0).unwrap()
    }

    #[test]
    fn sunrise_takes_nearest_hour() {
        let daily = DailySeries {
            sunrise: vec![at(18, 7, 40)],
            sunset: vec![at(18, 8, 55)],
        };
        let events = build_events(
            &daily,
            &three_hours(),
            &ForecastSettings::default(),
            &CountingIds(AtomicUsize::new(0)),
            created(),
        )
        .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].summary, "Sunrise — L/M/H clouds: 40%/50%/60%");
        assert_eq!(events[0].start, at(18, 7, 40));
        assert_eq!(events[0].end, at(18, 7, 45));
        assert_eq!(events[0].created_at, created());
        assert_eq!(events[1].summary, "Sunset — L/M/H clouds: 70%/80%/90%");
        assert_eq!(events[0].uid, "Sunrise-2025-10-18-00000000@atl-solar");
    }

    #[test]
    fn unmatched_trailing_days_are_dropped() {
        let daily = DailySeries {
            sunrise: (14..19).map(|d| at(d, 7, 40)).collect(),
            sunset: (14..17).map(|d| at(d, 19, 5)).collect(),
        };
        let events = build_events(
            &daily,
            &three_hours(),
            &ForecastSettings::default(),
            &UuidIdGenerator,
            created(),
        )
        .unwrap();

        assert_eq!(events.len(), 6);
        let labels: Vec<&str> = events
            .iter()
            .map(|e| e.summary.split(' ').next().unwrap())
            .collect();
        assert_eq!(
            labels,
            vec!["Sunrise", "Sunset", "Sunrise", "Sunset", "Sunrise", "Sunset"]
        );
        assert_eq!(events[4].start, at(16, 7, 40));
    }

    #[test]
    fn repeated_ids_still_yield_distinct_uids() {
        let daily = DailySeries {
            sunrise: vec![at(18, 7, 40), at(18, 7, 40)],
            sunset: vec![at(18, 19, 5), at(18, 19, 5)],
        };
        let events = build_events(
            &daily,
            &three_hours(),
            &ForecastSettings::default(),
            &FixedIds,
            created(),
        )
        .unwrap();

        let uids: HashSet<&str> = events.iter().map(|e| e.uid.as_str()).collect();
        assert_eq!(uids.len(), events.len());
        assert!(uids.contains("Sunrise-2025-10-18-deadbeef@atl-solar"));
        assert!(uids.contains("Sunrise-2025-10-18-deadbeef-2@atl-solar"));
    }

    #[test]
    fn empty_hourly_series_fails() {
        let daily = DailySeries {
            sunrise: vec![at(18, 7, 40)],
            sunset: vec![],
        };
        let err = build_events(
            &daily,
            &HourlySeries::default(),
            &ForecastSettings::default(),
            &FixedIds,
            created(),
        )
        .unwrap_err();
        assert!(matches!(err, CalendarError::InvalidInput(_)));
    }

    #[test]
    fn empty_input_builds_nothing() {
        let events = build_events(
            &DailySeries::default(),
            &HourlySeries::default(),
            &ForecastSettings::default(),
            &FixedIds,
            created(),
        )
        .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn oversized_event_length_is_an_error_not_a_panic() {
        let daily = DailySeries {
            sunrise: vec![at(18, 7, 40)],
            sunset: vec![at(18, 8, 55)],
        };
        for minutes in [100_000_000_000_000, i64::MAX] {
            let settings = ForecastSettings {
                event_minutes: minutes,
                ..ForecastSettings::default()
            };
            let err = build_events(&daily, &three_hours(), &settings, &FixedIds, created())
                .unwrap_err();
            assert!(matches!(err, CalendarError::InvalidInput(_)), "{} minutes", minutes);
        }
    }

    #[test]
    fn uuid_ids_are_eight_hex_chars() {
        let id = UuidIdGenerator.next_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
