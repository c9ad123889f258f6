use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::config::ForecastSettings;
use crate::errors::CalendarError;
use crate::service::event_builder::{build_events, IdGenerator};
use crate::service::ics_serializer::serialize;
use crate::service::output_sink::write_calendar;
use crate::service::weather_service::WeatherProvider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub event_count: usize,
}

/// Fetches the forecast, builds and renders every event, then writes the file.
/// Nothing touches disk unless the whole document was built.
pub async fn run_once<P, G>(
    settings: &ForecastSettings,
    provider: &P,
    ids: &G,
    now: DateTime<Utc>,
) -> Result<RunSummary, CalendarError>
where
    P: WeatherProvider + ?Sized,
    G: IdGenerator + ?Sized,
{
    log::info!(
        "Fetching {}-day forecast for ({}, {}) in {}",
        settings.forecast_days,
        settings.latitude,
        settings.longitude,
        settings.timezone
    );
    let forecast = provider.fetch_forecast(settings).await?;
    log::info!(
        "Received {} hourly samples and {} days",
        forecast.hourly.len(),
        forecast.daily.day_count()
    );

    let events = build_events(&forecast.daily, &forecast.hourly, settings, ids, now)?;
    let document = serialize(&events, &settings.calendar_metadata());

    write_calendar(&settings.output_path, &document)?;
    log::info!(
        "Wrote {} events to {}",
        events.len(),
        settings.output_path.display()
    );

    Ok(RunSummary {
        output_path: settings.output_path.clone(),
        event_count: events.len(),
    })
}
