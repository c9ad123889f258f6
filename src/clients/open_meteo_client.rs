use std::time::Duration;

use crate::config::ForecastSettings;
use crate::errors::CalendarError;
use crate::models::forecast::ForecastResponse;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const HOURLY_FIELDS: &str = "cloud_cover_low,cloud_cover_mid,cloud_cover_high";
const DAILY_FIELDS: &str = "sunrise,sunset";

pub fn forecast_params(settings: &ForecastSettings) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", settings.latitude.to_string()),
        ("longitude", settings.longitude.to_string()),
        ("hourly", HOURLY_FIELDS.to_string()),
        ("daily", DAILY_FIELDS.to_string()),
        ("forecast_days", settings.forecast_days.to_string()),
        ("timezone", settings.timezone.clone()),
    ]
}

pub async fn fetch_forecast(settings: &ForecastSettings) -> Result<ForecastResponse, CalendarError> {
    let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let response = client
        .get(&settings.api_base_url)
        .query(&forecast_params(settings))
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        log::debug!("Forecast API error {}: {}", status, text);
        return Err(CalendarError::Api {
            status: status.as_u16(),
            body: text,
        });
    }

    let parsed: ForecastResponse = serde_json::from_str(&text)?;
    Ok(parsed)
}
