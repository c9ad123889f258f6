use std::fmt;

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Number;

use crate::errors::CalendarError;

/// Raw Open-Meteo `/v1/forecast` body. Only the blocks we request are modelled;
/// a response without `hourly` or `daily` fails to deserialize.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub hourly: HourlyBlock,
    pub daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
pub struct HourlyBlock {
    pub time: Vec<String>,
    pub cloud_cover_low: Vec<Option<Number>>,
    pub cloud_cover_mid: Vec<Option<Number>>,
    pub cloud_cover_high: Vec<Option<Number>>,
}

#[derive(Debug, Deserialize)]
pub struct DailyBlock {
    pub sunrise: Vec<String>,
    pub sunset: Vec<String>,
}

/// One hourly reading of the three cloud layers, kept as the literal numbers
/// the provider sent.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudSample {
    pub low: Option<Number>,
    pub mid: Option<Number>,
    pub high: Option<Number>,
}

impl CloudSample {
    pub fn new(low: Option<Number>, mid: Option<Number>, high: Option<Number>) -> Self {
        Self { low, mid, high }
    }
}

impl fmt::Display for CloudSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}%/{}%/{}%",
            layer(&self.low),
            layer(&self.mid),
            layer(&self.high)
        )
    }
}

fn layer(value: &Option<Number>) -> String {
    match value {
        Some(n) => n.to_string(),
        None => "n/a".to_string(),
    }
}

/// Hourly timeline with index-aligned cloud layers.
#[derive(Debug, Clone, Default)]
pub struct HourlySeries {
    pub time: Vec<NaiveDateTime>,
    pub cloud_cover_low: Vec<Option<Number>>,
    pub cloud_cover_mid: Vec<Option<Number>>,
    pub cloud_cover_high: Vec<Option<Number>>,
}

impl HourlySeries {
    pub fn new(
        time: Vec<NaiveDateTime>,
        cloud_cover_low: Vec<Option<Number>>,
        cloud_cover_mid: Vec<Option<Number>>,
        cloud_cover_high: Vec<Option<Number>>,
    ) -> Result<Self, CalendarError> {
        let len = time.len();
        if cloud_cover_low.len() != len
            || cloud_cover_mid.len() != len
            || cloud_cover_high.len() != len
        {
            return Err(CalendarError::MalformedResponse(format!(
                "hourly columns differ in length: time={}, low={}, mid={}, high={}",
                len,
                cloud_cover_low.len(),
                cloud_cover_mid.len(),
                cloud_cover_high.len()
            )));
        }
        Ok(Self {
            time,
            cloud_cover_low,
            cloud_cover_mid,
            cloud_cover_high,
        })
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn sample(&self, idx: usize) -> Option<CloudSample> {
        Some(CloudSample::new(
            self.cloud_cover_low.get(idx)?.clone(),
            self.cloud_cover_mid.get(idx)?.clone(),
            self.cloud_cover_high.get(idx)?.clone(),
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct DailySeries {
    pub sunrise: Vec<NaiveDateTime>,
    pub sunset: Vec<NaiveDateTime>,
}

impl DailySeries {
    /// Number of complete sunrise/sunset pairs.
    pub fn day_count(&self) -> usize {
        self.sunrise.len().min(self.sunset.len())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Forecast {
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

impl TryFrom<ForecastResponse> for Forecast {
    type Error = CalendarError;

    fn try_from(response: ForecastResponse) -> Result<Self, Self::Error> {
        let hourly = HourlySeries::new(
            parse_timestamps(&response.hourly.time)?,
            response.hourly.cloud_cover_low,
            response.hourly.cloud_cover_mid,
            response.hourly.cloud_cover_high,
        )?;
        let daily = DailySeries {
            sunrise: parse_timestamps(&response.daily.sunrise)?,
            sunset: parse_timestamps(&response.daily.sunset)?,
        };
        Ok(Self { hourly, daily })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolarLabel {
    Sunrise,
    Sunset,
}

impl SolarLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolarLabel::Sunrise => "Sunrise",
            SolarLabel::Sunset => "Sunset",
        }
    }
}

impl fmt::Display for SolarLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarEvent {
    pub label: SolarLabel,
    pub instant: NaiveDateTime,
}

/// Parses the provider's civil local timestamps, e.g. `2025-10-18T07:00`.
/// Seconds are optional.
pub fn parse_local_timestamp(raw: &str) -> Result<NaiveDateTime, CalendarError> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| CalendarError::InvalidTimestamp(raw.to_string()))
}

fn parse_timestamps(raw: &[String]) -> Result<Vec<NaiveDateTime>, CalendarError> {
    raw.iter().map(|t| parse_local_timestamp(t)).collect()
}
