use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use chrono_tz::Tz;

use crate::errors::CalendarError;
use crate::models::calendar_event::CalendarMetadata;

// Atlanta
pub const DEFAULT_LATITUDE: f64 = 33.749;
pub const DEFAULT_LONGITUDE: f64 = -84.388;
pub const DEFAULT_FORECAST_DAYS: u8 = 5;
pub const DEFAULT_TIMEZONE: &str = "America/New_York";
pub const DEFAULT_OUTPUT_PATH: &str = "docs/index.ics";
pub const DEFAULT_CALENDAR_NAME: &str = "Atlanta — Sunrise/Sunset Cloud Layers";
pub const DEFAULT_PRODUCT_ID: &str = "-//Atlanta Golden Hour Clouds//EN";
pub const DEFAULT_UID_DOMAIN: &str = "atl-solar";
pub const DEFAULT_EVENT_MINUTES: i64 = 5;
pub const DEFAULT_API_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

// Open-Meteo rejects anything above this.
const MAX_FORECAST_DAYS: u8 = 16;
const MAX_EVENT_MINUTES: i64 = 24 * 60;

/// Raw `KEY=value` pairs read from a settings file.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, CalendarError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, CalendarError> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(CalendarError::Config(format!(
                    "Invalid config line {}: {}",
                    idx + 1,
                    line
                )));
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn parse_value<T: FromStr>(&self, key: &str) -> Result<Option<T>, CalendarError> {
        match self.values.get(key) {
            Some(raw) => raw
                .parse::<T>()
                .map(Some)
                .map_err(|_| CalendarError::Config(format!("{} has an invalid value: {}", key, raw))),
            None => Ok(None),
        }
    }
}

/// Everything a run needs to know, resolved once up front.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSettings {
    pub latitude: f64,
    pub longitude: f64,
    pub forecast_days: u8,
    /// IANA zone name, sent upstream and attached to every DTSTART/DTEND.
    pub timezone: String,
    pub output_path: PathBuf,
    pub calendar_name: String,
    pub product_id: String,
    pub uid_domain: String,
    pub event_minutes: i64,
    pub api_base_url: String,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            forecast_days: DEFAULT_FORECAST_DAYS,
            timezone: DEFAULT_TIMEZONE.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            calendar_name: DEFAULT_CALENDAR_NAME.to_string(),
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            event_minutes: DEFAULT_EVENT_MINUTES,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl ForecastSettings {
    /// Overlays whatever keys are present in `config` onto the defaults.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, CalendarError> {
        let defaults = Self::default();
        let settings = Self {
            latitude: config.parse_value("LATITUDE")?.unwrap_or(defaults.latitude),
            longitude: config.parse_value("LONGITUDE")?.unwrap_or(defaults.longitude),
            forecast_days: config
                .parse_value("FORECAST_DAYS")?
                .unwrap_or(defaults.forecast_days),
            timezone: config.get("TIMEZONE").unwrap_or(defaults.timezone),
            output_path: config
                .get("OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            calendar_name: config.get("CALENDAR_NAME").unwrap_or(defaults.calendar_name),
            product_id: config.get("PRODUCT_ID").unwrap_or(defaults.product_id),
            uid_domain: config.get("UID_DOMAIN").unwrap_or(defaults.uid_domain),
            event_minutes: config
                .parse_value("EVENT_MINUTES")?
                .unwrap_or(defaults.event_minutes),
            api_base_url: config.get("API_BASE_URL").unwrap_or(defaults.api_base_url),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn calendar_metadata(&self) -> CalendarMetadata {
        CalendarMetadata {
            product_id: self.product_id.clone(),
            calendar_name: self.calendar_name.clone(),
            timezone: self.timezone.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), CalendarError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(CalendarError::Config(format!(
                "LATITUDE out of range: {}",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CalendarError::Config(format!(
                "LONGITUDE out of range: {}",
                self.longitude
            )));
        }
        if self.forecast_days == 0 || self.forecast_days > MAX_FORECAST_DAYS {
            return Err(CalendarError::Config(format!(
                "FORECAST_DAYS must be between 1 and {}, got {}",
                MAX_FORECAST_DAYS, self.forecast_days
            )));
        }
        if Tz::from_str(&self.timezone).is_err() {
            return Err(CalendarError::Config(format!(
                "Unknown timezone: {}",
                self.timezone
            )));
        }
        if self.event_minutes <= 0 || self.event_minutes > MAX_EVENT_MINUTES {
            return Err(CalendarError::Config(format!(
                "EVENT_MINUTES must be between 1 and {}, got {}",
                MAX_EVENT_MINUTES, self.event_minutes
            )));
        }
        if self.uid_domain.trim().is_empty() {
            return Err(CalendarError::Config("UID_DOMAIN must not be empty".to_string()));
        }
        Ok(())
    }
}
