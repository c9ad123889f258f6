use std::path::PathBuf;

use clap::Parser;

use crate::config::{AppConfig, ForecastSettings};
use crate::errors::CalendarError;

/// Writes an iCalendar feed of sunrise/sunset times with the forecast cloud
/// cover at each.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// KEY=value settings file (LATITUDE, LONGITUDE, FORECAST_DAYS, TIMEZONE, ...)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Where to write the calendar, overriding OUTPUT_PATH
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    pub fn load_settings(&self) -> Result<ForecastSettings, CalendarError> {
        let config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        let mut settings = ForecastSettings::from_app_config(&config)?;
        if let Some(output) = &self.output {
            settings.output_path = output.clone();
        }
        Ok(settings)
    }
}
