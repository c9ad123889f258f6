use async_trait::async_trait;

use crate::clients::open_meteo_client;
use crate::config::ForecastSettings;
use crate::errors::CalendarError;
use crate::models::forecast::Forecast;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_forecast(&self, settings: &ForecastSettings) -> Result<Forecast, CalendarError>;
}

pub struct OpenMeteoService;

#[async_trait]
impl WeatherProvider for OpenMeteoService {
    async fn fetch_forecast(&self, settings: &ForecastSettings) -> Result<Forecast, CalendarError> {
        let response = open_meteo_client::fetch_forecast(settings).await?;
        Forecast::try_from(response)
    }
}
