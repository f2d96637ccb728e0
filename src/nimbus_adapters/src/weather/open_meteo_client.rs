use nimbus_core::{GeoLocation, Language, RawForecast, WeatherError, WeatherGateway};
use reqwest::Client;
use serde::Deserialize;

const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,sunrise,sunset,weathercode,precipitation_probability_max";
const HOURLY_FIELDS: &str = "relative_humidity_2m,temperature_2m";

/// Open-Meteo geocoding and forecast endpoints.
///
/// The request timeout lives on the injected `reqwest::Client`.
pub struct OpenMeteoClient {
    http_client: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoClient {
    pub fn new(geocoding_url: String, forecast_url: String, http_client: Client) -> Self {
        Self {
            http_client,
            geocoding_url,
            forecast_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[async_trait::async_trait]
impl WeatherGateway for OpenMeteoClient {
    #[tracing::instrument(name = "Geocoding city", skip(self, language))]
    async fn geocode(&self, city: &str, language: &Language) -> Result<GeoLocation, WeatherError> {
        let response = self
            .http_client
            .get(&self.geocoding_url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "geocoding returned non-success");
            return Err(WeatherError::CityNotFound);
        }

        let body: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?;

        body.results
            .and_then(|results| results.into_iter().next())
            .map(|first| GeoLocation {
                name: first.name,
                latitude: first.latitude,
                longitude: first.longitude,
            })
            .ok_or(WeatherError::CityNotFound)
    }

    #[tracing::instrument(name = "Fetching forecast", skip(self))]
    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<RawForecast, WeatherError> {
        let response = self
            .http_client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current_weather", "true".to_owned()),
                ("daily", DAILY_FIELDS.to_owned()),
                ("hourly", HOURLY_FIELDS.to_owned()),
                ("timezone", "auto".to_owned()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?;

        response
            .json::<RawForecast>()
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))
    }
}
