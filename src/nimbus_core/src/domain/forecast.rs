//! Weather display model and the pure mapping from the upstream forecast payload.
//!
//! The upstream payload is deserialized into [`RawForecast`]; [`format_current`]
//! and [`format_forecast`] reshape it into what the dashboard and the JSON API
//! render. Missing or short arrays are a formatting error, never a partial result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of daily entries in a forecast.
pub const FORECAST_DAYS: usize = 7;
/// Number of hourly samples shown alongside current conditions.
pub const HOURLY_SAMPLES: usize = 24;

const DEFAULT_ICON: &str = "🌤️";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForecastFormatError {
    #[error("Forecast is missing {0}")]
    MissingData(&'static str),
}

/// A geocoded place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecast {
    pub current_weather: RawCurrentWeather,
    pub daily: RawDaily,
    pub hourly: RawHourly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    pub weathercode: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDaily {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub sunrise: Vec<String>,
    pub sunset: Vec<String>,
    pub weathercode: Vec<Option<i64>>,
    #[serde(default)]
    pub precipitation_probability_max: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHourly {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub relative_humidity_2m: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    pub weathercode: i64,
    pub weather_icon: &'static str,
    pub humidity: Option<f64>,
    pub sunrise: String,
    pub sunset: String,
    pub hourly_temps: Vec<Option<f64>>,
    pub hourly_times: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecast {
    pub date: String,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub icon: &'static str,
    pub precipitation: Option<f64>,
}

/// Everything a successful city search produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
    pub is_favorite: bool,
}

/// Icon for a WMO weather code. Unknown codes fall back to a default icon.
pub fn weather_icon(code: i64) -> &'static str {
    match code {
        0 => "☀️",
        1 => "🌤️",
        2 => "⛅",
        3 => "☁️",
        45 | 48 => "🌫️",
        51 | 80 => "🌦️",
        53 | 55 | 61 | 63 | 65 | 81 => "🌧️",
        71 | 73 | 75 | 77 | 85 | 86 => "🌨️",
        82 | 95 | 96 | 99 => "⛈️",
        _ => DEFAULT_ICON,
    }
}

pub fn format_current(
    raw: &RawForecast,
    location: &GeoLocation,
) -> Result<CurrentConditions, ForecastFormatError> {
    let current = &raw.current_weather;

    let humidity = *raw
        .hourly
        .relative_humidity_2m
        .first()
        .ok_or(ForecastFormatError::MissingData("hourly humidity"))?;
    let sunrise = raw
        .daily
        .sunrise
        .first()
        .ok_or(ForecastFormatError::MissingData("sunrise"))?;
    let sunset = raw
        .daily
        .sunset
        .first()
        .ok_or(ForecastFormatError::MissingData("sunset"))?;

    Ok(CurrentConditions {
        city: location.name.clone(),
        latitude: location.latitude,
        longitude: location.longitude,
        temperature: current.temperature,
        windspeed: current.windspeed,
        winddirection: current.winddirection,
        weathercode: current.weathercode,
        weather_icon: weather_icon(current.weathercode),
        humidity,
        sunrise: time_of_day(sunrise).to_owned(),
        sunset: time_of_day(sunset).to_owned(),
        hourly_temps: raw
            .hourly
            .temperature_2m
            .iter()
            .take(HOURLY_SAMPLES)
            .copied()
            .collect(),
        hourly_times: raw
            .hourly
            .time
            .iter()
            .take(HOURLY_SAMPLES)
            .map(|t| time_of_day(t).to_owned())
            .collect(),
    })
}

pub fn format_forecast(raw: &RawForecast) -> Result<Vec<DailyForecast>, ForecastFormatError> {
    let daily = &raw.daily;

    (0..FORECAST_DAYS)
        .map(|day| {
            let date = daily
                .time
                .get(day)
                .ok_or(ForecastFormatError::MissingData("daily dates"))?;
            let max_temp = *daily
                .temperature_2m_max
                .get(day)
                .ok_or(ForecastFormatError::MissingData("daily maximum"))?;
            let min_temp = *daily
                .temperature_2m_min
                .get(day)
                .ok_or(ForecastFormatError::MissingData("daily minimum"))?;
            let code = *daily
                .weathercode
                .get(day)
                .ok_or(ForecastFormatError::MissingData("daily weather codes"))?;

            Ok(DailyForecast {
                date: date.clone(),
                max_temp,
                min_temp,
                icon: code.map_or(DEFAULT_ICON, weather_icon),
                precipitation: daily
                    .precipitation_probability_max
                    .get(day)
                    .copied()
                    .flatten(),
            })
        })
        .collect()
}

/// `2024-05-01T06:12` -> `06:12`
fn time_of_day(timestamp: &str) -> &str {
    timestamp
        .split_once('T')
        .map_or(timestamp, |(_, time)| time)
}
