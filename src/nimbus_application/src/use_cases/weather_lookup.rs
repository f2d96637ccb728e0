use nimbus_core::{
    FavoritesStoreError, ForecastFormatError, GeoLocation, Language, WeatherError, WeatherGateway,
    WeatherReport, format_current, format_forecast,
};

#[derive(Debug, thiserror::Error)]
pub enum WeatherLookupError {
    #[error("Please enter a city.")]
    EmptyCity,
    #[error("City not found.")]
    CityNotFound,
    #[error("Could not get the weather.")]
    Unavailable(String),
    #[error("Favorites store error: {0}")]
    FavoritesStoreError(#[from] FavoritesStoreError),
}

impl From<WeatherError> for WeatherLookupError {
    fn from(e: WeatherError) -> Self {
        match e {
            WeatherError::CityNotFound => Self::CityNotFound,
            WeatherError::Unavailable(reason) => Self::Unavailable(reason),
        }
    }
}

impl From<ForecastFormatError> for WeatherLookupError {
    fn from(e: ForecastFormatError) -> Self {
        Self::Unavailable(e.to_string())
    }
}

/// Fetches the forecast for an already geocoded place and shapes it for display.
/// Either the whole report is produced or none of it.
pub(crate) async fn fetch_report<W>(
    gateway: &W,
    location: &GeoLocation,
) -> Result<WeatherReport, WeatherLookupError>
where
    W: WeatherGateway + ?Sized,
{
    let raw = gateway
        .fetch_forecast(location.latitude, location.longitude)
        .await?;

    Ok(WeatherReport {
        current: format_current(&raw, location)?,
        forecast: format_forecast(&raw)?,
        is_favorite: false,
    })
}

/// Anonymous weather lookup backing the public JSON endpoint. Nothing is recorded.
pub struct WeatherLookupUseCase<'a, W>
where
    W: WeatherGateway + ?Sized,
{
    gateway: &'a W,
}

impl<'a, W> WeatherLookupUseCase<'a, W>
where
    W: WeatherGateway + ?Sized,
{
    pub fn new(gateway: &'a W) -> Self {
        Self { gateway }
    }

    #[tracing::instrument(name = "WeatherLookupUseCase::execute", skip(self))]
    pub async fn execute(&self, city: &str) -> Result<WeatherReport, WeatherLookupError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherLookupError::EmptyCity);
        }

        let location = self.gateway.geocode(city, &Language::default()).await?;
        fetch_report(self.gateway, &location).await
    }
}
