use chrono::Utc;
use nimbus_core::{
    AccountId, FavoritesStore, Language, SearchHistoryEntry, SearchHistoryStore, WeatherGateway,
    WeatherReport,
};

use super::weather_lookup::{WeatherLookupError, fetch_report};

/// Dashboard city search - geocodes in the account's language, records the
/// search, then fetches and formats the forecast.
pub struct SearchWeatherUseCase<'a, W, H, F>
where
    W: WeatherGateway + ?Sized,
    H: SearchHistoryStore + ?Sized,
    F: FavoritesStore + ?Sized,
{
    gateway: &'a W,
    history: &'a H,
    favorites: &'a F,
}

impl<'a, W, H, F> SearchWeatherUseCase<'a, W, H, F>
where
    W: WeatherGateway + ?Sized,
    H: SearchHistoryStore + ?Sized,
    F: FavoritesStore + ?Sized,
{
    pub fn new(gateway: &'a W, history: &'a H, favorites: &'a F) -> Self {
        Self {
            gateway,
            history,
            favorites,
        }
    }

    #[tracing::instrument(name = "SearchWeatherUseCase::execute", skip(self, language))]
    pub async fn execute(
        &self,
        account_id: AccountId,
        city: &str,
        language: &Language,
    ) -> Result<WeatherReport, WeatherLookupError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherLookupError::EmptyCity);
        }

        let location = self.gateway.geocode(city, language).await?;

        // Only geocoded lookups are recorded; losing one is not worth failing the search over.
        let entry = SearchHistoryEntry::from_location(account_id, &location, Utc::now());
        if let Err(e) = self.history.record_search(&entry).await {
            tracing::warn!(error = %e, "failed to record search history");
        }

        let mut report = fetch_report(self.gateway, &location).await?;
        report.is_favorite = self
            .favorites
            .is_favorite(&account_id, &location.name)
            .await?;

        Ok(report)
    }
}
