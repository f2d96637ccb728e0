use chrono::Utc;
use nimbus_core::{AccountId, FavoriteCity, FavoritesStore, FavoritesStoreError};

#[derive(Debug, thiserror::Error)]
pub enum ToggleFavoriteError {
    #[error("City name is required")]
    MissingCity,
    #[error("Valid latitude and longitude are required")]
    InvalidCoordinates,
    #[error("Favorites store error: {0}")]
    FavoritesStoreError(#[from] FavoritesStoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl ToggleOutcome {
    pub fn is_favorite(&self) -> bool {
        matches!(self, ToggleOutcome::Added)
    }

    pub fn message(&self) -> &'static str {
        match self {
            ToggleOutcome::Added => "Added to favorites",
            ToggleOutcome::Removed => "Removed from favorites",
        }
    }
}

/// Toggle favorite use case - adds the city if absent, removes it otherwise
pub struct ToggleFavoriteUseCase<'a, F>
where
    F: FavoritesStore + ?Sized,
{
    favorites: &'a F,
}

impl<'a, F> ToggleFavoriteUseCase<'a, F>
where
    F: FavoritesStore + ?Sized,
{
    pub fn new(favorites: &'a F) -> Self {
        Self { favorites }
    }

    #[tracing::instrument(name = "ToggleFavoriteUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        account_id: AccountId,
        city_name: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<ToggleOutcome, ToggleFavoriteError> {
        let city_name = city_name
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty())
            .ok_or(ToggleFavoriteError::MissingCity)?;
        let (latitude, longitude) = match (latitude, longitude) {
            (Some(lat), Some(lon))
                if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) =>
            {
                (lat, lon)
            }
            _ => return Err(ToggleFavoriteError::InvalidCoordinates),
        };

        let favorite = FavoriteCity {
            account_id,
            city_name,
            latitude,
            longitude,
            added_at: Utc::now(),
        };

        if self.favorites.toggle_favorite(&favorite).await? {
            Ok(ToggleOutcome::Added)
        } else {
            Ok(ToggleOutcome::Removed)
        }
    }
}
