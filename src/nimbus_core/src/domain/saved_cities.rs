use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{account::AccountId, forecast::GeoLocation};

/// One geocoded lookup. Append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHistoryEntry {
    pub account_id: AccountId,
    pub city_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub searched_at: DateTime<Utc>,
}

impl SearchHistoryEntry {
    pub fn from_location(account_id: AccountId, location: &GeoLocation, now: DateTime<Utc>) -> Self {
        Self {
            account_id,
            city_name: location.name.clone(),
            latitude: Some(location.latitude),
            longitude: Some(location.longitude),
            searched_at: now,
        }
    }
}

/// A distinct recently searched city, as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentSearch {
    pub city_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A saved city. Unique per (account, city name).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavoriteCity {
    #[serde(skip)]
    pub account_id: AccountId,
    pub city_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub added_at: DateTime<Utc>,
}
