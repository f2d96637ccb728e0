//! In-memory doubles for the ports, shared by the use-case tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nimbus_core::{
    Account, AccountId, AccountStore, AccountStoreError, CredentialError, DisplayName, Email,
    EmailClient, EmailMessage, FavoriteCity, FavoritesStore, FavoritesStoreError, GeoLocation,
    HistoryStoreError, Language, Password, PasswordHash, PasswordHasher, RawCurrentWeather,
    RawDaily, RawForecast, RawHourly, RecentSearch, ResetClaims, ResetToken, ResetTokenError,
    ResetTokenRecord, ResetTokenSigner, ResetTokenStore, ResetTokenStoreError,
    SearchHistoryEntry, SearchHistoryStore, Theme, VerificationToken, WeatherError,
    WeatherGateway,
};
use secrecy::{ExposeSecret, Secret};

pub fn password(value: &str) -> Password {
    Password::try_from(Secret::new(value.to_owned())).unwrap()
}

pub fn email(value: &str) -> Email {
    Email::try_from(Secret::new(value.to_owned())).unwrap()
}

#[derive(Default)]
struct Tables {
    accounts: HashMap<AccountId, Account>,
    reset_tokens: Vec<ResetTokenRecord>,
    history: Vec<SearchHistoryEntry>,
    favorites: Vec<FavoriteCity>,
}

/// All four stores over one set of maps, so cascades and cross-table
/// updates behave like the real database.
#[derive(Default)]
pub struct InMemoryDatabase {
    tables: Mutex<Tables>,
}

impl InMemoryDatabase {
    /// Adds a verified account whose password hashes with [`FakeHasher`].
    pub async fn seed_account(&self, address: &str, plaintext: &str) -> AccountId {
        let mut account = Account::register(
            DisplayName::try_from("Seeded".to_owned()).unwrap(),
            email(address),
            FakeHasher::hash_with_salt(0, plaintext),
            VerificationToken::generate(),
            Utc::now(),
        );
        account.email_verified = true;
        account.verification_token = None;
        let id = account.id;
        self.add_account(&account).await.unwrap();
        id
    }

    pub fn account(&self, id: &AccountId) -> Option<Account> {
        self.tables.lock().unwrap().accounts.get(id).cloned()
    }

    pub fn account_count(&self) -> usize {
        self.tables.lock().unwrap().accounts.len()
    }

    pub fn history_of(&self, id: &AccountId) -> Vec<SearchHistoryEntry> {
        let tables = self.tables.lock().unwrap();
        tables
            .history
            .iter()
            .filter(|h| h.account_id == *id)
            .cloned()
            .collect()
    }

    pub fn favorites_of(&self, id: &AccountId) -> Vec<FavoriteCity> {
        let tables = self.tables.lock().unwrap();
        tables
            .favorites
            .iter()
            .filter(|f| f.account_id == *id)
            .cloned()
            .collect()
    }

    pub fn reset_tokens_of(&self, id: &AccountId) -> Vec<ResetTokenRecord> {
        let tables = self.tables.lock().unwrap();
        tables
            .reset_tokens
            .iter()
            .filter(|r| r.account_id == *id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AccountStore for InMemoryDatabase {
    async fn add_account(&self, account: &Account) -> Result<(), AccountStoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .accounts
            .values()
            .any(|a| a.email.as_str() == account.email.as_str())
        {
            return Err(AccountStoreError::EmailAlreadyRegistered);
        }
        tables.accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .accounts
            .values()
            .find(|a| a.email.as_str() == email.as_str())
            .cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError> {
        Ok(self.account(id))
    }

    async fn verify_email(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<AccountId>, AccountStoreError> {
        let mut tables = self.tables.lock().unwrap();
        let account = tables
            .accounts
            .values_mut()
            .find(|a| a.verification_token.as_ref() == Some(token));
        Ok(account.map(|a| {
            a.email_verified = true;
            a.verification_token = None;
            a.id
        }))
    }

    async fn update_theme(&self, id: &AccountId, theme: Theme) -> Result<(), AccountStoreError> {
        let mut tables = self.tables.lock().unwrap();
        let account = tables
            .accounts
            .get_mut(id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        account.theme = theme;
        Ok(())
    }

    async fn update_language(
        &self,
        id: &AccountId,
        language: &Language,
    ) -> Result<(), AccountStoreError> {
        let mut tables = self.tables.lock().unwrap();
        let account = tables
            .accounts
            .get_mut(id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        account.language = language.clone();
        Ok(())
    }

    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountStoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables
            .accounts
            .remove(id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        tables.reset_tokens.retain(|r| r.account_id != *id);
        tables.history.retain(|h| h.account_id != *id);
        tables.favorites.retain(|f| f.account_id != *id);
        Ok(())
    }
}

#[async_trait]
impl ResetTokenStore for InMemoryDatabase {
    async fn add_token(&self, record: &ResetTokenRecord) -> Result<(), ResetTokenStoreError> {
        self.tables.lock().unwrap().reset_tokens.push(record.clone());
        Ok(())
    }

    async fn find_token(
        &self,
        token: &ResetToken,
    ) -> Result<Option<ResetTokenRecord>, ResetTokenStoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .reset_tokens
            .iter()
            .find(|r| r.token == *token)
            .cloned())
    }

    async fn redeem(
        &self,
        token: &ResetToken,
        new_password_hash: &PasswordHash,
        now: DateTime<Utc>,
    ) -> Result<(), ResetTokenStoreError> {
        let mut tables = self.tables.lock().unwrap();
        let record = tables
            .reset_tokens
            .iter_mut()
            .find(|r| r.token == *token)
            .ok_or(ResetTokenStoreError::TokenNotFound)?;
        if record.used || now >= record.expires_at {
            return Err(ResetTokenStoreError::TokenUnavailable);
        }
        record.used = true;
        let account_id = record.account_id;

        match tables.accounts.get_mut(&account_id) {
            Some(account) => {
                account.password_hash = new_password_hash.clone();
                Ok(())
            }
            None => Err(ResetTokenStoreError::UnexpectedError(
                "account vanished".to_owned(),
            )),
        }
    }
}

#[async_trait]
impl SearchHistoryStore for InMemoryDatabase {
    async fn record_search(&self, entry: &SearchHistoryEntry) -> Result<(), HistoryStoreError> {
        self.tables.lock().unwrap().history.push(entry.clone());
        Ok(())
    }

    async fn recent_searches(
        &self,
        account_id: &AccountId,
        limit: u32,
    ) -> Result<Vec<RecentSearch>, HistoryStoreError> {
        let mut entries = self.history_of(account_id);
        entries.sort_by(|a, b| b.searched_at.cmp(&a.searched_at));

        let mut recent: Vec<RecentSearch> = Vec::new();
        for entry in entries {
            let candidate = RecentSearch {
                city_name: entry.city_name,
                latitude: entry.latitude,
                longitude: entry.longitude,
            };
            if !recent.contains(&candidate) {
                recent.push(candidate);
            }
        }
        recent.truncate(limit as usize);
        Ok(recent)
    }

    async fn clear_history(&self, account_id: &AccountId) -> Result<u64, HistoryStoreError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.history.len();
        tables.history.retain(|h| h.account_id != *account_id);
        Ok((before - tables.history.len()) as u64)
    }
}

#[async_trait]
impl FavoritesStore for InMemoryDatabase {
    async fn toggle_favorite(&self, favorite: &FavoriteCity) -> Result<bool, FavoritesStoreError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.favorites.len();
        tables.favorites.retain(|f| {
            !(f.account_id == favorite.account_id && f.city_name == favorite.city_name)
        });
        if tables.favorites.len() < before {
            return Ok(false);
        }
        tables.favorites.push(favorite.clone());
        Ok(true)
    }

    async fn list_favorites(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<FavoriteCity>, FavoritesStoreError> {
        let mut favorites = self.favorites_of(account_id);
        favorites.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        Ok(favorites)
    }

    async fn is_favorite(
        &self,
        account_id: &AccountId,
        city_name: &str,
    ) -> Result<bool, FavoritesStoreError> {
        Ok(self
            .favorites_of(account_id)
            .iter()
            .any(|f| f.city_name == city_name))
    }
}

/// Reversible stand-in for Argon2: `fake:<salt>:<plaintext>`.
#[derive(Default)]
pub struct FakeHasher {
    salt: AtomicU64,
}

impl FakeHasher {
    fn hash_with_salt(salt: u64, plaintext: &str) -> PasswordHash {
        PasswordHash::new(format!("fake:{salt}:{plaintext}"))
    }
}

#[async_trait]
impl PasswordHasher for FakeHasher {
    async fn hash_password(&self, password: &Password) -> Result<PasswordHash, CredentialError> {
        let salt = self.salt.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Self::hash_with_salt(
            salt,
            password.as_ref().expose_secret(),
        ))
    }

    async fn verify_password(
        &self,
        candidate: &Password,
        expected: &PasswordHash,
    ) -> Result<bool, CredentialError> {
        let stored = expected.as_ref().expose_secret();
        let plaintext = stored
            .splitn(3, ':')
            .nth(2)
            .ok_or_else(|| CredentialError::HashingFailed("malformed fake hash".to_owned()))?;
        Ok(plaintext == candidate.as_ref().expose_secret())
    }
}

/// `signed|<account id>|<unix expiry>|<nonce>`; anything else is a forgery.
pub struct FakeSigner;

impl ResetTokenSigner for FakeSigner {
    fn sign(
        &self,
        account_id: &AccountId,
        expires_at: DateTime<Utc>,
    ) -> Result<ResetToken, ResetTokenError> {
        let raw = format!(
            "signed|{account_id}|{}|{}",
            expires_at.timestamp(),
            uuid::Uuid::new_v4()
        );
        ResetToken::parse(raw).map_err(|e| ResetTokenError::SigningFailed(e.to_string()))
    }

    fn verify(&self, token: &ResetToken) -> Result<ResetClaims, ResetTokenError> {
        let parts: Vec<&str> = token.as_str().split('|').collect();
        let [prefix, account_id, expiry, _nonce] = parts.as_slice() else {
            return Err(ResetTokenError::Invalid);
        };
        if *prefix != "signed" {
            return Err(ResetTokenError::Invalid);
        }
        let account_id = AccountId::parse(account_id).map_err(|_| ResetTokenError::Invalid)?;
        let expires_at = expiry
            .parse::<i64>()
            .ok()
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .ok_or(ResetTokenError::Invalid)?;
        if expires_at <= Utc::now() {
            return Err(ResetTokenError::Expired);
        }
        Ok(ResetClaims {
            account_id,
            expires_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

#[derive(Default)]
pub struct RecordingEmailClient {
    pub sent: Mutex<Vec<SentEmail>>,
    pub fail: bool,
}

impl RecordingEmailClient {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(&self, recipient: &Email, message: &EmailMessage) -> Result<(), String> {
        if self.fail {
            return Err("smtp relay refused the message".to_owned());
        }
        self.sent.lock().unwrap().push(SentEmail {
            recipient: recipient.as_str().to_owned(),
            subject: message.subject.clone(),
            html_body: message.html_body.clone(),
            text_body: message.text_body.clone(),
        });
        Ok(())
    }
}

/// Knows a fixed set of cities; answers every forecast with `forecast`.
pub struct StubWeatherGateway {
    pub cities: HashMap<String, GeoLocation>,
    pub forecast: Result<RawForecast, WeatherError>,
    pub geocode_calls: AtomicUsize,
    pub languages: Mutex<Vec<String>>,
}

impl StubWeatherGateway {
    pub fn with_city(name: &str, latitude: f64, longitude: f64) -> Self {
        let mut cities = HashMap::new();
        cities.insert(
            name.to_lowercase(),
            GeoLocation {
                name: name.to_owned(),
                latitude,
                longitude,
            },
        );
        Self {
            cities,
            forecast: Ok(sample_forecast()),
            geocode_calls: AtomicUsize::new(0),
            languages: Mutex::new(Vec::new()),
        }
    }

    pub fn forecast_failing(mut self) -> Self {
        self.forecast = Err(WeatherError::Unavailable("status 500".to_owned()));
        self
    }
}

#[async_trait]
impl WeatherGateway for StubWeatherGateway {
    async fn geocode(&self, city: &str, language: &Language) -> Result<GeoLocation, WeatherError> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);
        self.languages
            .lock()
            .unwrap()
            .push(language.as_str().to_owned());
        self.cities
            .get(&city.to_lowercase())
            .cloned()
            .ok_or(WeatherError::CityNotFound)
    }

    async fn fetch_forecast(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<RawForecast, WeatherError> {
        self.forecast.clone()
    }
}

pub fn sample_forecast() -> RawForecast {
    RawForecast {
        current_weather: RawCurrentWeather {
            temperature: 24.5,
            windspeed: 11.2,
            winddirection: 140.0,
            weathercode: 2,
        },
        daily: RawDaily {
            time: (1..=7).map(|d| format!("2026-10-{d:02}")).collect(),
            temperature_2m_max: (0..7).map(|d| Some(28.0 + d as f64)).collect(),
            temperature_2m_min: (0..7).map(|d| Some(18.0 + d as f64)).collect(),
            sunrise: (1..=7).map(|d| format!("2026-10-{d:02}T05:41")).collect(),
            sunset: (1..=7).map(|d| format!("2026-10-{d:02}T18:02")).collect(),
            weathercode: vec![Some(0), Some(1), Some(2), Some(3), Some(61), Some(95), None],
            precipitation_probability_max: vec![Some(0.0); 7],
        },
        hourly: RawHourly {
            time: (0..48)
                .map(|h| format!("2026-10-{:02}T{:02}:00", 1 + h / 24, h % 24))
                .collect(),
            temperature_2m: (0..48).map(|h| Some(15.0 + (h % 24) as f64 / 2.0)).collect(),
            relative_humidity_2m: (0..48).map(|_| Some(63.0)).collect(),
        },
    }
}
