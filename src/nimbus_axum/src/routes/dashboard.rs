use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use nimbus_adapters::session::create_removal_cookie;
use nimbus_application::{
    DashboardError, DashboardUseCase, DashboardView, SearchWeatherUseCase, WeatherLookupError,
};
use nimbus_core::{AccountId, WeatherReport};
use serde::Deserialize;

use crate::{
    error::PageError,
    session::SessionAccount,
    state::AppState,
    templates::{DashboardPage, render},
};

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub city: String,
}

/// `None` when the session points at an account that no longer exists.
async fn load_view(
    state: &AppState,
    account_id: AccountId,
) -> Result<Option<DashboardView>, PageError> {
    match DashboardUseCase::new(&*state.accounts, &*state.history, &*state.favorites)
        .execute(account_id)
        .await
    {
        Ok(view) => Ok(Some(view)),
        Err(DashboardError::AccountNotFound) => Ok(None),
        Err(e) => Err(PageError::unexpected(e)),
    }
}

fn signed_out(state: &AppState, jar: CookieJar) -> Response {
    (jar.add(create_removal_cookie(&state.session)), Redirect::to("/login")).into_response()
}

fn render_dashboard(
    view: &DashboardView,
    city: &str,
    weather: Option<&WeatherReport>,
    error: Option<&str>,
) -> Result<Response, PageError> {
    let page = DashboardPage {
        display_name: view.account.display_name.as_str(),
        theme: view.account.theme.as_str(),
        language: view.account.language.as_str(),
        city,
        favorites: &view.favorites,
        recent_searches: &view.recent_searches,
        weather,
        hourly: DashboardPage::hourly_samples(weather),
        error,
    };
    Ok(render(&page)?.into_response())
}

#[tracing::instrument(name = "Dashboard", skip_all)]
pub async fn dashboard(
    State(state): State<AppState>,
    SessionAccount(account_id): SessionAccount,
    jar: CookieJar,
) -> Result<Response, PageError> {
    let Some(view) = load_view(&state, account_id).await? else {
        return Ok(signed_out(&state, jar));
    };

    render_dashboard(&view, "", None, None)
}

#[tracing::instrument(name = "Dashboard search", skip_all)]
pub async fn search_dashboard(
    State(state): State<AppState>,
    SessionAccount(account_id): SessionAccount,
    jar: CookieJar,
    Form(form): Form<SearchForm>,
) -> Result<Response, PageError> {
    let Some(view) = load_view(&state, account_id).await? else {
        return Ok(signed_out(&state, jar));
    };

    let outcome = SearchWeatherUseCase::new(&*state.weather, &*state.history, &*state.favorites)
        .execute(account_id, &form.city, &view.account.language)
        .await;

    match outcome {
        Ok(report) => render_dashboard(&view, &report.current.city, Some(&report), None),
        Err(
            e @ (WeatherLookupError::EmptyCity
            | WeatherLookupError::CityNotFound
            | WeatherLookupError::Unavailable(_)),
        ) => {
            if let WeatherLookupError::Unavailable(cause) = &e {
                tracing::warn!(%cause, "weather upstream unavailable");
            }
            render_dashboard(&view, form.city.trim(), None, Some(&e.to_string()))
        }
        Err(e) => Err(PageError::unexpected(e)),
    }
}
