use askama::Template;
use axum::response::Html;
use nimbus_core::{FavoriteCity, RecentSearch, WeatherReport};

use crate::error::PageError;

pub fn render(page: &impl Template) -> Result<Html<String>, PageError> {
    Ok(Html(page.render()?))
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage<'a> {
    /// Prefilled from the last-used-email cookie.
    pub email: &'a str,
    pub error: Option<&'a str>,
    pub success: Option<&'a str>,
    pub session_ended: bool,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub error: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "forgot_password.html")]
pub struct ForgotPasswordPage<'a> {
    pub success: Option<&'a str>,
    pub error: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "reset_password.html")]
pub struct ResetPasswordPage<'a> {
    pub token: &'a str,
    pub error: Option<&'a str>,
}

pub struct HourlySample<'a> {
    pub time: &'a str,
    pub temperature: Option<f64>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage<'a> {
    pub display_name: &'a str,
    pub theme: &'a str,
    pub language: &'a str,
    pub city: &'a str,
    pub favorites: &'a [FavoriteCity],
    pub recent_searches: &'a [RecentSearch],
    pub weather: Option<&'a WeatherReport>,
    pub hourly: Vec<HourlySample<'a>>,
    pub error: Option<&'a str>,
}

impl<'a> DashboardPage<'a> {
    pub fn hourly_samples(report: Option<&'a WeatherReport>) -> Vec<HourlySample<'a>> {
        report
            .map(|report| {
                report
                    .current
                    .hourly_times
                    .iter()
                    .zip(&report.current.hourly_temps)
                    .map(|(time, temperature)| HourlySample {
                        time,
                        temperature: *temperature,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub message: &'a str,
}
