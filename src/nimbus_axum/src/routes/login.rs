use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use nimbus_adapters::{
    config::defaults::SESSION_ENDED_COOKIE_NAME,
    session::{create_last_email_cookie, generate_session_cookie},
};
use nimbus_application::{LoginError, LoginUseCase};
use secrecy::Secret;
use serde::Deserialize;

use super::secret_or_empty;
use crate::{
    error::PageError,
    notice::NoticeQuery,
    state::AppState,
    templates::{LoginPage, render},
};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    pub password: Option<Secret<String>>,
    /// Present (as `on`) only when the checkbox is ticked.
    pub remember: Option<String>,
}

pub async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<NoticeQuery>,
) -> Result<Response, PageError> {
    let page = LoginPage {
        email: jar
            .get(&state.session.last_email_cookie_name)
            .map(|cookie| cookie.value())
            .unwrap_or_default(),
        error: query.error_message(),
        success: query.success_message(),
        session_ended: jar.get(SESSION_ENDED_COOKIE_NAME).is_some(),
    };
    Ok(render(&page)?.into_response())
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    let use_case = LoginUseCase::new(&*state.accounts, state.credentials());

    let account = match use_case
        .execute(Secret::new(form.email.clone()), secret_or_empty(form.password))
        .await
    {
        Ok(account) => account,
        Err(e @ LoginError::InvalidCredentials) => {
            let message = e.to_string();
            let page = LoginPage {
                email: &form.email,
                error: Some(&message),
                success: None,
                session_ended: false,
            };
            return Ok(render(&page)?.into_response());
        }
        Err(e) => return Err(PageError::unexpected(e)),
    };

    let remember_me = form.remember.is_some();
    let session_cookie = generate_session_cookie(&account.id, remember_me, &state.session)
        .map_err(PageError::unexpected)?;
    let jar = jar
        .add(session_cookie)
        .add(create_last_email_cookie(&account.email, &state.session));

    tracing::info!(account_id = %account.id, remember_me, "logged in");
    Ok((jar, Redirect::to("/dashboard")).into_response())
}
