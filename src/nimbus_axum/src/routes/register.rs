use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use nimbus_application::{RegisterError, RegisterUseCase, Registration};
use secrecy::Secret;
use serde::Deserialize;

use super::secret_or_empty;
use crate::{
    error::PageError,
    notice::Notice,
    state::AppState,
    templates::{RegisterPage, render},
};

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub password: Option<Secret<String>>,
}

pub async fn register_page() -> Result<Response, PageError> {
    let page = RegisterPage {
        name: "",
        email: "",
        error: None,
    };
    Ok(render(&page)?.into_response())
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, PageError> {
    let registration = Registration {
        display_name: form.name.clone(),
        email: Secret::new(form.email.clone()),
        password: secret_or_empty(form.password),
    };

    let use_case = RegisterUseCase::new(&*state.accounts, state.credentials(), state.notifier());

    match use_case.execute(registration).await {
        Ok(_) => Ok(Redirect::to(&format!("/login?{}", Notice::Registered.success())).into_response()),
        Err(
            e @ (RegisterError::MissingFields
            | RegisterError::InvalidEmail
            | RegisterError::EmailAlreadyRegistered),
        ) => {
            let message = e.to_string();
            let page = RegisterPage {
                name: &form.name,
                email: &form.email,
                error: Some(&message),
            };
            Ok(render(&page)?.into_response())
        }
        Err(e) => Err(PageError::unexpected(e)),
    }
}
