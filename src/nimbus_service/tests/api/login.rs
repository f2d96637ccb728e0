use crate::helpers::{PASSWORD, location, random_email, spawn_app};

const GENERIC_LOGIN_ERROR: &str = "Incorrect email or password.";

#[tokio::test]
async fn index_redirects_to_login() {
    let app = spawn_app().await;

    let response = app.get("/").await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn wrong_password_and_unknown_email_get_the_same_error() {
    let app = spawn_app().await;
    let email = random_email();
    app.register("Alice", &email, PASSWORD).await;

    let wrong_password = app.login(&email, "wrong-password").await;
    let unknown_email = app.login(&random_email(), PASSWORD).await;

    assert_eq!(wrong_password.status().as_u16(), 200);
    assert_eq!(unknown_email.status().as_u16(), 200);
    assert!(wrong_password.text().await.unwrap().contains(GENERIC_LOGIN_ERROR));
    assert!(unknown_email.text().await.unwrap().contains(GENERIC_LOGIN_ERROR));
}

#[tokio::test]
async fn login_opens_the_dashboard_and_remembers_the_email() {
    let app = spawn_app().await;
    let email = random_email();
    app.register("Alice", &email, PASSWORD).await;

    let response = app.login(&email, PASSWORD).await;
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/dashboard");

    let dashboard = app.get("/dashboard").await;
    assert_eq!(dashboard.status().as_u16(), 200);
    assert!(dashboard.text().await.unwrap().contains("Alice"));

    let login_page = app.get("/login").await.text().await.unwrap();
    assert!(login_page.contains(&format!("value=\"{email}\"")));
}

#[tokio::test]
async fn remember_me_makes_the_session_cookie_persistent() {
    let app = spawn_app().await;
    let email = random_email();
    app.register("Alice", &email, PASSWORD).await;

    let plain = app.login(&email, PASSWORD).await;
    let remembered = app
        .post_form(
            "/login",
            &[("email", email.as_str()), ("password", PASSWORD), ("remember", "on")],
        )
        .await;

    let session_cookie = |response: &reqwest::Response| {
        response
            .headers()
            .get_all(reqwest::header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.starts_with("nimbus_session="))
            .map(str::to_owned)
            .expect("no session cookie set")
    };
    let plain = session_cookie(&plain);
    let remembered = session_cookie(&remembered);

    assert!(plain.contains("HttpOnly"));
    assert!(!plain.contains("Max-Age"));
    assert!(remembered.contains("Max-Age=604800"));
}

#[tokio::test]
async fn dashboard_requires_a_session() {
    let app = spawn_app().await;

    let response = app.get("/dashboard").await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = spawn_app().await;
    app.logged_in_account().await;

    let response = app.get("/logout").await;
    assert_eq!(location(&response), "/login");

    assert_eq!(location(&app.get("/dashboard").await), "/login");
    let login_page = app.get("/login").await.text().await.unwrap();
    assert!(login_page.contains("Your session has ended."));
}

#[tokio::test]
async fn logout_without_a_session_still_redirects() {
    let app = spawn_app().await;

    let response = app.get("/logout").await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/login");
}
