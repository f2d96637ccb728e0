use serde_json::{Value, json};

use crate::helpers::spawn_app;

#[tokio::test]
async fn update_theme_requires_a_session() {
    let app = spawn_app().await;

    let response = app
        .post_json("/api/update-theme", &json!({"theme": "light"}))
        .await;

    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Not authenticated"));
}

#[tokio::test]
async fn update_theme_persists_and_renders() {
    let app = spawn_app().await;
    let email = app.logged_in_account().await;

    let response = app
        .post_json("/api/update-theme", &json!({"theme": "light"}))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json::<Value>().await.unwrap(), json!({"success": true}));
    let theme: String = sqlx::query_scalar("SELECT theme FROM accounts WHERE email = ?")
        .bind(&email)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(theme, "light");
    let dashboard = app.get("/dashboard").await.text().await.unwrap();
    assert!(dashboard.contains("data-theme=\"light\""));
}

#[tokio::test]
async fn omitted_theme_falls_back_to_dark_and_unknown_theme_is_rejected() {
    let app = spawn_app().await;
    let email = app.logged_in_account().await;
    app.post_json("/api/update-theme", &json!({"theme": "light"}))
        .await;

    let omitted = app.post_json("/api/update-theme", &json!({})).await;
    assert_eq!(omitted.status().as_u16(), 200);

    let rejected = app
        .post_json("/api/update-theme", &json!({"theme": "blue"}))
        .await;
    assert_eq!(rejected.status().as_u16(), 400);

    let theme: String = sqlx::query_scalar("SELECT theme FROM accounts WHERE email = ?")
        .bind(&email)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(theme, "dark");
}

#[tokio::test]
async fn update_language_validates_the_code() {
    let app = spawn_app().await;
    let email = app.logged_in_account().await;

    let accepted = app
        .post_json("/api/update-language", &json!({"language": "en"}))
        .await;
    let rejected = app
        .post_json("/api/update-language", &json!({"language": "not a language!"}))
        .await;

    assert_eq!(accepted.status().as_u16(), 200);
    assert_eq!(rejected.status().as_u16(), 400);
    let language: String = sqlx::query_scalar("SELECT language FROM accounts WHERE email = ?")
        .bind(&email)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(language, "en");
}
