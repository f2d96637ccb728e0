use serde_json::{Value, json};

use crate::helpers::{location, spawn_app};

fn lisbon() -> Value {
    json!({"city_name": "Lisbon", "latitude": 38.72, "longitude": -9.13})
}

#[tokio::test]
async fn toggling_a_favorite_twice_leaves_no_row() {
    let app = spawn_app().await;
    let email = app.logged_in_account().await;
    let account_id = app.account_id(&email).await;

    let first: Value = app.post_json("/api/favorite", &lisbon()).await.json().await.unwrap();
    assert_eq!(
        first,
        json!({"success": true, "message": "Added to favorites", "is_favorite": true})
    );
    assert_eq!(app.count_rows("favorite_cities", &account_id).await, 1);

    let second: Value = app.post_json("/api/favorite", &lisbon()).await.json().await.unwrap();
    assert_eq!(second["is_favorite"], json!(false));
    assert_eq!(second["message"], json!("Removed from favorites"));
    assert_eq!(app.count_rows("favorite_cities", &account_id).await, 0);
}

#[tokio::test]
async fn favorite_without_a_city_is_a_bad_request() {
    let app = spawn_app().await;
    app.logged_in_account().await;

    let response = app
        .post_json("/api/favorite", &json!({"latitude": 1.0, "longitude": 2.0}))
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn malformed_json_bodies_get_the_api_failure_shape() {
    let app = spawn_app().await;
    app.logged_in_account().await;

    for path in ["/api/favorite", "/api/update-theme", "/api/update-language"] {
        let response = app.post_raw_json(path, "{not json").await;
        assert_eq!(response.status().as_u16(), 400, "{path}");

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], json!(false), "{path}");
        assert!(body["message"].is_string(), "{path}");
    }
}

#[tokio::test]
async fn favorite_requires_a_session() {
    let app = spawn_app().await;

    let response = app.post_json("/api/favorite", &lisbon()).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn clear_history_empties_the_recent_searches() {
    let app = spawn_app().await;
    let email = app.logged_in_account().await;
    let account_id = app.account_id(&email).await;
    app.mock_city("Lisbon", 38.72, -9.13).await;
    app.mock_forecast(200).await;
    app.post_form("/dashboard", &[("city", "Lisbon")]).await;
    assert_eq!(app.count_rows("search_history", &account_id).await, 1);

    let response = app.delete("/api/clear-history").await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json::<Value>().await.unwrap(), json!({"success": true}));
    assert_eq!(app.count_rows("search_history", &account_id).await, 0);
}

#[tokio::test]
async fn deleting_the_account_removes_everything_it_owns() {
    let app = spawn_app().await;
    let email = app.logged_in_account().await;
    let account_id = app.account_id(&email).await;
    app.mock_city("Lisbon", 38.72, -9.13).await;
    app.mock_forecast(200).await;
    app.post_form("/dashboard", &[("city", "Lisbon")]).await;
    app.post_json("/api/favorite", &lisbon()).await;
    app.post_form("/forgot-password", &[("email", email.as_str())]).await;

    let response = app.delete("/api/account").await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json::<Value>().await.unwrap(), json!({"success": true}));
    for table in ["search_history", "favorite_cities", "password_reset_tokens"] {
        assert_eq!(app.count_rows(table, &account_id).await, 0, "{table}");
    }
    let accounts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE id = ?")
        .bind(&account_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(accounts, 0);
    assert_eq!(location(&app.get("/dashboard").await), "/login");
}
