use crate::helpers::spawn_app;

#[tokio::test]
async fn searching_a_city_shows_the_report_and_records_history() {
    let app = spawn_app().await;
    let email = app.logged_in_account().await;
    let account_id = app.account_id(&email).await;
    app.mock_city("Lisbon", 38.72, -9.13).await;
    app.mock_forecast(200).await;

    let response = app.post_form("/dashboard", &[("city", "Lisbon")]).await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("⛅ Lisbon"));
    assert!(body.contains("Sunrise: 07:41"));
    assert!(body.contains("2026-10-22"));
    assert!(body.contains("☆ Add to favorites"));
    assert_eq!(app.count_rows("search_history", &account_id).await, 1);

    let dashboard = app.get("/dashboard").await.text().await.unwrap();
    assert!(dashboard.contains("Lisbon"));
}

#[tokio::test]
async fn unknown_city_shows_not_found_and_writes_no_history() {
    let app = spawn_app().await;
    let email = app.logged_in_account().await;
    let account_id = app.account_id(&email).await;
    app.mock_unknown_city("Nowhereville").await;

    let response = app
        .post_form("/dashboard", &[("city", "Nowhereville")])
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("City not found."));
    assert_eq!(app.count_rows("search_history", &account_id).await, 0);
}

#[tokio::test]
async fn failing_forecast_shows_unavailable_without_partial_data() {
    let app = spawn_app().await;
    app.logged_in_account().await;
    app.mock_city("Lisbon", 38.72, -9.13).await;
    app.mock_forecast(500).await;

    let response = app.post_form("/dashboard", &[("city", "Lisbon")]).await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Could not get the weather."));
    assert!(!body.contains("favoriteBtn"));
}

#[tokio::test]
async fn blank_search_asks_for_a_city() {
    let app = spawn_app().await;
    app.logged_in_account().await;

    let response = app.post_form("/dashboard", &[("city", "   ")]).await;

    assert!(response.text().await.unwrap().contains("Please enter a city."));
}

#[tokio::test]
async fn favorite_city_is_marked_on_the_next_search() {
    let app = spawn_app().await;
    app.logged_in_account().await;
    app.mock_city("Lisbon", 38.72, -9.13).await;
    app.mock_forecast(200).await;
    app.post_json(
        "/api/favorite",
        &serde_json::json!({"city_name": "Lisbon", "latitude": 38.72, "longitude": -9.13}),
    )
    .await;

    let body = app
        .post_form("/dashboard", &[("city", "Lisbon")])
        .await
        .text()
        .await
        .unwrap();

    assert!(body.contains("★ Remove from favorites"));
}
