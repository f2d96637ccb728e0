use serde_json::{Value, json};

use crate::helpers::spawn_app;

#[tokio::test]
async fn weather_api_returns_the_dashboard_report_shape() {
    let app = spawn_app().await;
    app.mock_city("Lisbon", 38.72, -9.13).await;
    app.mock_forecast(200).await;

    let response = app.get("/api/weather/Lisbon").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["current"]["city"], json!("Lisbon"));
    assert_eq!(body["current"]["weather_icon"], json!("⛅"));
    assert_eq!(body["forecast"].as_array().unwrap().len(), 7);
    assert_eq!(body["is_favorite"], json!(false));
}

#[tokio::test]
async fn weather_api_reports_unknown_cities_as_not_found() {
    let app = spawn_app().await;
    app.mock_unknown_city("Nowhereville").await;

    let response = app.get("/api/weather/Nowhereville").await;

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"error": "City not found."})
    );
}

#[tokio::test]
async fn weather_api_reports_upstream_failure_as_unavailable() {
    let app = spawn_app().await;
    app.mock_city("Lisbon", 38.72, -9.13).await;
    app.mock_forecast(500).await;

    let response = app.get("/api/weather/Lisbon").await;

    assert_eq!(response.status().as_u16(), 503);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"error": "Could not get the weather."})
    );
}
