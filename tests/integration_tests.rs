//! End-to-end tests: HTTP router -> chat service -> provider client against a mock provider

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use travelchat::{ChatReply, ChatService, Day, TravelChatConfig, web};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> TravelChatConfig {
    let mut config = TravelChatConfig::default();
    config.weather.api_key = Some("integration-key".to_string());
    config.weather.base_url = server.uri();
    config.chat.preferred_country = Some("India".to_string());
    config.apply_defaults();
    config.validate().unwrap();
    config
}

fn app_for(config: &TravelChatConfig) -> Router {
    let service = Arc::new(ChatService::from_config(config).unwrap());
    web::app(&config.server, service)
}

async fn ask(app: Router, message: &str) -> ChatReply {
    let response = app
        .oneshot(
            Request::post("/api/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "message": message }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn mount_mumbai_search(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "mumbai"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Mumbai", "region": "Maharashtra", "country": "India", "lat": 18.98, "lon": 72.83}
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_current_weather_for_aliased_city() {
    let server = MockServer::start().await;
    mount_mumbai_search(&server).await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", "18.98,72.83"))
        .and(query_param("key", "integration-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": {"name": "Mumbai"},
            "current": {
                "temp_c": 29.0, "feelslike_c": 33.1, "humidity": 79, "wind_kph": 14.4,
                "condition": {"text": "Mist", "code": 1030}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = ask(app_for(&config_for(&server)), "What's the weather in Bombay?").await;

    assert_eq!(
        reply.reply,
        "Right now in Mumbai, Maharashtra, India: Mist, 29.0°C (feels like 33.1°C). Humidity 79%, wind 14.4 km/h."
    );
    let meta = reply.meta.unwrap();
    assert_eq!(meta.day, Day::Today);
    assert_eq!(meta.location.as_deref(), Some("Mumbai, Maharashtra, India"));
}

#[tokio::test]
async fn test_tomorrow_forecast_prefers_configured_country() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "Hyderabad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Hyderabad", "region": "Sindh", "country": "Pakistan", "lat": 25.37, "lon": 68.37},
            {"name": "Hyderabad", "region": "Telangana", "country": "India", "lat": 17.38, "lon": 78.47}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", "17.38,78.47"))
        .and(query_param("days", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "forecast": {"forecastday": [
                {"date": "2026-10-18", "day": {
                    "maxtemp_c": 31.0, "mintemp_c": 22.0, "avgtemp_c": 26.0, "maxwind_kph": 12.0,
                    "avghumidity": 60, "daily_chance_of_rain": 10, "condition": {"text": "Sunny"}}},
                {"date": "2026-10-19", "day": {
                    "maxtemp_c": 29.5, "mintemp_c": 21.0, "avgtemp_c": 24.8, "maxwind_kph": 18.0,
                    "avghumidity": 82, "daily_chance_of_rain": "87", "condition": {"text": "Heavy rain"}}}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = ask(
        app_for(&config_for(&server)),
        "forecast for Hyderabad tomorrow",
    )
    .await;

    assert_eq!(
        reply.reply,
        "Tomorrow (Mon 19 Oct) in Hyderabad, Telangana, India: Heavy rain, 29.5°C / 21.0°C (avg 24.8°C), 87% chance of rain. Humidity 82%, wind up to 18.0 km/h."
    );
    assert_eq!(reply.meta.unwrap().day, Day::Tomorrow);
}

#[tokio::test]
async fn test_unknown_place_is_distinct_from_provider_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "Tokyo"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let config = config_for(&server);

    let not_found = ask(app_for(&config), "weather in Atlantis").await;
    assert!(not_found.reply.contains("\"Atlantis\""));
    assert!(not_found.reply.contains("\"Atlantis, India\""));
    assert!(not_found.reply.contains("country"));
    assert_eq!(not_found.meta.unwrap().location, None);

    let fault = ask(app_for(&config), "weather in Tokyo").await;
    assert!(fault.reply.starts_with("Sorry"));
    assert!(!fault.reply.contains("upstream exploded"));
    assert!(fault.meta.is_none());
}

#[tokio::test]
async fn test_missing_key_configuration_reply_never_calls_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.weather.api_key = None;

    let reply = ask(app_for(&config), "weather in Tokyo").await;
    assert!(reply.reply.contains("not configured"));
}

#[tokio::test]
async fn test_sightseeing_question_never_reaches_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let reply = ask(
        app_for(&config_for(&server)),
        "Which temple in Kyoto should we visit?",
    )
    .await;
    assert!(reply.reply.starts_with("I can help with the weather"));
    assert!(reply.meta.is_none());
}

#[tokio::test]
async fn test_health_and_body_limit() {
    let server = MockServer::start().await;
    let mut config = config_for(&server);
    config.server.max_body_bytes = 64;
    let app = app_for(&config);

    let health = app
        .clone()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    let body = to_bytes(health.into_body(), usize::MAX).await.unwrap();
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["version"], travelchat::VERSION);
    assert_eq!(health["configured"], true);

    let oversized = json!({ "message": "weather in ".repeat(20) }).to_string();
    let response = app
        .oneshot(
            Request::post("/api/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::CONTENT_LENGTH, oversized.len())
                .body(Body::from(oversized))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
