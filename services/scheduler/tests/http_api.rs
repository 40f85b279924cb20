//! HTTP surface of the scheduler service, driven through the router

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use scheduler::{
    AppState, create_router,
    repositories::{MemorySessionRepository, MemorySportRepository},
};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    create_router(AppState::new(
        MemorySessionRepository::new(),
        MemorySportRepository::new(),
    ))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

async fn create_tennis_session(app: &Router) -> String {
    let (status, _) = send(app, Method::POST, "/api/sports", Some(json!({ "name": "Tennis" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, session) = send(
        app,
        Method::POST,
        "/api/sessions",
        Some(json!({
            "sport": "Tennis",
            "venue": "Court A",
            "date": "2025-07-01",
            "time": "09:00",
            "playerEmails": ["a@x.com", "b@x.com"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    session["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn session_round_trip_over_http() {
    let app = app();
    let id = create_tennis_session(&app).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/sessions/join",
        Some(json!({ "sessionId": id, "playerEmail": "a@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Joined session");
    assert_eq!(body["session"]["playerEmails"][0]["joined"], true);

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/sessions/cancel",
        Some(json!({ "sessionId": id, "playerEmail": "b@x.com", "reason": "injured" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Session cancelled");
    assert_eq!(body["session"]["playerEmails"][1]["cancelReason"], "injured");

    let (status, body) = send(&app, Method::GET, "/api/sessions/cancelled-by-players", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], id.as_str());
    assert_eq!(body[0]["cancelledPlayers"][0]["email"], "b@x.com");

    let (status, body) = send(&app, Method::GET, "/api/sessions/player?email=a@x.com", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::GET, "/api/sessions/player", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, Method::GET, "/api/sessions/admin", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["sport"], "Tennis");
    assert_eq!(body[0]["date"], "2025-07-01T09:00:00Z");
}

#[tokio::test]
async fn roster_errors_map_to_client_statuses() {
    let app = app();
    let id = create_tennis_session(&app).await;
    let join = json!({ "sessionId": id, "playerEmail": "a@x.com" });

    let (status, _) = send(&app, Method::PATCH, "/api/sessions/join", Some(join.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::PATCH, "/api/sessions/join", Some(join)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Already joined");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/sessions/join",
        Some(json!({ "sessionId": id, "playerEmail": "z@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Player not listed for this session");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/sessions/cancel",
        Some(json!({ "sessionId": "not-an-id", "playerEmail": "a@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Session not found");
}

#[tokio::test]
async fn session_creation_errors() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sessions",
        Some(json!({ "sport": "Curling", "venue": "Rink", "date": "2025-07-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Sport does not exist");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sessions",
        Some(json!({ "sport": "Curling", "venue": "Rink", "date": "someday" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Sport does not exist");

    let (status, _) = send(&app, Method::POST, "/api/sports", Some(json!({ "name": "Curling" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sessions",
        Some(json!({ "sport": "Curling", "venue": "Rink", "date": "someday" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid date or time");
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/sports")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn edit_and_delete_session() {
    let app = app();
    let id = create_tennis_session(&app).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/sessions/{}", id),
        Some(json!({
            "sport": "Tennis",
            "venue": "Court C",
            "date": "2025-07-03",
            "time": "11:00",
            "playerEmails": ["b@x.com"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["venue"], "Court C");
    assert_eq!(body["playerEmails"].as_array().unwrap().len(), 1);

    let uri = format!("/api/sessions/{}", id);
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Session deleted");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sport_catalog_over_http() {
    let app = app();

    let (status, soccer) = send(&app, Method::POST, "/api/sports", Some(json!({ "name": "Soccer" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(soccer["status"], "Active");

    let (status, body) = send(&app, Method::POST, "/api/sports", Some(json!({ "name": "soccer" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Sport already exists");

    let uri = format!("/api/sports/{}", soccer["id"].as_str().unwrap());
    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "name": "Football" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Football");

    let (status, body) = send(&app, Method::GET, "/api/sports", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Sport deleted");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
