use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use workout_map_rs::{
    config::{Config, StorageBackend},
    state::AppState,
};

fn file_app(dir: &Path) -> Router {
    let config = Config {
        storage: StorageBackend::File,
        data_dir: dir.to_path_buf(),
        storage_key: "storedWorkouts".to_string(),
        home: None,
        ..Config::from_env()
    };
    workout_map_rs::app(AppState::new(config).expect("state"))
}

async fn call(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method(method)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn workouts_survive_a_restart() {
    let dir = std::env::temp_dir().join(format!("workout-map-it-{}", Uuid::new_v4()));

    let first = file_app(&dir);
    call(&first, "POST", "/api/map/click", json!({ "lat": 51.5, "lng": -0.12 })).await;
    let (status, run) = call(
        &first,
        "POST",
        "/api/workouts",
        json!({ "type": "running", "distanceKm": 5, "durationMin": 25, "cadence": 180 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    call(&first, "POST", "/api/map/click", json!({ "lat": 51.6, "lng": -0.1 })).await;
    let (status, ride) = call(
        &first,
        "POST",
        "/api/workouts",
        json!({ "type": "cycling", "distanceKm": 20, "durationMin": 60, "elevationGainM": 150 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, before) = call(&first, "GET", "/api/workouts", Value::Null).await;

    let stored = std::fs::read_to_string(dir.join("storedWorkouts.json")).expect("slot file");
    assert!(stored.contains("\"elevationGainM\":150.0"));

    let second = file_app(&dir);
    let (_, after) = call(&second, "GET", "/api/workouts", Value::Null).await;
    assert_eq!(after, before);

    let (_, session) = call(&second, "GET", "/api/session", Value::Null).await;
    assert_eq!(session["entries"][0]["identity"], run["identity"]);
    assert_eq!(session["entries"][1]["identity"], ride["identity"]);
    assert_eq!(session["entries"][1]["derivedValue"], "0.33");
    assert_eq!(session["markers"].as_array().map(Vec::len), Some(2));

    let (status, _) = call(&second, "POST", "/api/reset", Value::Null).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(!dir.join("storedWorkouts.json").exists());

    let third = file_app(&dir);
    let (_, list) = call(&third, "GET", "/api/workouts", Value::Null).await;
    assert_eq!(list, json!([]));

    std::fs::remove_dir_all(&dir).expect("cleanup");
}

#[tokio::test]
async fn corrupt_slot_starts_an_empty_session() {
    let dir = std::env::temp_dir().join(format!("workout-map-it-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("dir");
    std::fs::write(dir.join("storedWorkouts.json"), "not json at all").expect("write");

    let app = file_app(&dir);
    let (status, list) = call(&app, "GET", "/api/workouts", Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    std::fs::remove_dir_all(&dir).expect("cleanup");
}

#[tokio::test(flavor = "current_thread")]
async fn concurrent_requests_over_file_storage_complete() {
    let dir = std::env::temp_dir().join(format!("workout-map-it-{}", Uuid::new_v4()));
    let app = file_app(&dir);
    call(&app, "POST", "/api/map/click", json!({ "lat": 51.5, "lng": -0.12 })).await;
    let (status, _) = call(
        &app,
        "POST",
        "/api/workouts",
        json!({ "type": "running", "distanceKm": 5, "durationMin": 25, "cadence": 180 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..16 {
        let app = app.clone();
        tasks.spawn(async move {
            if i % 2 == 0 {
                call(&app, "GET", "/api/workouts", Value::Null).await
            } else {
                call(&app, "POST", "/api/map/click", json!({ "lat": 10.0, "lng": i as f64 })).await
            }
        });
    }
    while let Some(joined) = tasks.join_next().await {
        let (status, _) = joined.expect("task");
        assert_eq!(status, StatusCode::OK);
    }

    let (_, list) = call(&app, "GET", "/api/workouts", Value::Null).await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));

    std::fs::remove_dir_all(&dir).expect("cleanup");
}
