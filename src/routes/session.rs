use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Field, ValidationError};
use crate::state::AppState;
use crate::tracker::headless::HeadlessView;
use crate::tracker::session::{Phase, Session};
use crate::types::workout::{Coordinate, WorkoutKind};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/session", get(snapshot))
        .route("/api/map/click", post(map_click))
        .route("/api/form/type", post(change_type))
        .route("/api/reset", post(reset))
}

/// Everything a client needs to redraw the page.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub zoom_level: u8,
    #[serde(flatten)]
    pub view: HeadlessView,
}

impl SessionSnapshot {
    pub fn of(session: &Session<HeadlessView>) -> Self {
        Self {
            phase: session.phase(),
            zoom_level: session.zoom_level(),
            view: session.view().clone(),
        }
    }
}

#[derive(Deserialize)]
struct MapClickRequest {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct TypeChangeRequest {
    #[serde(alias = "type")]
    kind: String,
}

async fn snapshot(State(state): State<AppState>) -> Result<Json<SessionSnapshot>, AppError> {
    state
        .with_session(|session| Ok(SessionSnapshot::of(session)))
        .await
        .map(Json)
}

async fn map_click(
    State(state): State<AppState>,
    Json(request): Json<MapClickRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let valid = (-90.0..=90.0).contains(&request.lat) && (-180.0..=180.0).contains(&request.lng);
    if !valid {
        return Err(AppError::BadRequest(format!(
            "Coordinate out of range: {}, {}",
            request.lat, request.lng
        )));
    }

    state
        .with_session(move |session| {
            session.map_clicked(Coordinate::new(request.lat, request.lng));
            Ok(SessionSnapshot::of(session))
        })
        .await
        .map(Json)
}

async fn change_type(
    State(state): State<AppState>,
    Json(request): Json<TypeChangeRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let kind =
        WorkoutKind::from_str(&request.kind).ok_or_else(|| ValidationError::single(Field::Kind))?;

    state
        .with_session(move |session| {
            session.change_type(kind);
            Ok(SessionSnapshot::of(session))
        })
        .await
        .map(Json)
}

async fn reset(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.reset().await?;
    tracing::info!("Session reset");
    Ok(StatusCode::NO_CONTENT)
}
