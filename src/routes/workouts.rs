use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::error::{AppError, SessionError};
use crate::routes::session::SessionSnapshot;
use crate::state::AppState;
use crate::tracker::factory::WorkoutInput;
use crate::types::record::WorkoutRecord;
use crate::types::view::RenderModel;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/workouts", get(list).post(create))
        .route("/api/workouts/:id", get(find))
        .route("/api/workouts/:id/focus", post(focus))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<WorkoutRecord>>, AppError> {
    state
        .with_session(|session| {
            Ok(session
                .store()
                .all()
                .iter()
                .map(WorkoutRecord::from)
                .collect())
        })
        .await
        .map(Json)
}

async fn find(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WorkoutRecord>, AppError> {
    state
        .with_session(move |session| {
            session
                .store()
                .find_by_identity(&id)
                .map(WorkoutRecord::from)
                .ok_or_else(|| SessionError::NotFound(id.clone()).into())
        })
        .await
        .map(Json)
}

async fn create(
    State(state): State<AppState>,
    Json(input): Json<WorkoutInput>,
) -> Result<(StatusCode, Json<RenderModel>), AppError> {
    let entry = state
        .with_session(move |session| {
            session
                .submit(&input)
                .map(RenderModel::from)
                .map_err(AppError::from)
        })
        .await?;

    tracing::info!(
        "Created {} workout {} ({:.2} km in {:.0} min)",
        entry.kind.as_str(),
        entry.identity,
        entry.distance_km,
        entry.duration_min
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

async fn focus(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    state
        .with_session(move |session| {
            session.focus_entry(&id)?;
            Ok(SessionSnapshot::of(session))
        })
        .await
        .map(Json)
}
