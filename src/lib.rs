pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod storage;
pub mod tracker;
pub mod types;

use axum::Router;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::session::router())
        .merge(routes::workouts::router())
        .with_state(state)
}
