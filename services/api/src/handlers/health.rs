use axum::{extract::State, http::StatusCode};

use yamdb_core::health::database_ready;

use crate::state::AppState;

pub use yamdb_core::health::healthz;

/// `GET /readyz`: the database must answer.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    database_ready(&state.db).await
}
