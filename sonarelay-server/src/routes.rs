use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use sonarelay_core::{dispatch::Dispatch, relay::Relay};
use sonarelay_model::EpisodeEvent;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::errors::{AppError, AppResult};

/// Shared per-process state handed to every handler.
pub struct AppState<D> {
    pub relay: Arc<Relay<D>>,
}

impl<D> Clone for AppState<D> {
    fn clone(&self) -> Self {
        AppState {
            relay: Arc::clone(&self.relay),
        }
    }
}

impl<D> std::fmt::Debug for AppState<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

/// Builds the webhook surface: intake at `/`, fixed liveness body at `/200`.
pub fn router<D: Dispatch>(relay: Arc<Relay<D>>) -> Router {
    Router::new()
        .route("/", post(handle_webhook::<D>))
        .route("/200", get(hello_world))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { relay })
}

/// `POST /` — webhook intake.
///
/// The event is acknowledged as soon as it is recorded in the store; whether
/// the eventual delivery succeeds is never reported back to the producer.
async fn handle_webhook<D: Dispatch>(
    State(state): State<AppState<D>>,
    payload: Result<Json<EpisodeEvent>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(event) = payload.map_err(|rejection| {
        warn!(error = %rejection, "rejecting undecodable webhook request");
        AppError::bad_request("Invalid request")
    })?;

    info!(
        series_id = %event.series_id,
        series = %event.series_name,
        season = %event.season_number,
        episode = %event.episode_number,
        "received episode event"
    );

    state.relay.handle_event(event);
    Ok(StatusCode::OK)
}

/// `GET /200` — liveness probe with a fixed body.
async fn hello_world() -> &'static str {
    "Hello, World!"
}
