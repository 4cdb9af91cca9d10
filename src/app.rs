use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/refresh", post(handlers::refresh))
        .route("/habits", post(handlers::add_habit))
        .route("/habits/:id/done", post(handlers::mark_done))
        .route("/habits/:id/delete", post(handlers::delete_habit))
        .route("/api/cards", get(handlers::get_cards))
        .with_state(state)
}
