use crate::client::LoadOutcome;
use crate::errors::{AppError, ClientError};
use crate::models::{AddHabitForm, SnapshotResponse};
use crate::state::AppState;
use crate::ui::render_index;
use crate::view::CardAction;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use tracing::{error, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let client = &state.client;
    if !client.snapshot().await.is_loaded() {
        if let Err(err) = client.load_habits().await {
            warn!("initial habit load failed: {err}");
        }
    }
    let snapshot = client.snapshot().await;
    Html(render_index(client.session(), &snapshot))
}

pub async fn get_cards(State(state): State<AppState>) -> Json<SnapshotResponse> {
    let snapshot = state.client.snapshot().await;
    Json(snapshot.to_response(state.client.session().user_id()))
}

pub async fn refresh(State(state): State<AppState>) -> Result<Redirect, AppError> {
    settle(state.client.load_habits().await)
}

pub async fn mark_done(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    settle(state.client.dispatch(CardAction::Complete(id)).await)
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    settle(state.client.dispatch(CardAction::Delete(id)).await)
}

pub async fn add_habit(
    State(state): State<AppState>,
    Form(form): Form<AddHabitForm>,
) -> Result<Redirect, AppError> {
    settle(state.client.add_habit(&form.title).await)
}

/// Upstream failures leave the previous view in place and still return to the
/// list; only requests the client itself rejects become error responses.
fn settle(result: Result<LoadOutcome, ClientError>) -> Result<Redirect, AppError> {
    match result {
        Ok(_) => Ok(Redirect::to("/")),
        Err(err @ (ClientError::UnknownHabit(_) | ClientError::InvalidTitle { .. })) => {
            Err(err.into())
        }
        Err(err) => {
            error!("habit service call failed: {err}");
            Ok(Redirect::to("/"))
        }
    }
}
