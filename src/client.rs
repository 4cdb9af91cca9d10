//! Habit list client: fetch, render, mutate, reload.
//!
//! The client never edits a card locally. Every mutation is delegated to the
//! remote service and followed by exactly one full reload. Overlapping reloads
//! resolve as "latest request wins": each load takes a ticket, and a response
//! whose ticket is older than the rendered snapshot's is dropped.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::api::HabitApi;
use crate::errors::ClientError;
use crate::models::SnapshotResponse;
use crate::session::Session;
use crate::view::{render_cards, CardAction, HabitCard};

const MIN_TITLE_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered,
    /// A newer load already rendered; this response was discarded.
    Superseded,
}

/// The rendered view. Replaced wholesale on every accepted load.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub cards: Vec<HabitCard>,
    pub loaded_at: Option<DateTime<Local>>,
    pub last_error: Option<String>,
    pub(crate) ticket: u64,
}

impl Snapshot {
    pub fn is_loaded(&self) -> bool {
        self.loaded_at.is_some()
    }

    pub fn binds(&self, action: CardAction) -> bool {
        self.cards.iter().any(|card| card.binds(action))
    }

    pub fn to_response(&self, user_id: i64) -> SnapshotResponse {
        SnapshotResponse {
            user_id,
            cards: self.cards.clone(),
            loaded_at: self.loaded_at.map(|at| at.to_rfc3339()),
            last_error: self.last_error.clone(),
        }
    }
}

#[derive(Debug)]
pub struct HabitListClient {
    session: Session,
    api: HabitApi,
    issued: AtomicU64,
    board: Mutex<Snapshot>,
}

impl HabitListClient {
    pub fn new(session: Session, api: HabitApi) -> Self {
        Self {
            session,
            api,
            issued: AtomicU64::new(0),
            board: Mutex::new(Snapshot::default()),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.board.lock().await.clone()
    }

    /// Fetches the session's habits and replaces the rendered cards.
    ///
    /// On failure the previous cards stay in place and the error is recorded
    /// on the snapshot before being returned.
    pub async fn load_habits(&self) -> Result<LoadOutcome, ClientError> {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let user_id = self.session.user_id();
        debug!(ticket, user_id, "loading habits");

        let result = self.api.list_habits(user_id).await;

        let mut board = self.board.lock().await;
        if ticket < board.ticket {
            debug!(ticket, rendered = board.ticket, "dropping superseded habit list");
            return result.map(|_| LoadOutcome::Superseded);
        }

        match result {
            Ok(habits) => {
                *board = Snapshot {
                    cards: render_cards(&habits),
                    loaded_at: Some(Local::now()),
                    last_error: None,
                    ticket,
                };
                info!(ticket, count = board.cards.len(), "rendered habit list");
                Ok(LoadOutcome::Rendered)
            }
            Err(err) => {
                warn!(ticket, "failed to load habits: {err}");
                // Older loads still in flight must not render over a newer failure.
                board.ticket = ticket;
                board.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn mark_done(&self, habit_id: i64) -> Result<LoadOutcome, ClientError> {
        self.api.complete(self.session.user_id(), habit_id).await?;
        self.load_habits().await
    }

    pub async fn delete_habit(&self, habit_id: i64) -> Result<LoadOutcome, ClientError> {
        self.api.delete(self.session.user_id(), habit_id).await?;
        self.load_habits().await
    }

    pub async fn add_habit(&self, title: &str) -> Result<LoadOutcome, ClientError> {
        let title = title.trim();
        if title.chars().count() < MIN_TITLE_CHARS {
            return Err(ClientError::InvalidTitle {
                min: MIN_TITLE_CHARS,
            });
        }
        self.api.add(self.session.user_id(), title).await?;
        self.load_habits().await
    }

    /// Runs an action only if a card in the current snapshot binds it.
    pub async fn dispatch(&self, action: CardAction) -> Result<LoadOutcome, ClientError> {
        if !self.board.lock().await.binds(action) {
            return Err(ClientError::UnknownHabit(action.habit_id()));
        }
        match action {
            CardAction::Complete(id) => self.mark_done(id).await,
            CardAction::Delete(id) => self.delete_habit(id).await,
        }
    }
}
