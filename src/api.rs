//! Reqwest-backed adapter for the remote habit service.
//!
//! Every endpoint is a JSON POST scoped by the plain numeric user id.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::models::{AddHabitRequest, Habit, HabitActionRequest, HabitsRequest};

pub const HABITS_PATH: &str = "/api/habits";
pub const DONE_PATH: &str = "/api/done";
pub const DELETE_PATH: &str = "/api/delete";
pub const ADD_PATH: &str = "/api/add";

#[derive(Debug, Clone)]
pub struct HabitApi {
    client: Client,
    base_url: String,
}

impl HabitApi {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_habits(&self, user_id: i64) -> Result<Vec<Habit>, ClientError> {
        let response = self.post(HABITS_PATH, &HabitsRequest { user_id }).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                path: HABITS_PATH,
                status,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            path: HABITS_PATH,
            source,
        })
    }

    pub async fn complete(&self, user_id: i64, habit_id: i64) -> Result<(), ClientError> {
        self.command(DONE_PATH, &HabitActionRequest { user_id, habit_id }).await
    }

    pub async fn delete(&self, user_id: i64, habit_id: i64) -> Result<(), ClientError> {
        self.command(DELETE_PATH, &HabitActionRequest { user_id, habit_id }).await
    }

    pub async fn add(&self, user_id: i64, title: &str) -> Result<(), ClientError> {
        self.command(ADD_PATH, &AddHabitRequest { user_id, title }).await
    }

    /// Sends a mutation; the response body is never read.
    async fn command<B: Serialize>(&self, path: &'static str, body: &B) -> Result<(), ClientError> {
        let response = self.post(path, body).await?;
        let status = response.status();
        if !status.is_success() {
            warn!(path, %status, "habit service rejected command");
        }
        Ok(())
    }

    async fn post<B: Serialize>(
        &self,
        path: &'static str,
        body: &B,
    ) -> Result<Response, ClientError> {
        debug!(path, "sending request to habit service");
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await?;
        Ok(response)
    }
}
