use serde::{Deserialize, Serialize};

use crate::view::HabitCard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub title: String,
    pub streak: i64,
}

#[derive(Debug, Serialize)]
pub struct HabitsRequest {
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct HabitActionRequest {
    pub user_id: i64,
    pub habit_id: i64,
}

#[derive(Debug, Serialize)]
pub struct AddHabitRequest<'a> {
    pub user_id: i64,
    pub title: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AddHabitForm {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub user_id: i64,
    pub cards: Vec<HabitCard>,
    pub loaded_at: Option<String>,
    pub last_error: Option<String>,
}
