//! Pure mapping from a habit list snapshot to renderable cards.
//!
//! Cards carry their action bindings explicitly so a rendering layer only has
//! to attach handlers; it never builds call sites out of strings.

use crate::models::Habit;
use serde::Serialize;

pub const COMPLETE_LABEL: &str = "✅ Выполнено";
pub const DELETE_LABEL: &str = "🗑 Удалить";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "habit_id", rename_all = "snake_case")]
pub enum CardAction {
    Complete(i64),
    Delete(i64),
}

impl CardAction {
    pub fn habit_id(self) -> i64 {
        match self {
            Self::Complete(id) | Self::Delete(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionBinding {
    pub action: CardAction,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitCard {
    pub habit_id: i64,
    pub title: String,
    pub streak: i64,
    pub streak_label: String,
    pub actions: [ActionBinding; 2],
}

impl HabitCard {
    pub fn binds(&self, action: CardAction) -> bool {
        self.actions.iter().any(|binding| binding.action == action)
    }
}

/// One card per habit, in service order.
pub fn render_cards(habits: &[Habit]) -> Vec<HabitCard> {
    habits.iter().map(render_card).collect()
}

fn render_card(habit: &Habit) -> HabitCard {
    HabitCard {
        habit_id: habit.id,
        title: habit.title.clone(),
        streak: habit.streak,
        streak_label: streak_label(habit.streak),
        actions: [
            ActionBinding {
                action: CardAction::Complete(habit.id),
                label: COMPLETE_LABEL,
            },
            ActionBinding {
                action: CardAction::Delete(habit.id),
                label: DELETE_LABEL,
            },
        ],
    }
}

pub fn streak_label(streak: i64) -> String {
    format!("🔥 Серия: {streak}")
}
