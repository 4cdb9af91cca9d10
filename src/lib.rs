pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod session;
pub mod state;
pub mod ui;
pub mod view;

pub use app::router;
pub use client::{HabitListClient, LoadOutcome, Snapshot};
pub use config::Config;
pub use session::{EmbeddedHost, HostEnvironment, Session, FALLBACK_USER_ID};
pub use state::AppState;
