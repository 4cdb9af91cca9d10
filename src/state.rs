use crate::client::HabitListClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<HabitListClient>,
}

impl AppState {
    pub fn new(client: HabitListClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}
