#![allow(dead_code)]

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub body: Value,
}

#[derive(Default)]
struct FakeState {
    habits: Vec<Value>,
    next_id: i64,
    requests: Vec<Recorded>,
    habit_delays: VecDeque<Duration>,
    raw_habits_body: Option<String>,
    failing_commands: bool,
}

/// In-process stand-in for the remote habit service.
#[derive(Clone, Default)]
pub struct FakeService {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeService {
    pub fn with_habits(habits: Value) -> Self {
        let service = Self::default();
        {
            let mut state = service.inner.try_lock().expect("fresh fake service");
            state.habits = habits.as_array().cloned().unwrap_or_default();
            state.next_id = 1000;
        }
        service
    }

    pub async fn set_habits(&self, habits: Value) {
        self.inner.lock().await.habits = habits.as_array().cloned().unwrap_or_default();
    }

    /// Delays the next `/api/habits` response; the list is captured before sleeping.
    pub async fn delay_next_list(&self, delay: Duration) {
        self.inner.lock().await.habit_delays.push_back(delay);
    }

    pub async fn respond_with_raw(&self, body: &str) {
        self.inner.lock().await.raw_habits_body = Some(body.to_string());
    }

    /// Answers `/api/done` and `/api/delete` with a 500 and a plain-text body.
    pub async fn fail_commands(&self) {
        self.inner.lock().await.failing_commands = true;
    }

    pub async fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().await.requests.clone()
    }

    pub async fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .await
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }

    pub async fn wait_for_requests(&self, path: &str, count: usize) {
        let deadline = Instant::now() + Duration::from_secs(3);
        while self.requests_to(path).await.len() < count {
            if Instant::now() > deadline {
                panic!("fake service never saw {count} requests to {path}");
            }
            sleep(Duration::from_millis(10)).await;
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/habits", post(list_habits))
            .route("/api/done", post(done))
            .route("/api/delete", post(delete))
            .route("/api/add", post(add))
            .with_state(self.clone())
    }

    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake service");
        let addr = listener.local_addr().unwrap();
        let app = self.router();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}

async fn record(service: &FakeService, path: &str, body: &Value) {
    service.inner.lock().await.requests.push(Recorded {
        path: path.to_string(),
        body: body.clone(),
    });
}

async fn list_habits(
    State(service): State<FakeService>,
    Json(body): Json<Value>,
) -> axum::response::Response {
    use axum::response::IntoResponse;

    let (habits, delay, raw) = {
        let mut state = service.inner.lock().await;
        state.requests.push(Recorded {
            path: "/api/habits".to_string(),
            body,
        });
        (
            state.habits.clone(),
            state.habit_delays.pop_front(),
            state.raw_habits_body.clone(),
        )
    };
    if let Some(delay) = delay {
        sleep(delay).await;
    }
    match raw {
        Some(raw) => ([("content-type", "application/json")], raw).into_response(),
        None => Json(Value::Array(habits)).into_response(),
    }
}

async fn command_failure(service: &FakeService) -> Option<axum::response::Response> {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    if service.inner.lock().await.failing_commands {
        Some((StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response())
    } else {
        None
    }
}

async fn done(
    State(service): State<FakeService>,
    Json(body): Json<Value>,
) -> axum::response::Response {
    use axum::response::IntoResponse;

    record(&service, "/api/done", &body).await;
    if let Some(failure) = command_failure(&service).await {
        return failure;
    }
    let id = body["habit_id"].as_i64();
    let mut state = service.inner.lock().await;
    for habit in state.habits.iter_mut() {
        if habit["id"].as_i64() == id {
            let streak = habit["streak"].as_i64().unwrap_or(0);
            habit["streak"] = json!(streak + 1);
        }
    }
    Json(json!({ "ok": true })).into_response()
}

async fn delete(
    State(service): State<FakeService>,
    Json(body): Json<Value>,
) -> axum::response::Response {
    use axum::response::IntoResponse;

    record(&service, "/api/delete", &body).await;
    if let Some(failure) = command_failure(&service).await {
        return failure;
    }
    let id = body["habit_id"].as_i64();
    service
        .inner
        .lock()
        .await
        .habits
        .retain(|habit| habit["id"].as_i64() != id);
    Json(json!({ "ok": true })).into_response()
}

async fn add(State(service): State<FakeService>, Json(body): Json<Value>) -> Json<Value> {
    record(&service, "/api/add", &body).await;
    let mut state = service.inner.lock().await;
    state.next_id += 1;
    let id = state.next_id;
    let title = body["title"].clone();
    state.habits.push(json!({ "id": id, "title": title, "streak": 0 }));
    Json(json!({ "ok": true }))
}
