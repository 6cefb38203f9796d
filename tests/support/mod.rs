#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-process stand-in for the remote subscriptions API.
#[derive(Default)]
pub struct Upstream {
    pub records: Mutex<Vec<Value>>,
    pub last_body: Mutex<Option<Value>>,
    pub fail_writes: AtomicBool,
    pub next_id: AtomicUsize,
}

pub struct FakeUpstream {
    pub base_url: String,
    pub state: Arc<Upstream>,
}

impl FakeUpstream {
    pub fn records(&self) -> Vec<Value> {
        self.state.records.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.state.last_body.lock().unwrap().clone()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state.fail_writes.store(fail, Ordering::SeqCst);
    }
}

pub async fn spawn_upstream(seed: Vec<Value>) -> FakeUpstream {
    let state = Arc::new(Upstream {
        next_id: AtomicUsize::new(seed.len()),
        records: Mutex::new(seed),
        ..Upstream::default()
    });

    let app = Router::new()
        .route("/subscriptions", get(list).post(create))
        .route("/subscriptions/:id", put(update).delete(remove))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("upstream server");
    });

    FakeUpstream {
        base_url: format!("http://{addr}"),
        state,
    }
}

pub fn record(id: &str, name: &str, price: Value, status: &str, renewal: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "category": "Media",
        "billing": "Monthly",
        "price": price,
        "renewalDate": renewal,
        "status": status
    })
}

async fn list(State(state): State<Arc<Upstream>>) -> Json<Vec<Value>> {
    Json(state.records.lock().unwrap().clone())
}

async fn create(
    State(state): State<Arc<Upstream>>,
    Json(mut body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    *state.last_body.lock().unwrap() = Some(body.clone());
    if state.fail_writes.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let id = state.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    body["id"] = json!(id.to_string());
    state.records.lock().unwrap().push(body.clone());
    Ok((StatusCode::CREATED, Json(body)))
}

async fn update(
    State(state): State<Arc<Upstream>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    *state.last_body.lock().unwrap() = Some(body.clone());
    if state.fail_writes.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let mut records = state.records.lock().unwrap();
    let existing = records
        .iter_mut()
        .find(|r| r["id"] == json!(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    *existing = body.clone();
    Ok(Json(body))
}

async fn remove(State(state): State<Arc<Upstream>>, Path(id): Path<String>) -> StatusCode {
    if state.fail_writes.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let mut records = state.records.lock().unwrap();
    let before = records.len();
    records.retain(|r| r["id"] != json!(id));
    if records.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}
