//! Stub word service for integration tests.
//!
//! Serves the word API from memory on an ephemeral local port, so the HTTP
//! word source can be exercised without the real service.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use quiz_core::{TranslationToSave, Word, WordId};
use serde_json::{json, Value};

#[derive(Default)]
pub struct StubData {
    pub units: HashMap<String, Vec<Word>>,
    pub next_id: i64,
    /// Reject content additions.
    pub refuse_add: bool,
}

pub type SharedData = Arc<Mutex<StubData>>;

/// Running stub service.
pub struct StubService {
    pub base_url: String,
    pub data: SharedData,
}

impl StubService {
    /// Start the stub with the given units.
    pub async fn start(units: Vec<(&str, Vec<Word>)>) -> Self {
        let max_id = units
            .iter()
            .flat_map(|(_, words)| words.iter().map(|w| w.id.0))
            .max()
            .unwrap_or(0);
        let data = Arc::new(Mutex::new(StubData {
            units: units
                .into_iter()
                .map(|(unit, words)| (unit.to_string(), words))
                .collect(),
            next_id: max_id,
            refuse_add: false,
        }));

        let app = router(data.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub service");
        let addr = listener.local_addr().expect("stub service address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub service failed");
        });

        Self {
            base_url: format!("http://{}/api", addr),
            data,
        }
    }

    pub fn words(&self, unit: &str) -> Vec<Word> {
        self.data
            .lock()
            .unwrap()
            .units
            .get(unit)
            .cloned()
            .unwrap_or_default()
    }
}

fn router(data: SharedData) -> Router {
    Router::new()
        .route("/api/units/:unit/words", get(unit_words))
        .route("/api/units/:unit/content", post(add_content))
        .route("/api/content/:id", delete(remove_content))
        .route("/api/broken/units/:unit/words", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .with_state(data)
}

async fn unit_words(
    State(data): State<SharedData>,
    Path(unit): Path<String>,
) -> Result<Json<Vec<Word>>, StatusCode> {
    let data = data.lock().unwrap();
    data.units
        .get(&unit)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn add_content(
    State(data): State<SharedData>,
    Path(unit): Path<String>,
    Json(translation): Json<TranslationToSave>,
) -> Result<Json<Value>, StatusCode> {
    let mut data = data.lock().unwrap();
    if data.refuse_add {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    if translation.unit_id.as_str() != unit {
        return Ok(Json(json!({ "id": null })));
    }

    data.next_id += 1;
    let id = WordId(data.next_id);
    data.units
        .entry(unit)
        .or_default()
        .push(Word::from_saved(id, &translation));
    Ok(Json(json!({ "id": id })))
}

async fn remove_content(State(data): State<SharedData>, Path(id): Path<i64>) -> StatusCode {
    let mut data = data.lock().unwrap();
    let removed = data.units.values_mut().any(|words| {
        let before = words.len();
        words.retain(|w| w.id != WordId(id));
        words.len() != before
    });
    if removed {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
