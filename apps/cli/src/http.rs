//! Word source backed by the word service HTTP API.
//!
//! Endpoints, relative to the base URL:
//! - `GET    /units/{unit}/words`   -> `[Word]` (404 when the unit is unknown)
//! - `POST   /units/{unit}/content` -> `{ "id": 42 }` or `{ "id": null }`
//! - `DELETE /content/{id}`         -> 2xx when deleted

use std::time::Duration;

use async_trait::async_trait;
use quiz_core::{Result, SourceError, TranslationToSave, UnitId, Word, WordId, WordSource};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct AddContentResponse {
    id: Option<WordId>,
}

/// Client for the word service.
#[derive(Clone)]
pub struct HttpWordSource {
    client: Client,
    base_url: Url,
}

impl HttpWordSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SourceError::Network(format!("invalid base url {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SourceError::Network(format!(
                "base url {base_url} cannot hold a path"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Appends each segment to the base path, percent-encoding it, so a unit
    /// id containing `/`, `?` or `#` stays a single segment.
    fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl WordSource for HttpWordSource {
    async fn fetch_words(&self, unit_id: &UnitId) -> Result<Option<Vec<Word>>> {
        let url = self.url(["units", unit_id.as_str(), "words"]);
        debug!(%url, "fetching words");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(SourceError::Backend { status, message });
        }

        resp.json::<Option<Vec<Word>>>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }

    async fn add_content(&self, translation: &TranslationToSave) -> Result<Option<WordId>> {
        let url = self.url(["units", translation.unit_id.as_str(), "content"]);

        let resp = self
            .client
            .post(url)
            .json(translation)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            warn!(status = resp.status().as_u16(), "word service rejected content");
            return Ok(None);
        }

        let response: AddContentResponse = resp
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        Ok(response.id)
    }

    async fn remove_content(&self, id: WordId) -> Result<bool> {
        let id_segment = id.to_string();
        let url = self.url(["content", id_segment.as_str()]);

        let resp = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            warn!(status = resp.status().as_u16(), word = %id, "word service did not delete content");
            return Ok(false);
        }

        Ok(true)
    }
}
