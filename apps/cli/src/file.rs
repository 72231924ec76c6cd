//! Read-only word source over a JSON file.
//!
//! The file maps unit ids to their words:
//! ```json
//! { "animals": [{ "id": 1, "from": [{ "phrase": "kutya" }], "to": [{ "phrase": "dog" }] }] }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiz_core::{Result, SourceError, TranslationToSave, UnitId, Word, WordId, WordSource};
use tracing::warn;

pub struct FileWordSource {
    path: PathBuf,
}

impl FileWordSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn load(&self) -> Result<HashMap<UnitId, Vec<Word>>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        serde_json::from_str(&content)
            .map_err(|e| SourceError::Parse(format!("{}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl WordSource for FileWordSource {
    async fn fetch_words(&self, unit_id: &UnitId) -> Result<Option<Vec<Word>>> {
        let mut units = self.load().await?;
        Ok(units.remove(unit_id))
    }

    async fn add_content(&self, translation: &TranslationToSave) -> Result<Option<WordId>> {
        warn!(path = %self.path.display(), unit = %translation.unit_id, "word file is read-only");
        Ok(None)
    }

    async fn remove_content(&self, id: WordId) -> Result<bool> {
        warn!(path = %self.path.display(), word = %id, "word file is read-only");
        Ok(false)
    }
}
