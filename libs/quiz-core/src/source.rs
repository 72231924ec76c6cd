//! Word sources and the unit word cache.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::content::TranslationDraft;
use crate::error::Result;
use crate::types::{TranslationToSave, UnitId, Word, WordId};

/// Backend holding units and their words.
#[async_trait]
pub trait WordSource: Send + Sync {
    /// Words of a unit, or `None` when the unit has none to offer.
    async fn fetch_words(&self, unit_id: &UnitId) -> Result<Option<Vec<Word>>>;

    /// Store a translation, returning its new id or `None` if it was not stored.
    async fn add_content(&self, translation: &TranslationToSave) -> Result<Option<WordId>>;

    /// Delete a word, returning whether it was deleted.
    async fn remove_content(&self, id: WordId) -> Result<bool>;
}

#[async_trait]
impl<T: WordSource + ?Sized> WordSource for Box<T> {
    async fn fetch_words(&self, unit_id: &UnitId) -> Result<Option<Vec<Word>>> {
        (**self).fetch_words(unit_id).await
    }

    async fn add_content(&self, translation: &TranslationToSave) -> Result<Option<WordId>> {
        (**self).add_content(translation).await
    }

    async fn remove_content(&self, id: WordId) -> Result<bool> {
        (**self).remove_content(id).await
    }
}

/// Keeps the words of the unit being worked on, so a quiz can resume
/// without refetching and edits show up without reloading.
pub struct WordService<S> {
    source: S,
    unit_id: Option<UnitId>,
    words: Option<Vec<Word>>,
}

impl<S: WordSource> WordService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            unit_id: None,
            words: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and cache the words of `unit_id`. An absent unit caches no words.
    pub async fn fetch_words(&mut self, unit_id: &UnitId) -> Result<&[Word]> {
        let words = self.source.fetch_words(unit_id).await?.unwrap_or_default();
        info!(unit = %unit_id, words = words.len(), "fetched unit words");
        self.unit_id = Some(unit_id.clone());
        Ok(self.words.insert(words).as_slice())
    }

    /// Words from the last fetch, if any.
    pub fn cached_words(&self) -> Option<&[Word]> {
        self.words.as_deref()
    }

    /// Unit of the cached words.
    pub fn cached_unit(&self) -> Option<&UnitId> {
        self.unit_id.as_ref()
    }

    /// Validate and store a draft. The cache only changes when the source
    /// returns an id.
    pub async fn add_content(&mut self, draft: TranslationDraft) -> Result<Option<WordId>> {
        let translation = draft.into_translation()?;
        let id = self.source.add_content(&translation).await?;

        match id {
            Some(id) => {
                if self.unit_id.as_ref() == Some(&translation.unit_id) {
                    if let Some(words) = self.words.as_mut() {
                        words.push(Word::from_saved(id, &translation));
                    }
                }
                info!(word = %id, unit = %translation.unit_id, "added unit content");
            }
            None => warn!(unit = %translation.unit_id, "word source did not store content"),
        }

        Ok(id)
    }

    /// Remove a word. The cache only changes when the source confirms.
    pub async fn remove_content(&mut self, id: WordId) -> Result<bool> {
        let removed = self.source.remove_content(id).await?;

        if removed {
            if let Some(words) = self.words.as_mut() {
                words.retain(|w| w.id != id);
            }
            info!(word = %id, "removed unit content");
        } else {
            warn!(word = %id, "word source did not remove content");
        }

        Ok(removed)
    }
}

/// In-process word source.
#[derive(Default)]
pub struct MemoryWordSource {
    inner: Mutex<MemoryUnits>,
}

#[derive(Default)]
struct MemoryUnits {
    units: HashMap<UnitId, Vec<Word>>,
    next_id: i64,
}

impl MemoryWordSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a unit with words. Later ids are assigned above the highest seeded id.
    pub fn with_unit(self, unit_id: UnitId, words: Vec<Word>) -> Self {
        {
            let mut inner = self.inner.lock().expect("memory source lock");
            let max_id = words.iter().map(|w| w.id.0).max().unwrap_or(0);
            inner.next_id = inner.next_id.max(max_id);
            inner.units.insert(unit_id, words);
        }
        self
    }
}

#[async_trait]
impl WordSource for MemoryWordSource {
    async fn fetch_words(&self, unit_id: &UnitId) -> Result<Option<Vec<Word>>> {
        let inner = self.inner.lock().expect("memory source lock");
        Ok(inner.units.get(unit_id).cloned())
    }

    async fn add_content(&self, translation: &TranslationToSave) -> Result<Option<WordId>> {
        let mut inner = self.inner.lock().expect("memory source lock");
        inner.next_id += 1;
        let id = WordId(inner.next_id);
        inner
            .units
            .entry(translation.unit_id.clone())
            .or_default()
            .push(Word::from_saved(id, translation));
        Ok(Some(id))
    }

    async fn remove_content(&self, id: WordId) -> Result<bool> {
        let mut inner = self.inner.lock().expect("memory source lock");
        let removed = inner.units.values_mut().any(|words| {
            let before = words.len();
            words.retain(|w| w.id != id);
            words.len() != before
        });
        Ok(removed)
    }
}
