//! New unit content: drafting, validation and conversion.

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, Side};
use crate::types::{Phrase, TranslationToSave, UnitId, Word, WordId};

/// A translation being prepared for a unit, before the word source accepts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationDraft {
    pub unit_id: UnitId,
    pub from: Vec<Phrase>,
    pub to: Vec<Phrase>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub translated_example: Option<String>,
}

impl TranslationDraft {
    /// Create an empty draft with one blank phrase per side.
    pub fn new(unit_id: UnitId) -> Self {
        Self {
            unit_id,
            from: vec![Phrase::new("")],
            to: vec![Phrase::new("")],
            example: None,
            translated_example: None,
        }
    }

    pub fn add_from(&mut self) -> &mut Phrase {
        let index = self.from.len();
        self.from.push(Phrase::new(""));
        &mut self.from[index]
    }

    pub fn add_to(&mut self) -> &mut Phrase {
        let index = self.to.len();
        self.to.push(Phrase::new(""));
        &mut self.to[index]
    }

    /// Check that both sides have at least one phrase and none is blank.
    pub fn validate(&self) -> Result<(), ContentError> {
        check_side(&self.from, Side::From)?;
        check_side(&self.to, Side::To)
    }

    /// Validate and convert into the payload sent to the word source.
    pub fn into_translation(self) -> Result<TranslationToSave, ContentError> {
        self.validate()?;
        Ok(TranslationToSave {
            unit_id: self.unit_id,
            from: phrase_strings(&self.from),
            to: phrase_strings(&self.to),
            example: self.example.filter(|e| !e.trim().is_empty()),
            translated_example: self.translated_example.filter(|e| !e.trim().is_empty()),
        })
    }
}

fn check_side(phrases: &[Phrase], side: Side) -> Result<(), ContentError> {
    if phrases.is_empty() {
        return Err(ContentError::NoPhrases { side });
    }
    match phrases.iter().position(Phrase::is_blank) {
        Some(index) => Err(ContentError::EmptyPhrase { side, index }),
        None => Ok(()),
    }
}

fn phrase_strings(phrases: &[Phrase]) -> Vec<String> {
    phrases.iter().map(|p| p.phrase.clone()).collect()
}

impl Word {
    /// Build the word the source stored for `translation` under `id`.
    pub fn from_saved(id: WordId, translation: &TranslationToSave) -> Self {
        Self {
            id,
            from: translation.from.iter().map(Phrase::new).collect(),
            to: translation.to.iter().map(Phrase::new).collect(),
            example: translation.example.clone(),
            translated_example: translation.translated_example.clone(),
            audio: None,
            image_url: None,
        }
    }
}

/// Join phrases with `;` for display, e.g. `dog;hound`.
pub fn join_phrases(phrases: &[Phrase]) -> String {
    phrases
        .iter()
        .map(|p| p.phrase.as_str())
        .collect::<Vec<_>>()
        .join(";")
}
