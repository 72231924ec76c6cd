//! Core types for the vocabulary quiz.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a word (unit content entry) assigned by the word source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(pub i64);

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a unit (a named group of words studied together).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub String);

impl UnitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single phrase on one side of a translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub phrase: String,
}

impl Phrase {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
        }
    }

    /// True when the phrase holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.phrase.trim().is_empty()
    }
}

impl AsRef<str> for Phrase {
    fn as_ref(&self) -> &str {
        &self.phrase
    }
}

impl From<&str> for Phrase {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A word (translation entry) as stored by the word source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: WordId,
    /// Source-language phrases shown to the learner.
    pub from: Vec<Phrase>,
    /// Acceptable target-language answers.
    pub to: Vec<Phrase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Word {
    /// Create a word with the given phrases and no example or media.
    pub fn new<F, T>(id: i64, from: F, to: T) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            id: WordId(id),
            from: from.into_iter().map(Phrase::new).collect(),
            to: to.into_iter().map(Phrase::new).collect(),
            example: None,
            translated_example: None,
            audio: None,
            image_url: None,
        }
    }

    pub fn with_audio(mut self, audio: impl Into<String>) -> Self {
        self.audio = Some(audio.into());
        self
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<String>, translated: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self.translated_example = Some(translated.into());
        self
    }

    /// Acceptable answers as plain strings.
    pub fn answers(&self) -> Vec<String> {
        self.to.iter().map(|p| p.phrase.clone()).collect()
    }
}

/// Per-word quiz record kept by a session, joined to a [`Word`] by id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizState {
    pub correct_answers: u32,
    pub wrong_answers: u32,
    pub last_answer_wrong: bool,
}

impl QuizState {
    pub fn record_correct(&mut self) {
        self.correct_answers += 1;
        self.last_answer_wrong = false;
    }

    pub fn record_wrong(&mut self) {
        self.wrong_answers += 1;
        self.last_answer_wrong = true;
    }
}

/// A word as seen during a quiz: the stored word plus its quiz record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessedWord<'a> {
    pub word: &'a Word,
    pub state: &'a QuizState,
}

impl<'a> GuessedWord<'a> {
    pub fn id(&self) -> WordId {
        self.word.id
    }

    pub fn last_answer_wrong(&self) -> bool {
        self.state.last_answer_wrong
    }
}

/// How contractions are expanded before comparing answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbbreviationMode {
    /// Replace every occurrence of the contraction, even inside longer tokens.
    Literal,
    /// Replace the contraction only where it stands as a whole token.
    WordBoundary,
}

impl Default for AbbreviationMode {
    fn default() -> Self {
        Self::Literal
    }
}

impl AbbreviationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::WordBoundary => "word_boundary",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "literal" => Some(Self::Literal),
            "word_boundary" => Some(Self::WordBoundary),
            _ => None,
        }
    }
}

/// Quiz session settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    #[serde(default)]
    pub abbreviation_mode: AbbreviationMode,
}

/// Translation payload sent to the word source when adding unit content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationToSave {
    pub unit_id: UnitId,
    pub from: Vec<String>,
    pub to: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_example: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_json_uses_camel_case() {
        let word = Word::new(7, ["kutya"], ["dog"]).with_example("A kutya ugat.", "The dog barks.");
        let json = serde_json::to_string(&word).unwrap();
        assert!(json.contains("\"translatedExample\":\"The dog barks.\""));
        assert!(json.contains("\"id\":7"));
        assert!(!json.contains("imageUrl"));
    }

    #[test]
    fn word_json_optional_fields_default() {
        let json = r#"{"id":3,"from":[{"phrase":"macska"}],"to":[{"phrase":"cat"}]}"#;
        let word: Word = serde_json::from_str(json).unwrap();
        assert_eq!(word.id, WordId(3));
        assert_eq!(word.answers(), vec!["cat".to_string()]);
        assert!(word.audio.is_none());
    }

    #[test]
    fn quiz_state_flags() {
        let mut state = QuizState::default();
        state.record_wrong();
        assert!(state.last_answer_wrong);
        state.record_correct();
        assert!(!state.last_answer_wrong);
        assert_eq!(state.correct_answers, 1);
        assert_eq!(state.wrong_answers, 1);
    }

    #[test]
    fn abbreviation_mode_from_str() {
        for mode in [AbbreviationMode::Literal, AbbreviationMode::WordBoundary] {
            assert_eq!(AbbreviationMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(AbbreviationMode::from_str("regex"), None);
    }

    #[test]
    fn blank_phrase() {
        assert!(Phrase::new("  ").is_blank());
        assert!(!Phrase::new(" a ").is_blank());
    }
}
