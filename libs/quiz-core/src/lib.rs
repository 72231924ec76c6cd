//! Core vocabulary quiz library.
//!
//! Provides:
//! - Answer matching tolerant of case, punctuation and contractions
//! - Quiz sessions that draw words at random until each is mastered
//! - The word source interface and a cache of the current unit's words
//! - Shared types (Word, QuizState, TranslationToSave, etc.)

pub mod content;
pub mod error;
pub mod matching;
pub mod session;
pub mod source;
pub mod types;

pub use content::{join_phrases, TranslationDraft};
pub use error::{ContentError, QuizError, Result, Side, SourceError};
pub use matching::{expand_abbreviations, match_answer, matches, strip_punctuation, MatchOutcome, MatchTier};
pub use session::{AudioPlayer, MissedWord, QuizSession, SessionSummary, SubmitOutcome};
pub use source::{MemoryWordSource, WordService, WordSource};
pub use types::{
    AbbreviationMode, GuessedWord, Phrase, QuizSettings, QuizState, TranslationToSave, UnitId,
    Word, WordId,
};
