//! Answer matching for typed translations.
//!
//! An answer is accepted when it equals one of the expected phrases under
//! one of four increasingly lenient comparisons, tried in order:
//!
//! 1. exact equality
//! 2. case-insensitive equality
//! 3. the same after expanding known contractions (`what's`, `i'm`)
//! 4. the same after also dropping `? . ! : , ;` and spaces

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::AbbreviationMode;

/// Contractions and their expansions, in upper case.
const ABBREVIATIONS: &[(&str, &str)] = &[("WHAT'S", "WHAT IS"), ("I'M", "I AM")];

/// Characters ignored by the most lenient comparison.
const IGNORED_CHARS: &[char] = &['?', '.', '!', ':', ',', ';', ' '];

static ABBREVIATION_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    ABBREVIATIONS
        .iter()
        .map(|(short, long)| {
            let pattern = format!(r"\b{}\b", regex::escape(short));
            (
                Regex::new(&pattern).expect("contraction pattern is a valid regex"),
                *long,
            )
        })
        .collect()
});

/// The comparison under which an answer was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    CaseInsensitive,
    Abbreviation,
    Punctuation,
}

/// Which expected phrase matched, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Index into the expected phrases.
    pub phrase_index: usize,
    pub tier: MatchTier,
}

/// Check whether `actual` is an acceptable answer for any of `expected`.
///
/// Contractions are expanded literally (see [`AbbreviationMode::Literal`]).
pub fn matches<S: AsRef<str>>(expected: &[S], actual: Option<&str>) -> bool {
    match_answer(expected, actual, AbbreviationMode::Literal).is_some()
}

/// Compare `actual` against each expected phrase and report the first match.
///
/// Returns `None` when the answer is absent, empty, or matches nothing.
pub fn match_answer<S: AsRef<str>>(
    expected: &[S],
    actual: Option<&str>,
    mode: AbbreviationMode,
) -> Option<MatchOutcome> {
    let actual = actual.filter(|a| !a.is_empty())?;

    let actual_upper = actual.to_uppercase();
    let actual_expanded = expand_abbreviations(&actual_upper, mode);
    let actual_stripped = strip_punctuation(&actual_expanded);

    expected.iter().enumerate().find_map(|(phrase_index, phrase)| {
        let phrase = phrase.as_ref();
        let tier = if phrase == actual {
            MatchTier::Exact
        } else {
            let upper = phrase.to_uppercase();
            if upper == actual_upper {
                MatchTier::CaseInsensitive
            } else {
                let expanded = expand_abbreviations(&upper, mode);
                if expanded == actual_expanded {
                    MatchTier::Abbreviation
                } else if strip_punctuation(&expanded) == actual_stripped {
                    MatchTier::Punctuation
                } else {
                    return None;
                }
            }
        };
        Some(MatchOutcome { phrase_index, tier })
    })
}

/// Expand known contractions in upper-cased text.
///
/// In [`AbbreviationMode::Literal`] every occurrence of the contraction is
/// replaced, including one embedded in a longer token (`HI'M` becomes
/// `HI AM`). [`AbbreviationMode::WordBoundary`] leaves such tokens alone.
pub fn expand_abbreviations(text: &str, mode: AbbreviationMode) -> String {
    match mode {
        AbbreviationMode::Literal => ABBREVIATIONS
            .iter()
            .fold(text.to_string(), |acc, (short, long)| acc.replace(short, long)),
        AbbreviationMode::WordBoundary => ABBREVIATION_PATTERNS
            .iter()
            .fold(text.to_string(), |acc, (pattern, long)| {
                pattern.replace_all(&acc, *long).into_owned()
            }),
    }
}

/// Remove punctuation and spaces ignored by answer matching.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !IGNORED_CHARS.contains(c)).collect()
}
