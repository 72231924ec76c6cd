//! Quiz session: the pool of words still to learn and the ask/check loop.
//!
//! A session draws a random word from its pool, checks the learner's answer
//! and removes the word once it is mastered. A word answered wrong stays in
//! the pool until it is answered correctly again on a later draw, except when
//! it is the last word left.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::content::join_phrases;
use crate::error::QuizError;
use crate::matching::{match_answer, MatchTier};
use crate::types::{GuessedWord, QuizSettings, QuizState, Word, WordId};

/// Plays a word's audio after its answer is checked.
///
/// Playback is fire-and-forget: implementations report nothing back and
/// must not fail the session.
pub trait AudioPlayer {
    fn play(&self, audio_ref: &str);
}

/// Result of checking one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    pub correct: bool,
    /// Comparison that accepted the answer, if it was accepted.
    pub tier: Option<MatchTier>,
    /// The word left the pool.
    pub mastered: bool,
    /// Words left in the pool after this answer.
    pub remaining: usize,
}

/// A word that was answered wrong at least once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissedWord {
    pub id: WordId,
    pub from: String,
    pub wrong_answers: u32,
}

/// Statistics of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub words: usize,
    pub mastered: usize,
    pub remaining: usize,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    /// Missed words, most wrong answers first.
    pub missed: Vec<MissedWord>,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// A single quiz over a set of words.
pub struct QuizSession<R = StdRng> {
    settings: QuizSettings,
    rng: R,
    audio: Option<Box<dyn AudioPlayer>>,
    /// Every loaded word, including mastered ones.
    words: HashMap<WordId, Word>,
    states: HashMap<WordId, QuizState>,
    /// Load order of word ids, for stable summaries.
    order: Vec<WordId>,
    pool: Vec<WordId>,
    index: Option<usize>,
    current: Option<WordId>,
    checked: bool,
    wrong: bool,
    answer: Option<String>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl QuizSession<StdRng> {
    /// Create an empty session with an entropy-seeded generator.
    pub fn new(settings: QuizSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }
}

impl<R: Rng> QuizSession<R> {
    /// Create an empty session drawing words with `rng`.
    pub fn with_rng(settings: QuizSettings, rng: R) -> Self {
        Self {
            settings,
            rng,
            audio: None,
            words: HashMap::new(),
            states: HashMap::new(),
            order: Vec::new(),
            pool: Vec::new(),
            index: None,
            current: None,
            checked: false,
            wrong: false,
            answer: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn with_audio_player(mut self, player: impl AudioPlayer + 'static) -> Self {
        self.audio = Some(Box::new(player));
        self
    }

    /// Start the quiz over `words` and select the first word to ask.
    ///
    /// Word order is preserved; a repeated id keeps its first occurrence.
    /// Returns `None` when there is nothing to ask.
    pub fn load_pool(&mut self, words: impl IntoIterator<Item = Word>) -> Option<GuessedWord<'_>> {
        self.words.clear();
        self.states.clear();
        self.order.clear();
        self.pool.clear();
        self.index = None;
        self.current = None;

        let mut seen = HashSet::new();
        for word in words {
            if !seen.insert(word.id) {
                debug!(word = %word.id, "skipping duplicate word");
                continue;
            }
            self.order.push(word.id);
            self.pool.push(word.id);
            self.states.insert(word.id, QuizState::default());
            self.words.insert(word.id, word);
        }

        self.started_at = Utc::now();
        self.finished_at = None;
        info!(words = self.pool.len(), "quiz started");

        self.advance(false)
    }

    /// Draw the next word to ask.
    ///
    /// With `avoid_repeat` the previously asked position is not drawn again,
    /// unless it is the only word left. Returns `None` once the pool is empty.
    pub fn advance(&mut self, avoid_repeat: bool) -> Option<GuessedWord<'_>> {
        self.checked = false;
        self.wrong = false;
        self.answer = None;

        let len = self.pool.len();
        if len == 0 {
            self.index = None;
            self.current = None;
            if self.finished_at.is_none() {
                self.finished_at = Some(Utc::now());
                info!("quiz complete");
            }
            return None;
        }

        let mut index = self.rng.gen_range(0..len);
        if avoid_repeat && len > 1 {
            while Some(index) == self.index {
                index = self.rng.gen_range(0..len);
            }
        }

        self.index = Some(index);
        self.current = Some(self.pool[index]);
        debug!(index, word = %self.pool[index], avoid_repeat, "drew word");

        self.current()
    }

    /// Move on after an answer, avoiding the same word if it was just missed.
    pub fn next(&mut self) -> Option<GuessedWord<'_>> {
        let avoid_repeat = self.current().is_some_and(|w| w.last_answer_wrong());
        self.advance(avoid_repeat)
    }

    /// Check `answer` against the current word and update the pool.
    pub fn submit(&mut self, answer: Option<&str>) -> Result<SubmitOutcome, QuizError> {
        let id = self.current.ok_or(QuizError::Finished)?;
        if self.checked {
            return Err(QuizError::AlreadyChecked);
        }
        let word = self.words.get(&id).ok_or(QuizError::Finished)?;
        let state = self.states.entry(id).or_default();

        let matched = match_answer(&word.to, answer, self.settings.abbreviation_mode);
        let mut mastered = false;

        match matched {
            Some(outcome) => {
                if !state.last_answer_wrong || self.pool.len() == 1 {
                    if let Some(position) = self.pool.iter().position(|p| *p == id) {
                        self.pool.remove(position);
                    }
                    mastered = true;
                }
                state.record_correct();
                debug!(word = %id, tier = ?outcome.tier, mastered, "answer accepted");
            }
            None => {
                state.record_wrong();
                self.wrong = true;
                debug!(word = %id, wrong_answers = state.wrong_answers, "answer rejected");
            }
        }

        self.checked = true;
        self.answer = answer.map(str::to_string);

        if let (Some(player), Some(audio)) = (&self.audio, &word.audio) {
            player.play(audio);
        }

        Ok(SubmitOutcome {
            correct: matched.is_some(),
            tier: matched.map(|m| m.tier),
            mastered,
            remaining: self.pool.len(),
        })
    }

    /// The word being asked, or `None` when the quiz is over.
    ///
    /// After a correct answer this is still the answered word, even if it has
    /// already left the pool, until [`advance`](Self::advance) is called.
    pub fn current(&self) -> Option<GuessedWord<'_>> {
        let id = self.current?;
        Some(GuessedWord {
            word: self.words.get(&id)?,
            state: self.states.get(&id)?,
        })
    }

    /// The current word's answer has been checked.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// The last checked answer was wrong.
    pub fn is_wrong(&self) -> bool {
        self.wrong
    }

    /// Answer submitted for the current word.
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    /// Words still in the pool.
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    pub fn is_complete(&self) -> bool {
        self.current.is_none() && self.pool.is_empty()
    }

    pub fn state_of(&self, id: WordId) -> Option<&QuizState> {
        self.states.get(&id)
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn summary(&self) -> SessionSummary {
        let mut missed: Vec<MissedWord> = self
            .order
            .iter()
            .filter_map(|id| {
                let state = self.states.get(id)?;
                let word = self.words.get(id)?;
                (state.wrong_answers > 0).then(|| MissedWord {
                    id: *id,
                    from: join_phrases(&word.from),
                    wrong_answers: state.wrong_answers,
                })
            })
            .collect();
        // Stable sort keeps load order among equals.
        missed.sort_by(|a, b| b.wrong_answers.cmp(&a.wrong_answers));

        SessionSummary {
            words: self.order.len(),
            mastered: self.order.len() - self.pool.len(),
            remaining: self.pool.len(),
            correct_answers: self.states.values().map(|s| s.correct_answers).sum(),
            wrong_answers: self.states.values().map(|s| s.wrong_answers).sum(),
            missed,
            started_at: self.started_at,
            finished_at: self.finished_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    fn session(seed: u64) -> QuizSession<StdRng> {
        QuizSession::with_rng(QuizSettings::default(), StdRng::seed_from_u64(seed))
    }

    fn numbers() -> Vec<Word> {
        vec![
            Word::new(1, ["egy"], ["one"]),
            Word::new(2, ["kettő"], ["two"]),
            Word::new(3, ["három"], ["three"]),
        ]
    }

    fn current_id<R: Rng>(session: &QuizSession<R>) -> WordId {
        session.current().expect("a word is being asked").id()
    }

    fn correct_answer<R: Rng>(session: &QuizSession<R>) -> String {
        session.current().expect("a word is being asked").word.to[0].phrase.clone()
    }

    /// Redraw without avoiding repeats until `id` is asked.
    fn ask<R: Rng>(session: &mut QuizSession<R>, id: WordId) {
        for _ in 0..1000 {
            if session.current().map(|w| w.id()) == Some(id) {
                return;
            }
            session.advance(false);
        }
        panic!("word {id} was never drawn");
    }

    #[derive(Clone, Default)]
    struct RecordingPlayer(Arc<Mutex<Vec<String>>>);

    impl AudioPlayer for RecordingPlayer {
        fn play(&self, audio_ref: &str) {
            self.0.lock().unwrap().push(audio_ref.to_string());
        }
    }

    #[test]
    fn single_word_session() {
        let mut session = session(1);
        session.load_pool(vec![Word::new(1, ["egy"], ["one"])]);

        let outcome = session.submit(Some("one")).unwrap();
        assert!(outcome.correct);
        assert!(outcome.mastered);
        assert_eq!(outcome.remaining, 0);
        assert_eq!(session.state_of(WordId(1)).unwrap().correct_answers, 1);
        assert!(session.is_checked());

        assert!(session.next().is_none());
        assert!(session.is_complete());
    }

    #[test]
    fn empty_pool_is_complete() {
        let mut session = session(2);
        assert!(session.load_pool(Vec::new()).is_none());
        assert!(session.is_complete());
        assert!(session.summary().finished_at.is_some());
        assert_eq!(session.submit(Some("x")), Err(QuizError::Finished));
    }

    #[test]
    fn wrong_answer_flags_word() {
        let mut session = session(3);
        session.load_pool(numbers());
        let id = current_id(&session);

        let outcome = session.submit(Some("nope")).unwrap();
        assert!(!outcome.correct);
        assert!(!outcome.mastered);
        assert_eq!(outcome.remaining, 3);
        assert!(session.is_wrong());
        assert_eq!(session.answer(), Some("nope"));

        let state = session.state_of(id).unwrap();
        assert_eq!(state.wrong_answers, 1);
        assert!(state.last_answer_wrong);
    }

    #[test]
    fn absent_answer_is_wrong() {
        let mut session = session(4);
        session.load_pool(numbers());
        let outcome = session.submit(None).unwrap();
        assert!(!outcome.correct);
        assert!(session.is_wrong());
    }

    #[test]
    fn missed_word_is_not_asked_again_immediately() {
        for seed in 0..50 {
            let mut session = session(seed);
            session.load_pool(numbers());
            let missed = current_id(&session);
            session.submit(Some("wrong")).unwrap();

            let next = session.next().unwrap().id();
            assert_ne!(next, missed, "seed {seed}");
        }
    }

    #[test]
    fn two_word_mastery() {
        let mut session = session(5);
        session.load_pool(numbers().into_iter().take(2));
        let a = current_id(&session);

        session.submit(Some("wrong")).unwrap();
        let b = session.next().unwrap().id();
        assert_ne!(a, b);

        let answer = correct_answer(&session);
        let outcome = session.submit(Some(&answer)).unwrap();
        assert!(outcome.mastered);
        assert_eq!(outcome.remaining, 1);

        // Only the missed word is left, so a correct answer removes it
        // although it is still flagged.
        assert_eq!(session.next().unwrap().id(), a);
        assert!(session.current().unwrap().last_answer_wrong());
        let answer = correct_answer(&session);
        let outcome = session.submit(Some(&answer)).unwrap();
        assert!(outcome.mastered);
        assert_eq!(outcome.remaining, 0);

        assert!(session.next().is_none());
    }

    #[test]
    fn missed_word_recurs_until_answered_cleanly() {
        let mut session = session(6);
        session.load_pool(numbers());
        let missed = current_id(&session);

        session.submit(Some("wrong")).unwrap();
        session.next();
        let other = current_id(&session);
        let answer = correct_answer(&session);
        assert!(session.submit(Some(&answer)).unwrap().mastered);
        assert_eq!(session.remaining(), 2);
        assert_eq!(session.summary().mastered, 1);
        assert!(session.state_of(other).unwrap().correct_answers == 1);

        // First correct answer after a miss keeps the word in the pool.
        ask(&mut session, missed);
        let answer = correct_answer(&session);
        let outcome = session.submit(Some(&answer)).unwrap();
        assert!(outcome.correct);
        assert!(!outcome.mastered);
        assert_eq!(outcome.remaining, 2);
        assert!(!session.state_of(missed).unwrap().last_answer_wrong);

        // The next correct answer masters it.
        session.advance(false);
        ask(&mut session, missed);
        let answer = correct_answer(&session);
        assert!(session.submit(Some(&answer)).unwrap().mastered);
        assert_eq!(session.remaining(), 1);
        assert_eq!(session.state_of(missed).unwrap().correct_answers, 2);
    }

    #[test]
    fn last_word_retry_returns_same_word() {
        let mut session = session(7);
        session.load_pool(vec![Word::new(9, ["kilenc"], ["nine"])]);

        session.submit(Some("ten")).unwrap();
        let again = session.advance(true).unwrap();
        assert_eq!(again.id(), WordId(9));
        assert!(again.last_answer_wrong());

        assert!(session.submit(Some("Nine")).unwrap().mastered);
        assert!(session.next().is_none());
    }

    #[test]
    fn advance_resets_check_state() {
        let mut session = session(8);
        session.load_pool(numbers());
        session.submit(Some("wrong")).unwrap();
        assert!(session.is_checked());

        session.next();
        assert!(!session.is_checked());
        assert!(!session.is_wrong());
        assert_eq!(session.answer(), None);
    }

    #[test]
    fn submit_twice_is_rejected() {
        let mut session = session(9);
        session.load_pool(numbers());
        let id = current_id(&session);
        session.submit(Some("wrong")).unwrap();

        assert_eq!(session.submit(Some("wrong")), Err(QuizError::AlreadyChecked));
        assert_eq!(session.state_of(id).unwrap().wrong_answers, 1);
    }

    #[test]
    fn submit_before_load_is_rejected() {
        let mut session = session(10);
        assert_eq!(session.submit(Some("one")), Err(QuizError::Finished));
    }

    #[test]
    fn duplicate_words_are_loaded_once() {
        let mut session = session(11);
        let mut words = numbers();
        words.push(Word::new(2, ["kettő"], ["two"]));
        session.load_pool(words);
        assert_eq!(session.remaining(), 3);
        assert_eq!(session.summary().words, 3);
    }

    #[test]
    fn audio_played_after_each_check() {
        let player = RecordingPlayer::default();
        let mut session = session(12).with_audio_player(player.clone());
        session.load_pool(vec![Word::new(1, ["egy"], ["one"]).with_audio("egy.mp3")]);

        session.submit(Some("two")).unwrap();
        session.next();
        session.submit(Some("one")).unwrap();

        assert_eq!(
            *player.0.lock().unwrap(),
            vec!["egy.mp3".to_string(), "egy.mp3".to_string()]
        );
    }

    #[test]
    fn word_without_audio_plays_nothing() {
        let player = RecordingPlayer::default();
        let mut session = session(13).with_audio_player(player.clone());
        session.load_pool(numbers());
        session.submit(Some("one")).unwrap();
        assert!(player.0.lock().unwrap().is_empty());
    }

    #[test]
    fn word_boundary_setting_is_used() {
        let settings = QuizSettings {
            abbreviation_mode: crate::types::AbbreviationMode::WordBoundary,
        };
        let mut session = QuizSession::with_rng(settings, StdRng::seed_from_u64(14));
        session.load_pool(vec![Word::new(1, ["Jól vagyok"], ["I'm fine"])]);
        let outcome = session.submit(Some("i am fine")).unwrap();
        assert_eq!(outcome.tier, Some(MatchTier::Abbreviation));
    }

    #[test]
    fn summary_lists_missed_words() {
        let mut session = session(15);
        session.load_pool(numbers());

        ask(&mut session, WordId(2));
        session.submit(Some("wrong")).unwrap();
        session.advance(false);
        ask(&mut session, WordId(2));
        session.submit(Some("still wrong")).unwrap();
        session.advance(false);
        ask(&mut session, WordId(3));
        session.submit(Some("wrong")).unwrap();

        let summary = session.summary();
        assert_eq!(summary.wrong_answers, 3);
        assert_eq!(summary.correct_answers, 0);
        assert_eq!(
            summary.missed,
            vec![
                MissedWord {
                    id: WordId(2),
                    from: "kettő".to_string(),
                    wrong_answers: 2
                },
                MissedWord {
                    id: WordId(3),
                    from: "három".to_string(),
                    wrong_answers: 1
                },
            ]
        );
        assert!(summary.finished_at.is_none());
    }
}
