//! Terminal quiz loop.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use quiz_core::{join_phrases, MatchTier, QuizSession, SessionSummary, Word};
use rand::Rng;

use crate::media::MediaResolver;

/// Typing this instead of an answer ends the quiz early.
pub const QUIT: &str = ":q";

/// Ask words from `session` until the pool is empty, input ends or the
/// learner quits. The session must already be loaded.
pub fn run_quiz<R, I, O>(
    session: &mut QuizSession<R>,
    media: &MediaResolver,
    mut input: I,
    mut out: O,
) -> io::Result<SessionSummary>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    while let Some(guessed) = session.current() {
        let prompt = join_display(&guessed.word.from);
        let image = media.image_path(guessed.word);

        writeln!(out)?;
        writeln!(out, "{} {}", format!("[{} left]", session.remaining()).dimmed(), prompt.bold())?;
        if let Some(path) = image {
            writeln!(out, "  image: {}", path.display())?;
        }
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let answer = line.trim_end_matches(['\n', '\r']);
        if answer == QUIT {
            break;
        }

        let outcome = session
            .submit(Some(answer))
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        if let Some(answered) = session.current() {
            if outcome.correct {
                writeln!(out, "{}{}", "correct".green().bold(), tier_note(outcome.tier))?;
                if answered.word.to.len() > 1 {
                    writeln!(out, "  also: {}", join_display(&answered.word.to))?;
                }
            } else {
                writeln!(out, "{}", "wrong".red().bold())?;
                writeln!(out, "  answer: {}", join_display(&answered.word.to))?;
            }
            write_example(&mut out, answered.word)?;
        }

        session.next();
    }

    let summary = session.summary();
    write_summary(&mut out, &summary)?;
    Ok(summary)
}

fn tier_note(tier: Option<MatchTier>) -> &'static str {
    match tier {
        Some(MatchTier::Abbreviation) => " (contraction expanded)",
        Some(MatchTier::Punctuation) => " (punctuation ignored)",
        _ => "",
    }
}

fn join_display(phrases: &[quiz_core::Phrase]) -> String {
    join_phrases(phrases).replace(';', ", ")
}

fn write_example<O: Write>(out: &mut O, word: &Word) -> io::Result<()> {
    if let Some(example) = &word.example {
        write!(out, "  example: {}", example.italic())?;
        match &word.translated_example {
            Some(translated) => writeln!(out, " = {}", translated.italic())?,
            None => writeln!(out)?,
        }
    }
    Ok(())
}

fn write_summary<O: Write>(out: &mut O, summary: &SessionSummary) -> io::Result<()> {
    writeln!(out)?;
    if summary.remaining == 0 {
        writeln!(out, "{}", "All words learned!".green().bold())?;
    } else {
        writeln!(out, "Stopped with {} of {} words left.", summary.remaining, summary.words)?;
    }
    writeln!(
        out,
        "{} correct, {} wrong answers",
        summary.correct_answers, summary.wrong_answers
    )?;

    if !summary.missed.is_empty() {
        writeln!(out, "Words to practise:")?;
        for missed in &summary.missed {
            writeln!(out, "  {} ({}x wrong)", missed.from.replace(';', ", "), missed.wrong_answers)?;
        }
    }
    Ok(())
}
