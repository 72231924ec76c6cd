//! Subcommand handlers.

use std::io::{self, Write};

use anyhow::{bail, Result};
use colored::Colorize;
use quiz_core::{
    join_phrases, AbbreviationMode, Phrase, QuizSession, TranslationDraft, UnitId, WordId,
    WordService, WordSource,
};
use tracing::info;

use crate::config::Config;
use crate::media::{CommandAudioPlayer, MediaResolver};
use crate::quiz::run_quiz;

/// Fetch a unit and quiz the learner on it over stdin/stdout.
pub async fn quiz<S: WordSource>(
    service: &mut WordService<S>,
    config: &Config,
    unit: UnitId,
    word_boundary: bool,
) -> Result<()> {
    let words = service.fetch_words(&unit).await?.to_vec();
    if words.is_empty() {
        println!("Unit {} has no words.", unit);
        return Ok(());
    }

    let mut settings = config.quiz.clone();
    if word_boundary {
        settings.abbreviation_mode = AbbreviationMode::WordBoundary;
    }

    let media = MediaResolver::new(&config.assets_dir);
    let mut session = QuizSession::new(settings);
    if let Some(player) = config
        .audio_cmd
        .as_deref()
        .and_then(|cmd| CommandAudioPlayer::new(cmd, media.clone()))
    {
        session = session.with_audio_player(player);
    }
    session.load_pool(words);

    let stdin = io::stdin();
    let summary = run_quiz(&mut session, &media, stdin.lock(), io::stdout().lock())?;
    info!(
        unit = %unit,
        mastered = summary.mastered,
        correct = summary.correct_answers,
        wrong = summary.wrong_answers,
        "quiz finished"
    );
    Ok(())
}

/// Print the words of a unit.
pub async fn words<S: WordSource>(service: &mut WordService<S>, unit: UnitId) -> Result<()> {
    let words = service.fetch_words(&unit).await?;
    let mut out = io::stdout().lock();

    if words.is_empty() {
        writeln!(out, "Unit {} has no words.", unit)?;
        return Ok(());
    }

    for word in words {
        writeln!(
            out,
            "{:>6}  {}  {}  {}",
            word.id.to_string().dimmed(),
            join_phrases(&word.from),
            "->".dimmed(),
            join_phrases(&word.to).bold()
        )?;
        if let Some(example) = &word.example {
            writeln!(
                out,
                "        {} = {}",
                example.italic(),
                word.translated_example.as_deref().unwrap_or("").italic()
            )?;
        }
    }
    Ok(())
}

/// Add a translation to a unit.
pub async fn add<S: WordSource>(
    service: &mut WordService<S>,
    unit: UnitId,
    from: Vec<String>,
    to: Vec<String>,
    example: Option<String>,
    translated_example: Option<String>,
) -> Result<()> {
    let draft = TranslationDraft {
        unit_id: unit,
        from: from.into_iter().map(Phrase::new).collect(),
        to: to.into_iter().map(Phrase::new).collect(),
        example,
        translated_example,
    };

    match service.add_content(draft).await? {
        Some(id) => {
            println!("Added word {}", id);
            Ok(())
        }
        None => bail!("the word source did not store the translation"),
    }
}

/// Remove a word by id.
pub async fn remove<S: WordSource>(service: &mut WordService<S>, id: WordId) -> Result<()> {
    if service.remove_content(id).await? {
        println!("Removed word {}", id);
        Ok(())
    } else {
        bail!("the word source did not remove word {}", id)
    }
}
