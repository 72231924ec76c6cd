pub mod cli;
pub mod commands;
pub mod config;
pub mod file;
pub mod http;
pub mod media;
pub mod quiz;

use anyhow::Context;
use clap::Parser;
use quiz_core::{UnitId, WordId, WordService, WordSource};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::file::FileWordSource;
use crate::http::HttpWordSource;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from_env()?;

    let source: Box<dyn WordSource> = match &cli.file {
        Some(path) => {
            tracing::info!("Reading words from {}", path.display());
            Box::new(FileWordSource::new(path))
        }
        None => {
            tracing::info!("Using word service at {}", config.api_url);
            Box::new(
                HttpWordSource::new(&config.api_url, config.api_timeout)
                    .context("failed to create word service client")?,
            )
        }
    };
    let mut service = WordService::new(source);

    match cli.command {
        Command::Quiz {
            unit,
            word_boundary,
        } => commands::quiz(&mut service, &config, UnitId::new(unit), word_boundary).await,
        Command::Words { unit } => commands::words(&mut service, UnitId::new(unit)).await,
        Command::Add {
            unit,
            from,
            to,
            example,
            translated_example,
        } => {
            commands::add(
                &mut service,
                UnitId::new(unit),
                from,
                to,
                example,
                translated_example,
            )
            .await
        }
        Command::Remove { id } => commands::remove(&mut service, WordId(id)).await,
    }
}

/// Log to stderr so quiz output stays readable. `-v` flags take precedence
/// over RUST_LOG.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
