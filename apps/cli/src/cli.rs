//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for vocab-quiz
#[derive(Parser, Debug)]
#[command(name = "vocab-quiz")]
#[command(author, version, about = "Vocabulary quiz: learn the words of a unit by typing their translations")]
#[command(long_about = r#"
Vocabulary quiz asks the words of a unit in random order until every word
has been answered correctly. A word answered wrong comes back later and
must be answered correctly once more before it is dropped.

Words come from the word service (VOCAB_API_URL) or, with --file, from a
JSON file mapping unit ids to words.

Example:
  vocab-quiz quiz animals
  vocab-quiz --file units.json words animals
  vocab-quiz add animals --from kutya --to dog --to hound
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Read units from a JSON file instead of the word service
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a quiz over the words of a unit
    Quiz {
        /// Unit id
        unit: String,

        /// Expand contractions only where they stand as whole words
        #[arg(long)]
        word_boundary: bool,
    },

    /// List the words of a unit
    Words {
        /// Unit id
        unit: String,
    },

    /// Add a translation to a unit
    Add {
        /// Unit id
        unit: String,

        /// Source-language phrase (can be specified multiple times)
        #[arg(long = "from", value_name = "PHRASE", required = true)]
        from: Vec<String>,

        /// Accepted translation (can be specified multiple times)
        #[arg(long = "to", value_name = "PHRASE", required = true)]
        to: Vec<String>,

        /// Example sentence
        #[arg(long)]
        example: Option<String>,

        /// Translation of the example sentence
        #[arg(long)]
        translated_example: Option<String>,
    },

    /// Remove a word by id
    Remove {
        /// Word id
        id: i64,
    },
}
