//! Word media: resolving image and audio references, playing audio.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use quiz_core::{AudioPlayer, Word};
use tracing::debug;

/// Maps a word's media references to files under the assets directory.
#[derive(Debug, Clone)]
pub struct MediaResolver {
    assets_dir: PathBuf,
}

impl MediaResolver {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    pub fn image_path(&self, word: &Word) -> Option<PathBuf> {
        word.image_url
            .as_deref()
            .map(|image| self.assets_dir.join("images").join(image))
    }

    pub fn audio_path(&self, audio_ref: &str) -> PathBuf {
        self.assets_dir.join("audios").join(audio_ref)
    }
}

/// Plays audio by spawning an external player command with the file path
/// as its last argument.
pub struct CommandAudioPlayer {
    program: String,
    args: Vec<String>,
    resolver: MediaResolver,
}

impl CommandAudioPlayer {
    /// Build from a command line such as `mpg123 -q`. Returns `None` for a
    /// blank command.
    pub fn new(command: &str, resolver: MediaResolver) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
            resolver,
        })
    }

    fn command(&self, audio_ref: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(self.resolver.audio_path(audio_ref))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

impl AudioPlayer for CommandAudioPlayer {
    fn play(&self, audio_ref: &str) {
        let mut child = match self.command(audio_ref).spawn() {
            Ok(child) => child,
            Err(e) => {
                debug!(error = %e, audio = audio_ref, "audio player failed to start");
                return;
            }
        };

        let pid = child.id();
        debug!(pid, audio = audio_ref, "playing audio");

        // The caller never waits; a detached thread reaps the player.
        thread::spawn(move || match child.wait() {
            Ok(status) => debug!(pid, %status, "audio player exited"),
            Err(e) => debug!(pid, error = %e, "failed to wait for audio player"),
        });
    }
}
