//! Persisted sequencer settings
//!
//! The repeat and shuffle modes survive restarts. They're stored as a small
//! JSON file and can be overridden from the environment:
//!
//! - `SOUL_SEQUENCER_REPEAT_MODE` = `off` | `one` | `all`
//! - `SOUL_SEQUENCER_SHUFFLE_MODE` = `off` | `on`

use crate::error::{Result, SequencerError};
use crate::types::{RepeatAndShuffleModes, RepeatMode, ShuffleMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Prefix of the environment variables overriding the settings file
pub const ENV_PREFIX: &str = "SOUL_SEQUENCER";

/// Repeat and shuffle modes to start a sequencer with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerSettings {
    /// Repeat mode
    pub repeat_mode: RepeatMode,

    /// Shuffle mode
    pub shuffle_mode: ShuffleMode,
}

impl SequencerSettings {
    /// Settings with the given modes
    pub fn new(repeat_mode: RepeatMode, shuffle_mode: ShuffleMode) -> Self {
        Self {
            repeat_mode,
            shuffle_mode,
        }
        .normalized()
    }

    /// Load settings from a JSON file, then apply environment overrides
    ///
    /// A missing file is not an error: defaults are used instead.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    fn load_with_prefix(path: &Path, env_prefix: &str) -> Result<Self> {
        let mut builder = config::Config::builder();

        if path.exists() {
            builder = builder.add_source(
                config::File::from(path).format(config::FileFormat::Json),
            );
        }

        builder = builder.add_source(config::Environment::with_prefix(env_prefix));

        let settings: Self = builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| SequencerError::Config(e.to_string()))?;

        debug!(path = %path.display(), ?settings, "Loaded sequencer settings");
        Ok(settings.normalized())
    }

    /// Write settings as JSON, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        info!(path = %path.display(), "Saved sequencer settings");
        Ok(())
    }

    /// Repeat One excludes shuffle; a stored (One, On) pair becomes (One, Off)
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.repeat_mode == RepeatMode::One {
            Self {
                shuffle_mode: ShuffleMode::Off,
                ..self
            }
        } else {
            self
        }
    }

    /// The settings as a mode pair
    pub fn modes(&self) -> RepeatAndShuffleModes {
        (self.repeat_mode, self.shuffle_mode)
    }
}

impl From<RepeatAndShuffleModes> for SequencerSettings {
    fn from((repeat_mode, shuffle_mode): RepeatAndShuffleModes) -> Self {
        Self::new(repeat_mode, shuffle_mode)
    }
}
