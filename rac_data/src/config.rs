//! Editor settings and the state shared between editor operations.
//!
//! Settings are stored in an INI file:
/*!
```ini
[editor]
game = rc2
model_lists = data/model_lists
```
 */
//! Missing keys use the values from [EditorConfig::default].
use std::path::{Path, PathBuf};

use ini::Ini;
use log::info;
use thiserror::Error;

use rac_lib::{GameType, UnknownGameError};

use crate::model_names::ModelNames;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const EDITOR_SECTION: &str = "editor";

/// Errors while loading the editor configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An error occurred while reading a file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid INI.
    #[error(transparent)]
    Ini(#[from] ini::ParseError),

    /// The configured game is not one of the supported [GameType] keys.
    #[error(transparent)]
    UnknownGame(#[from] UnknownGameError),
}

/// Settings for the game being edited.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub game: GameType,
    /// The directory containing the model lists for each game.
    pub model_list_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            game: GameType::RaC1,
            model_list_dir: PathBuf::from("model_lists"),
        }
    }
}

impl EditorConfig {
    /// Reads the configuration from the INI file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|e| match e {
            ini::Error::Io(e) => ConfigError::Io(e),
            ini::Error::Parse(e) => ConfigError::Ini(e),
        })?;
        Self::from_ini(&ini)
    }

    /// Parses the configuration from INI `text`.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text)?;
        Self::from_ini(&ini)
    }

    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(section) = ini.section(Some(EDITOR_SECTION)) {
            if let Some(game) = section.get("game") {
                config.game = game.parse()?;
            }
            if let Some(dir) = section.get("model_lists") {
                config.model_list_dir = PathBuf::from(dir);
            }
        }
        Ok(config)
    }

    /// Converts the configuration back to INI.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some(EDITOR_SECTION))
            .set("game", self.game.key())
            .set("model_lists", self.model_list_dir.to_string_lossy());
        ini
    }
}

/// Data loaded once per editor session and passed to operations that need it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct EditorContext {
    config: EditorConfig,
    model_names: ModelNames,
}

impl EditorContext {
    /// Loads the model list for the configured game.
    /// A missing model list produces an empty name table.
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        let model_names = ModelNames::for_game(&config.model_list_dir, config.game)?;
        info!(
            "Loaded {} model names for {}",
            model_names.len(),
            config.game
        );
        Ok(Self {
            config,
            model_names,
        })
    }

    /// Creates a context with an already loaded name table.
    pub fn with_model_names(config: EditorConfig, model_names: ModelNames) -> Self {
        Self {
            config,
            model_names,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn game(&self) -> GameType {
        self.config.game
    }

    pub fn model_names(&self) -> &ModelNames {
        &self.model_names
    }

    /// The display name for `model_id`.
    /// See [ModelNames::display_name].
    pub fn model_name(&self, model_id: u16) -> String {
        self.model_names.display_name(model_id)
    }
}
