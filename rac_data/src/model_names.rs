//! Human readable names for model IDs.
//!
//! The names are loaded from plain text lists with one `<id> <name>` entry per line.
//! The ID may be decimal or hexadecimal with a `0x` prefix.
//! Blank lines and lines starting with `#` are ignored.
/*!
```text
# rc1_models.txt
0x0000 Ratchet
0x01a4 Crate
12 Vendor
```
 */
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use log::{debug, warn};

use rac_lib::GameType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A lookup table from model ID to name.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelNames {
    names: AHashMap<u16, String>,
}

impl ModelNames {
    /// Parses a model list, skipping lines that can't be parsed.
    pub fn parse(text: &str) -> Self {
        let mut names = AHashMap::new();
        for (line_number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match parse_line(line) {
                Some((id, name)) => {
                    names.insert(id, name.to_string());
                }
                None => warn!("Skipping invalid model list line {}: {:?}", line_number + 1, line),
            }
        }
        Self { names }
    }

    /// Reads the model list from `path`.
    /// A missing file produces an empty list instead of an error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let names = Self::parse(&text);
                debug!("Loaded {} model names from {:?}", names.len(), path);
                Ok(names)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Model list {:?} not found. Model names will not be available.", path);
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Reads the model list for `game` in `directory`.
    /// See [list_path](ModelNames::list_path) for the expected file name.
    pub fn for_game<P: AsRef<Path>>(directory: P, game: GameType) -> std::io::Result<Self> {
        Self::from_file(Self::list_path(directory, game))
    }

    /// The path of the model list for `game` like "models/rc2_models.txt".
    pub fn list_path<P: AsRef<Path>>(directory: P, game: GameType) -> PathBuf {
        directory.as_ref().join(format!("{}_models.txt", game.key()))
    }

    pub fn get(&self, id: u16) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn insert(&mut self, id: u16, name: String) -> Option<String> {
        self.names.insert(id, name)
    }

    /// The name for `id` or the hexadecimal ID like "0x01a4" if there is no name.
    pub fn display_name(&self, id: u16) -> String {
        match self.get(id) {
            Some(name) => name.to_string(),
            None => format!("{:#06x}", id),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn parse_line(line: &str) -> Option<(u16, &str)> {
    let (id, name) = line.split_once(char::is_whitespace)?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((parse_id(id)?, name))
}

fn parse_id(id: &str) -> Option<u16> {
    match id.strip_prefix("0x").or_else(|| id.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => id.parse().ok(),
    }
}
