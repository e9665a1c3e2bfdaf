use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::modes::InputMethod;

pub const DEFAULT_BOUNDARIES: &str = " \t\n\r.,!?";

/// Settings owned by whoever wires a session to an editing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vietnamese input on at startup.
    pub enabled: bool,
    pub input_method: InputMethod,
    /// Characters that end the word handed to the engine.
    pub boundaries: String,
    /// Shorter fragments are left alone.
    pub min_fragment_len: usize,
    /// Leave emails, URLs and identifiers untouched.
    pub skip_code_like: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            input_method: InputMethod::Telex,
            boundaries: DEFAULT_BOUNDARIES.to_string(),
            min_fragment_len: 2,
            skip_code_like: false,
        }
    }
}

impl Config {
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
