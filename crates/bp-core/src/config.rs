//! Decoder configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```json
//! {
//!   "prettify_names": true,
//!   "format_namespace": "KismetSchema",
//!   "enums": {
//!     "/Script/Engine.EDrawDebugTrace": [
//!       { "name": "None", "display_name": "None" },
//!       { "name": "ForOneFrame", "display_name": "For One Frame" }
//!     ]
//!   }
//! }
//! ```

use crate::loctext::SCHEMA_FORMAT_NAMESPACE;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// One member of an enum, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    /// Member name as written in a default value (`ForOneFrame`, `NewEnumerator0`).
    pub name: String,
    /// Text the editor shows for the member.
    pub display_name: String,
}

impl EnumMember {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
        }
    }
}

/// Enum class path → ordered members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumRegistry {
    enums: HashMap<String, Vec<EnumMember>>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class: impl Into<String>, members: Vec<EnumMember>) {
        self.enums.insert(class.into(), members);
    }

    pub fn members(&self, class: &str) -> Option<&[EnumMember]> {
        self.enums.get(class).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }

    /// Display name of `value` in enum `class`.
    ///
    /// `value` is matched against member names first, then, if it is a
    /// plain index, by position.
    pub fn display_name(&self, class: &str, value: &str) -> Option<&str> {
        let members = self.enums.get(class)?;
        members
            .iter()
            .find(|m| m.name == value)
            .or_else(|| value.parse::<usize>().ok().and_then(|i| members.get(i)))
            .map(|m| m.display_name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Turn `PinName` identifiers into display text (`ReturnValue` → `Return Value`).
    pub prettify_names: bool,
    /// Namespace marking the format string of `LOCGEN_FORMAT_NAMED`.
    pub format_namespace: String,
    pub enums: EnumRegistry,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            prettify_names: true,
            format_namespace: SCHEMA_FORMAT_NAMESPACE.to_string(),
            enums: EnumRegistry::default(),
        }
    }
}

static DEFAULT_CONFIG: LazyLock<DecodeConfig> = LazyLock::new(DecodeConfig::default);

impl DecodeConfig {
    /// Shared default configuration.
    pub fn shared() -> &'static DecodeConfig {
        &DEFAULT_CONFIG
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::debug!(
            "loaded decode config from {} ({} enums)",
            path.display(),
            config.enums.len()
        );
        Ok(config)
    }

    /// Like [`load`](Self::load), but reads only an enum registry.
    pub fn load_enums(path: impl AsRef<Path>) -> Result<EnumRegistry, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}
