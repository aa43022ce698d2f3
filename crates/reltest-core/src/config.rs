use crate::error::ConfigError;
use serde::Deserialize;
use std::{fs, path::Path};

///
/// CONSTANTS
///

/// Default number of registered expectations listed in an unmatched-call message.
pub const DEFAULT_MAX_CANDIDATES: usize = 16;

///
/// MockConfig
///
/// Top-level mock configuration, typically read from `reltest.toml`.
/// Every field has a default; unknown keys are rejected.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MockConfig {
    pub diagnostics: DiagnosticsConfig,
}

impl MockConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }
}

///
/// DiagnosticsConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Registered expectations listed when a call matches nothing.
    pub max_candidates: usize,

    /// Also list expectations whose budget is already consumed.
    pub include_consumed: bool,

    /// Append the registration that would have accepted the call.
    pub suggest_registration: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            include_consumed: false,
            suggest_registration: true,
        }
    }
}
