//! Service configuration read from the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ExcerptError, ExcerptResult};
use crate::formatter::settings::{DEFAULT_TRIM_LENGTH, ExcerptSettings};

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable holding the HTTP port.
pub const PORT_VAR: &str = "EXCERPT_PORT";
/// Environment variable holding the default trim length.
pub const TRIM_LENGTH_VAR: &str = "EXCERPT_TRIM_LENGTH";
/// Environment variable holding the settings file path.
pub const SETTINGS_PATH_VAR: &str = "EXCERPT_SETTINGS_PATH";

/// Configuration of the excerpt service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP port.
    pub port: u16,
    /// Trim length used when a display has no saved settings.
    pub default_trim_length: u32,
    /// JSON file for display settings; kept in memory when unset.
    pub settings_path: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            default_trim_length: DEFAULT_TRIM_LENGTH,
            settings_path: None,
        }
    }
}

impl ServiceConfig {
    /// Read configuration from process environment variables.
    ///
    /// # Errors
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_env() -> ExcerptResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults.
    ///
    /// # Errors
    /// Returns an error if a value does not parse or fails validation.
    pub fn from_lookup<F>(lookup: F) -> ExcerptResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup(PORT_VAR) {
            config.port = parse_var(PORT_VAR, &port)?;
        }
        if let Some(length) = lookup(TRIM_LENGTH_VAR) {
            config.default_trim_length = parse_var(TRIM_LENGTH_VAR, &length)?;
        }
        config.settings_path = lookup(SETTINGS_PATH_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range.
    pub fn validate(&self) -> ExcerptResult<()> {
        if self.port == 0 {
            return Err(ExcerptError::InvalidConfiguration(format!(
                "{PORT_VAR} must be > 0"
            )));
        }
        if self.default_trim_length == 0 {
            return Err(ExcerptError::InvalidConfiguration(format!(
                "{TRIM_LENGTH_VAR} must be >= 1"
            )));
        }
        Ok(())
    }

    /// Settings applied to displays without saved settings.
    #[must_use]
    pub const fn default_settings(&self) -> ExcerptSettings {
        ExcerptSettings {
            trim_length: self.default_trim_length,
        }
    }
}

fn parse_var<T>(name: &str, raw: &str) -> ExcerptResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ExcerptError::InvalidConfiguration(format!("{name}={raw:?}: {e}")))
}
