//! # Environment
//!
//! Selects which configuration file is loaded. The environment is read from
//! `IPM_ENV`, then `RUST_ENV`, and defaults to `development`.
//!
//! ```rust
//! use std::str::FromStr;
//! use ipm_modeler::environment::Environment;
//!
//! assert_eq!(Environment::from_str("test"), Ok(Environment::Test));
//! assert_eq!(Environment::from("qa".to_string()).to_string(), "qa");
//! ```

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{config::Config, Result};

pub const DEFAULT_ENVIRONMENT: &str = "development";

#[must_use]
pub fn resolve_from_env() -> String {
    std::env::var("IPM_ENV")
        .or_else(|_| std::env::var("RUST_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string())
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    #[serde(rename = "production")]
    Production,
    #[serde(rename = "development")]
    #[default]
    Development,
    #[serde(rename = "test")]
    Test,
    Any(String),
}

impl Environment {
    /// Loads the configuration of this environment from `config/`.
    ///
    /// # Errors
    ///
    /// Returns an error when no configuration file exists or it cannot be
    /// parsed.
    pub fn load(&self) -> Result<Config> {
        Config::new(self)
    }

    /// Loads the configuration of this environment from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when no configuration file exists or it cannot be
    /// parsed.
    pub fn load_from_folder(&self, path: &Path) -> Result<Config> {
        Config::from_folder(self, path)
    }
}

impl From<String> for Environment {
    fn from(env: String) -> Self {
        Self::from_str(&env).unwrap_or(Self::Any(env))
    }
}

impl FromStr for Environment {
    type Err = &'static str;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        match input {
            "production" => Ok(Self::Production),
            "development" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            _ => Err(
                "error parsing environment: expected one of \"development\", \"production\", \
                 \"test\"",
            ),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => "production".fmt(f),
            Self::Development => "development".fmt(f),
            Self::Test => "test".fmt(f),
            Self::Any(s) => s.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Environment;

    #[test]
    fn display_round_trips_through_from() {
        for env in [
            Environment::Production,
            Environment::Development,
            Environment::Test,
            Environment::Any("staging".to_string()),
        ] {
            assert_eq!(Environment::from(env.to_string()), env);
        }
    }
}
