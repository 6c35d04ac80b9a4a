//! # Configuration Management
//!
//! Configuration is read from `config/<env>.local.yaml` or, when that file is
//! absent, `config/<env>.yaml`. Files are rendered as Tera templates before
//! parsing, so values can come from the environment:
//!
//! ```yaml
//! logger:
//!   enable: true
//!   level: {{ get_env(name="IPM_LOG_LEVEL", default="info") }}
//!   format: compact
//! modeler:
//!   object_namespace: "urn:uuid:"
//!   prefer_child_count: true
//!   skip_ignored: true
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{environment::Environment, logger, materialize::DEFAULT_OBJECT_NAMESPACE, Error, Result};

static DEFAULT_FOLDER: OnceLock<PathBuf> = OnceLock::new();

fn get_default_folder() -> &'static PathBuf {
    DEFAULT_FOLDER.get_or_init(|| PathBuf::from("config"))
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logger: Logger,
    #[serde(default)]
    pub modeler: ModelerSettings,
}

/// Logger configuration.
///
/// Example (development):
/// ```yaml
/// logger:
///   enable: true
///   level: debug
///   format: compact
///   override_filter: ipm_modeler=trace
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Logger {
    /// Enable log write to stdout
    pub enable: bool,

    /// Set the logger level.
    pub level: logger::LogLevel,

    /// Set the logger format.
    pub format: logger::Format,

    /// Override our custom tracing filter.
    ///
    /// Set this to your own filter if you want to see traces from internal
    /// libraries.
    pub override_filter: Option<String>,

    /// Set this if you want to write log to file
    pub file_appender: Option<LoggerFileAppender>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggerFileAppender {
    /// Enable logger file appender
    pub enable: bool,

    /// Enable write log to file non-blocking
    #[serde(default)]
    pub non_blocking: bool,

    /// Set the logger file appender level.
    pub level: logger::LogLevel,

    /// Set the logger file appender format.
    pub format: logger::Format,

    /// Set the logger file appender rotation.
    pub rotation: logger::Rotation,

    /// Set the logger file appender dir
    ///
    /// default is `./logs`
    pub dir: Option<String>,

    /// Set log filename prefix
    pub filename_prefix: Option<String>,

    /// Set log filename suffix
    pub filename_suffix: Option<String>,

    /// Set the logger file appender keep max log files.
    pub max_log_files: usize,
}

/// Modeling behavior.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ModelerSettings {
    /// Prefix of minted domain object identifiers.
    #[serde(default = "default_object_namespace")]
    pub object_namespace: String,

    /// Order candidate node types by their preferred byte-stream child count.
    #[serde(default = "default_true")]
    pub prefer_child_count: bool,

    /// Leave ignored nodes out of materialization.
    #[serde(default = "default_true")]
    pub skip_ignored: bool,
}

fn default_object_namespace() -> String {
    DEFAULT_OBJECT_NAMESPACE.to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for ModelerSettings {
    fn default() -> Self {
        Self {
            object_namespace: default_object_namespace(),
            prefer_child_count: true,
            skip_ignored: true,
        }
    }
}

impl Config {
    /// Creates a new configuration instance based on the specified environment.
    ///
    /// # Errors
    ///
    /// Returns an error when no configuration file exists or it cannot be
    /// rendered or parsed.
    pub fn new(env: &Environment) -> Result<Self> {
        Self::from_folder(env, get_default_folder().as_path())
    }

    /// Loads configuration settings from a folder for the specified
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error when no configuration file exists or it cannot be
    /// rendered or parsed.
    pub fn from_folder(env: &Environment, path: &Path) -> Result<Self> {
        let files = [
            path.join(format!("{env}.local.yaml")),
            path.join(format!("{env}.yaml")),
        ];

        let selected_path = files.iter().find(|p| p.exists()).ok_or_else(|| {
            Error::Message(format!(
                "no configuration file found in folder: {}",
                path.display()
            ))
        })?;

        info!(selected_path =? selected_path, "loading environment from");

        let content = fs::read_to_string(selected_path)?;
        Self::from_template(&content).map_err(|err| match err {
            Error::YAML(err) => Error::YAMLFile(err, selected_path.to_string_lossy().to_string()),
            other => other,
        })
    }

    /// Renders `content` as a Tera template and parses the result.
    ///
    /// # Errors
    ///
    /// Returns an error when rendering or parsing fails.
    pub fn from_template(content: &str) -> Result<Self> {
        let rendered = tera::Tera::one_off(
            content,
            &tera::Context::from_serialize(serde_json::json!({}))?,
            false,
        )?;
        Ok(serde_yaml::from_str(&rendered)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ModelerSettings};
    use crate::logger::{Format, LogLevel};

    #[test]
    fn modeler_section_is_optional() {
        let config = Config::from_template(
            "logger:\n  enable: false\n  level: warn\n  format: json\n",
        )
        .expect("config");
        assert_eq!(config.modeler, ModelerSettings::default());
        assert!(matches!(config.logger.level, LogLevel::Warn));
        assert!(matches!(config.logger.format, Format::Json));
    }

    #[test]
    fn templates_read_the_environment() {
        let config = Config::from_template(
            "logger:\n  enable: true\n  level: info\n  format: compact\nmodeler:\n  \
             object_namespace: \"{{ get_env(name=\"IPM_TEST_UNSET_NAMESPACE\", \
             default=\"urn:example:\") }}\"\n  prefer_child_count: false\n",
        )
        .expect("config");
        assert_eq!(config.modeler.object_namespace, "urn:example:");
        assert!(!config.modeler.prefer_child_count);
        assert!(config.modeler.skip_ignored);
    }
}
