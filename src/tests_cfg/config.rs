use crate::{
    config::{Config, Logger, ModelerSettings},
    logger::{Format, LogLevel},
};

#[must_use]
pub fn test_config() -> Config {
    Config {
        logger: Logger {
            enable: false,
            level: LogLevel::Off,
            format: Format::Json,
            override_filter: None,
            file_appender: None,
        },
        modeler: ModelerSettings {
            object_namespace: "urn:example:object:".to_string(),
            ..ModelerSettings::default()
        },
    }
}
