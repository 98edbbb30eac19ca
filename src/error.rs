use std::path::PathBuf;
use thiserror::Error;

use crate::network::AntennaId;

/// Core library errors
#[derive(Error, Debug)]
pub enum PickerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("Unknown antenna: {0}")]
    UnknownAntenna(AntennaId),

    #[error("Picker for antenna {0} was closed")]
    PickerClosed(AntennaId),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Scenario loading and validation errors
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Failed to read scenario file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Duplicate name '{0}'")]
    DuplicateName(String),

    #[error("'{referenced_by}' refers to unknown body '{name}'")]
    UnknownBody { name: String, referenced_by: String },

    #[error("Antenna '{antenna}' targets unknown body or satellite '{name}'")]
    UnknownTarget { name: String, antenna: String },

    #[error("Unknown antenna '{0}'")]
    UnknownAntenna(String),

    #[error("Scenario declares no antennas")]
    NoAntennas,

    #[error("Invalid color '{0}', expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PickerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ConfigError::Invalid("indent_width must be positive".into());
        assert!(err.to_string().contains("indent_width"));
    }

    #[test]
    fn error_conversion() {
        let config_err = ConfigError::Invalid("test".into());
        let picker_err: PickerError = config_err.into();
        assert!(matches!(picker_err, PickerError::Config(_)));
    }

    #[test]
    fn scenario_error_names_the_offender() {
        let err = ScenarioError::UnknownBody {
            name: "Vulcan".into(),
            referenced_by: "Relay 1".into(),
        };
        let message = err.to_string();
        assert!(message.contains("Vulcan"));
        assert!(message.contains("Relay 1"));
    }
}
