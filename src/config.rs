use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::picker::{PickerStyle, TreeBuilder, NO_TARGET_LABEL};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub picker: PickerConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Cells of indentation per tree level
    pub indent_width: u16,
    /// Cells reserved for the expand/collapse toggle
    pub toggle_width: u16,
    /// Label of the entry that clears the target
    pub no_target_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Event poll interval in milliseconds
    pub tick_rate_ms: u64,
    /// Paint rows with their body's orbit color
    pub show_colors: bool,
    /// Scenario file to load when none is given on the command line
    pub scenario: Option<PathBuf>,
    /// Antenna to pick for when none is given on the command line
    pub antenna: Option<String>,
    /// Where `-v` logs go while the TUI owns the terminal
    pub log_file: Option<PathBuf>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            toggle_width: 2,
            no_target_label: NO_TARGET_LABEL.to_string(),
        }
    }
}

impl PickerConfig {
    pub fn builder(&self) -> TreeBuilder {
        TreeBuilder::new().with_no_target_label(self.no_target_label.clone())
    }

    pub fn style(&self) -> PickerStyle {
        PickerStyle::from(self)
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            show_colors: true,
            scenario: None,
            antenna: None,
            log_file: None,
        }
    }
}

impl TuiConfig {
    /// Log file for TUI sessions: `log_file`, else `<cache dir>/target-picker/tui.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::cache_dir().map(|dir| dir.join("target-picker").join("tui.log"))
        })
    }
}

impl Config {
    /// Default config file location: `<config dir>/target-picker/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("target-picker").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// if present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;
        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ParseError {
                path: path.clone(),
                source,
            })?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.picker.indent_width == 0 {
            return Err(ConfigError::Invalid(
                "picker.indent_width must be at least 1".into(),
            ));
        }
        if self.picker.toggle_width == 0 {
            return Err(ConfigError::Invalid(
                "picker.toggle_width must be at least 1".into(),
            ));
        }
        if self.picker.no_target_label.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "picker.no_target_label must not be empty".into(),
            ));
        }
        if self.tui.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "tui.tick_rate_ms must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
