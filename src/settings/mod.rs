//! Layered configuration for the tool.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. Global `$CONFIG_DIR/rowseek/config.yaml`
//! 3. Local `.rowseek.yaml` in the current directory
//! 4. A file given with `--config` (must exist)
//! 5. `ROWSEEK_*` environment variables, e.g. `ROWSEEK_BASES_DIR`
//!
//! Command-line flags are applied on top with [`Settings::merge_with_cli`].
//!
//! Example file:
//! ```yaml
//! bases_dir: "/srv/leaks"
//! extension: "csv"
//! max_cell_width: 30
//! color: true
//! log_level: "warn"
//! ```

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::discover::{DEFAULT_EXTENSION, DiscoverOptions};
use crate::render::{DEFAULT_MAX_CELL_WIDTH, TableRenderer};
use crate::search::SearchOptions;

/// Name of the local configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".rowseek.yaml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "ROWSEEK";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the datasets
    #[serde(default = "default_bases_dir")]
    pub bases_dir: PathBuf,

    /// Dataset file extension
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Display width of a result cell, in characters
    #[serde(default = "default_max_cell_width")]
    pub max_cell_width: usize,

    /// Colored terminal output
    #[serde(default = "default_color")]
    pub color: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bases_dir() -> PathBuf {
    PathBuf::from("bases")
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_max_cell_width() -> usize {
    DEFAULT_MAX_CELL_WIDTH
}

fn default_color() -> bool {
    true
}

fn default_log_level() -> String {
    "error".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bases_dir: default_bases_dir(),
            extension: default_extension(),
            max_cell_width: default_max_cell_width(),
            color: default_color(),
            log_level: default_log_level(),
        }
    }
}

/// Values given on the command line. `None` leaves the configured value.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bases_dir: Option<PathBuf>,
    pub max_cell_width: Option<usize>,
    pub no_color: bool,
    pub log_level: Option<String>,
}

impl Settings {
    /// Loads settings from the default locations and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Loads settings, adding `config_path` as the highest-precedence file.
    ///
    /// # Errors
    ///
    /// Fails if `config_path` does not exist, a file cannot be parsed, or a
    /// value is out of range.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        let optional_files = [
            dirs::config_dir().map(|p| p.join("rowseek").join("config.yaml")),
            Some(PathBuf::from(LOCAL_CONFIG_FILE)),
        ];
        for path in optional_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        if let Some(path) = config_path {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let settings: Settings = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Applies command-line values on top of the loaded settings.
    pub fn merge_with_cli(mut self, cli: &CliOverrides) -> Result<Self> {
        if let Some(dir) = &cli.bases_dir {
            self.bases_dir = dir.clone();
        }
        if let Some(width) = cli.max_cell_width {
            self.max_cell_width = width;
        }
        if cli.no_color {
            self.color = false;
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.max_cell_width == 0 {
            bail!("max_cell_width must be at least 1");
        }
        if self.extension.trim_start_matches('.').is_empty() {
            bail!("extension must not be empty");
        }
        crate::telemetry::parse_level(&self.log_level)?;
        Ok(())
    }

    pub fn discover_options(&self) -> DiscoverOptions {
        DiscoverOptions {
            extension: self.extension.trim_start_matches('.').to_string(),
            ..DiscoverOptions::default()
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            discover: self.discover_options(),
            ..SearchOptions::new(&self.bases_dir)
        }
    }

    pub fn renderer(&self) -> TableRenderer {
        TableRenderer {
            max_cell_width: self.max_cell_width,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests;
