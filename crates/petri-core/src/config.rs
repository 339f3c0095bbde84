//! Configuration loading and typed config structures for the Petri
//! simulation.
//!
//! The canonical configuration lives in `petri-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads the file. Every field has a
//! default, so a missing file or a partial file is always usable.
//!
//! Grid dimensions, the alive probability, and the colors that the original
//! program kept as process-wide mutable globals all live here and are
//! passed explicitly into the constructors that need them.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `petri-config.yaml`. All defaults match the
/// constants of the original program (200x200 grid, 4-pixel cells, 10%
/// initial life, white on black).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Grid dimensions and initial seeding.
    #[serde(default)]
    pub grid: GridConfig,

    /// Pixel-surface presentation settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Run boundaries and pacing.
    #[serde(default)]
    pub run: RunConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Grid dimensions and initial seeding.
///
/// Dimension and probability validation happens in the grid constructor,
/// which rejects zero dimensions and probabilities above 100.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GridConfig {
    /// Number of columns.
    #[serde(default = "default_width")]
    pub width: usize,

    /// Number of rows.
    #[serde(default = "default_height")]
    pub height: usize,

    /// Percentage of cells that start alive (0-100).
    #[serde(default = "default_alive_probability_percent")]
    pub alive_probability_percent: u8,

    /// Random seed for reproducibility.
    ///
    /// When unset, the shell derives a seed from wall-clock time at startup
    /// and logs it, so any run can still be reproduced afterwards.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            alive_probability_percent: default_alive_probability_percent(),
            seed: None,
        }
    }
}

/// Pixel-surface presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    /// Edge length of one cell on screen, in pixels.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,

    /// RGBA color of live cells.
    #[serde(default = "default_live_color")]
    pub live_color: [u8; 4],

    /// RGBA color of dead cells.
    #[serde(default = "default_dead_color")]
    pub dead_color: [u8; 4],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            live_color: default_live_color(),
            dead_color: default_dead_color(),
        }
    }
}

/// Run boundaries and pacing.
///
/// A value of 0 for `max_generations` means unlimited; a value of 0 for
/// `generation_interval_ms` means the simulation advances as fast as the
/// shell allows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Run without a window, to the configured limits.
    #[serde(default)]
    pub headless: bool,

    /// Maximum number of generations before the run ends (0 = unlimited).
    #[serde(default)]
    pub max_generations: u64,

    /// Minimum real-time milliseconds between generations (0 = uncapped).
    #[serde(default)]
    pub generation_interval_ms: u64,

    /// End the run when the grid revisits a recent configuration.
    #[serde(default)]
    pub detect_stagnation: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    ///
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_width() -> usize {
    200
}

const fn default_height() -> usize {
    200
}

const fn default_alive_probability_percent() -> u8 {
    10
}

const fn default_cell_size() -> u32 {
    4
}

const fn default_live_color() -> [u8; 4] {
    [0xFF, 0xFF, 0xFF, 0xFF]
}

const fn default_dead_color() -> [u8; 4] {
    [0x00, 0x00, 0x00, 0xFF]
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.grid.width, 200);
        assert_eq!(config.grid.height, 200);
        assert_eq!(config.grid.alive_probability_percent, 10);
        assert_eq!(config.grid.seed, None);
        assert_eq!(config.display.cell_size, 4);
        assert!(!config.run.headless);
        assert_eq!(config.run.max_generations, 0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
grid:
  width: 64
  height: 48
  alive_probability_percent: 25
  seed: 1234

display:
  cell_size: 8
  live_color: [0, 200, 0, 255]
  dead_color: [40, 40, 40, 255]

run:
  headless: true
  max_generations: 500
  generation_interval_ms: 50
  detect_stagnation: true

logging:
  level: "debug"
"#;

        let config = SimulationConfig::parse(yaml).unwrap();

        assert_eq!(config.grid.width, 64);
        assert_eq!(config.grid.height, 48);
        assert_eq!(config.grid.alive_probability_percent, 25);
        assert_eq!(config.grid.seed, Some(1234));
        assert_eq!(config.display.cell_size, 8);
        assert_eq!(config.display.live_color, [0, 200, 0, 255]);
        assert_eq!(config.display.dead_color, [40, 40, 40, 255]);
        assert!(config.run.headless);
        assert_eq!(config.run.max_generations, 500);
        assert_eq!(config.run.generation_interval_ms, 50);
        assert!(config.run.detect_stagnation);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "grid:\n  seed: 7\n";
        let config = SimulationConfig::parse(yaml).unwrap();

        // Seed is overridden
        assert_eq!(config.grid.seed, Some(7));
        // Everything else uses defaults
        assert_eq!(config.grid.width, 200);
        assert_eq!(config.display.cell_size, 4);
        assert_eq!(config.run.generation_interval_ms, 0);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = SimulationConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        let result = SimulationConfig::parse("grid: [not, a, mapping]");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("petri-config.yaml");
        if path.exists() {
            let config = SimulationConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
