//! Configuration loading and typed config structures for Warren.
//!
//! The canonical configuration lives in `warren-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads and validates the file.
//! Every field has a default, so an empty document yields the stock run:
//! a 15x10 board with one rabbit at (5, 5).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::statistics::Metric;

/// Environment variable that overrides `world.seed`.
pub const SEED_ENV_VAR: &str = "WARREN_SEED";

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

    /// The configuration parsed but describes an impossible run.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `warren-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, seed, timing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Board size.
    #[serde(default)]
    pub board: BoardConfig,

    /// Simulation boundary parameters.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Initial roster of actors.
    #[serde(default = "default_actors")]
    pub actors: Vec<ActorPlacementConfig>,

    /// Metrics and their sink.
    #[serde(default)]
    pub statistics: StatisticsConfig,

    /// Terminal rendering.
    #[serde(default)]
    pub render: RenderConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            board: BoardConfig::default(),
            simulation: SimulationBoundsConfig::default(),
            actors: default_actors(),
            statistics: StatisticsConfig::default(),
            render: RenderConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
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
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply environment overrides (`WARREN_SEED`).
    ///
    /// Runs before logging is initialized, so a rejected seed is handed
    /// back for the caller to report.
    #[must_use = "a rejected seed should be reported"]
    pub fn apply_env_overrides(&mut self) -> Option<String> {
        let raw = std::env::var(SEED_ENV_VAR).ok()?;
        (!self.world.apply_seed_override(&raw)).then_some(raw)
    }

    /// Reject configurations no run can honor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero-sized board, a file sink
    /// with zero capacity, or a render interval of zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.columns == 0 || self.board.rows == 0 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "board must be at least 1x1, got {}x{}",
                    self.board.columns, self.board.rows
                ),
            });
        }
        if let SinkConfig::File { capacity: 0, .. } = self.statistics.sink {
            return Err(ConfigError::Invalid {
                reason: "file sink capacity must be at least 1".to_owned(),
            });
        }
        if self.render.every == 0 {
            return Err(ConfigError::Invalid {
                reason: "render.every must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Real-time milliseconds between ticks. 0 runs flat out.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl WorldConfig {
    /// Replace the seed with `raw` if it parses as a `u64`. Returns `false`
    /// and keeps the configured seed otherwise.
    pub fn apply_seed_override(&mut self, raw: &str) -> bool {
        match raw.trim().parse::<u64>() {
            Ok(seed) => {
                self.seed = seed;
                true
            }
            Err(_) => false,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BoardConfig {
    /// Number of columns (x extent).
    #[serde(default = "default_columns")]
    pub columns: u32,

    /// Number of rows (y extent).
    #[serde(default = "default_rows")]
    pub rows: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            rows: default_rows(),
        }
    }
}

/// Simulation boundary configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Ticks to run. 0 runs nothing.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
        }
    }
}

/// One entry of the initial roster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActorPlacementConfig {
    /// Kind name, resolved through the actor registry.
    pub kind: String,
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
}

/// Which metrics to sample and where to send them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatisticsConfig {
    /// Metrics sampled every tick, in order.
    #[serde(default = "default_metrics")]
    pub metrics: Vec<Metric>,

    /// Output destination.
    #[serde(default)]
    pub sink: SinkConfig,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            metrics: default_metrics(),
            sink: SinkConfig::default(),
        }
    }
}

/// Statistics output destination.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkConfig {
    /// Print to stdout on flush.
    Console,
    /// Append newline-delimited JSON to a file.
    File {
        /// Output file.
        #[serde(default = "default_sink_path")]
        path: PathBuf,
        /// Records held before an automatic append.
        #[serde(default = "default_sink_capacity")]
        capacity: usize,
    },
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self::File {
            path: default_sink_path(),
            capacity: default_sink_capacity(),
        }
    }
}

/// Terminal rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenderConfig {
    /// Whether frames are drawn at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Draw a frame every N ticks.
    #[serde(default = "default_render_every")]
    pub every: u64,

    /// Glyph overrides keyed by kind name.
    #[serde(default)]
    pub glyphs: BTreeMap<String, char>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            every: default_render_every(),
            glyphs: BTreeMap::new(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
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
// Defaults
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    String::from("Meadow")
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_interval_ms() -> u64 {
    100
}

const fn default_columns() -> u32 {
    15
}

const fn default_rows() -> u32 {
    10
}

const fn default_max_ticks() -> u64 {
    100
}

fn default_actors() -> Vec<ActorPlacementConfig> {
    vec![ActorPlacementConfig {
        kind: String::from("rabbit"),
        x: 5,
        y: 5,
    }]
}

fn default_metrics() -> Vec<Metric> {
    vec![Metric::Centroid]
}

fn default_sink_path() -> PathBuf {
    PathBuf::from("statistics.jsonl")
}

const fn default_sink_capacity() -> usize {
    100
}

const fn default_render_every() -> u64 {
    1
}

fn default_log_level() -> String {
    String::from("info")
}

const fn default_true() -> bool {
    true
}
