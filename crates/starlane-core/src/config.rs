//! Configuration loading and typed config structures for Starlane.
//!
//! The canonical configuration lives in `starlane-config.yaml` next to the
//! engine binary. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads the file. Every field
//! has a default, so an empty or partial file is valid.

use std::path::Path;

use serde::Deserialize;
use starlane_world::ConnectivityMode;

/// Environment variable overriding [`WorldConfig::seed`].
pub const SEED_ENV: &str = "STARLANE_SEED";

/// Environment variable overriding [`WorldConfig::location_count`].
pub const LOCATION_COUNT_ENV: &str = "STARLANE_LOCATION_COUNT";

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

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// How the world is built.
    #[serde(default)]
    pub world: WorldConfig,

    /// Calendar anchor, time scale, and tick size.
    #[serde(default)]
    pub time: TimeConfig,

    /// Clock driver cadence.
    #[serde(default)]
    pub driver: DriverConfig,

    /// Settings for the command host.
    #[serde(default)]
    pub host: HostConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `STARLANE_SEED` and `STARLANE_LOCATION_COUNT` override the world
    /// section when set to valid integers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.world.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Where the world comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldSource {
    /// Procedurally generated from `location_count` and `seed`.
    #[default]
    Generated,
    /// The four-location development fixture.
    Dev,
}

/// World construction settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Generated or fixture world.
    #[serde(default)]
    pub source: WorldSource,

    /// Number of locations to generate.
    #[serde(default = "default_location_count")]
    pub location_count: u32,

    /// Generator seed.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Connectivity pass strategy.
    #[serde(default)]
    pub connectivity: ConnectivityMode,
}

impl WorldConfig {
    /// Apply `STARLANE_*` overrides using `lookup` to read variables.
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(SEED_ENV) {
            match raw.trim().parse() {
                Ok(seed) => self.seed = seed,
                Err(e) => tracing::warn!(var = SEED_ENV, value = %raw, error = %e, "ignoring override"),
            }
        }
        if let Some(raw) = lookup(LOCATION_COUNT_ENV) {
            match raw.trim().parse() {
                Ok(count) => self.location_count = count,
                Err(e) => {
                    tracing::warn!(var = LOCATION_COUNT_ENV, value = %raw, error = %e, "ignoring override");
                }
            }
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            source: WorldSource::default(),
            location_count: default_location_count(),
            seed: default_seed(),
            connectivity: ConnectivityMode::default(),
        }
    }
}

/// Game time configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeConfig {
    /// Calendar year at game second zero.
    #[serde(default = "default_start_year")]
    pub start_year: i32,

    /// Calendar month (1-12) at game second zero.
    #[serde(default = "default_start_month")]
    pub start_month: u32,

    /// Day of month at game second zero.
    #[serde(default = "default_start_day")]
    pub start_day: u32,

    /// Game seconds that pass per real second.
    #[serde(default = "default_game_seconds_per_real_second")]
    pub game_seconds_per_real_second: f64,

    /// Game seconds covered by one simulation tick.
    #[serde(default = "default_tick_step_game_seconds")]
    pub tick_step_game_seconds: i64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            start_month: default_start_month(),
            start_day: default_start_day(),
            game_seconds_per_real_second: default_game_seconds_per_real_second(),
            tick_step_game_seconds: default_tick_step_game_seconds(),
        }
    }
}

/// Clock driver settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DriverConfig {
    /// Real milliseconds between clock updates.
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval_ms(),
        }
    }
}

/// How the host prints command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// The human-readable text only.
    #[default]
    Text,
    /// One JSON object per result.
    Json,
}

/// Command host settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostConfig {
    /// Caller id attached to commands read from stdin.
    #[serde(default)]
    pub caller_id: i32,

    /// Result output format.
    #[serde(default)]
    pub output: OutputFormat,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is unset.
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
// Default value functions
// ---------------------------------------------------------------------------

const fn default_location_count() -> u32 {
    200
}

const fn default_seed() -> u64 {
    42
}

const fn default_start_year() -> i32 {
    2350
}

const fn default_start_month() -> u32 {
    1
}

const fn default_start_day() -> u32 {
    1
}

const fn default_game_seconds_per_real_second() -> f64 {
    36.0
}

const fn default_tick_step_game_seconds() -> i64 {
    600
}

const fn default_update_interval_ms() -> u64 {
    50
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = SimulationConfig::parse("").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.world.location_count, 200);
        assert_eq!(config.world.seed, 42);
        assert_eq!(config.time.tick_step_game_seconds, 600);
        assert_eq!(config.driver.update_interval_ms, 50);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let config = SimulationConfig::parse(include_str!("../../../starlane-config.yaml")).unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "
world:
  source: dev
  connectivity: random_pairs
time:
  start_year: 2400
  game_seconds_per_real_second: 60.0
host:
  output: json
  caller_id: 7
";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.world.source, WorldSource::Dev);
        assert_eq!(config.world.connectivity, ConnectivityMode::RandomPairs);
        assert_eq!(config.world.seed, 42);
        assert_eq!(config.time.start_year, 2400);
        assert_eq!(config.time.start_month, 1);
        assert!((config.time.game_seconds_per_real_second - 60.0).abs() < f64::EPSILON);
        assert_eq!(config.host.output, OutputFormat::Json);
        assert_eq!(config.host.caller_id, 7);
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = SimulationConfig::parse("world: [unterminated");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = SimulationConfig::from_file(Path::new("/nonexistent/starlane-config.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn overrides_replace_world_values() {
        let vars: BTreeMap<&str, &str> =
            BTreeMap::from([(SEED_ENV, "9001"), (LOCATION_COUNT_ENV, " 64 ")]);
        let mut world = WorldConfig::default();
        world.apply_overrides(|key| vars.get(key).map(|v| (*v).to_owned()));
        assert_eq!(world.seed, 9001);
        assert_eq!(world.location_count, 64);
    }

    #[test]
    fn unparsable_overrides_are_ignored() {
        let mut world = WorldConfig::default();
        world.apply_overrides(|key| (key == SEED_ENV).then(|| "not-a-number".to_owned()));
        assert_eq!(world.seed, 42);
    }
}
