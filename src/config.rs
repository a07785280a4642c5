use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{ExperimentRequest, Strategy};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub experiment: ExperimentSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default)]
    pub strategy: Strategy,
    /// Let the responder side of a profile propose instead
    #[serde(default)]
    pub reverse_roles: bool,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            reverse_roles: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExperimentSettings {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_runs")]
    pub runs: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for ExperimentSettings {
    fn default() -> Self {
        Self {
            count: default_count(),
            runs: default_runs(),
            seed: default_seed(),
        }
    }
}

fn default_count() -> usize { 100 }
fn default_runs() -> usize { 100 }
fn default_seed() -> u64 { 42 }

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// "text" or "json"
    #[serde(default = "default_output_format")]
    pub format: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: default_output_format(),
        }
    }
}

fn default_output_format() -> String { "text".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

/// Formatter picked for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    /// tracing-subscriber's default formatter
    Full,
}

impl LogFormat {
    /// Unrecognised names fall back to `Full`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Full,
        }
    }
}

impl LoggingSettings {
    pub fn log_format(&self) -> LogFormat {
        LogFormat::from_name(&self.format)
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PAIRS__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Experiment request described by these settings
    pub fn experiment_request(&self) -> ExperimentRequest {
        ExperimentRequest {
            count: self.experiment.count,
            runs: self.experiment.runs,
            strategy: self.matching.strategy,
            seed: self.experiment.seed,
        }
    }
}

// e.g., PAIRS__EXPERIMENT__RUNS -> experiment.runs
fn environment() -> Environment {
    Environment::with_prefix("PAIRS")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_experiment() {
        let experiment = ExperimentSettings::default();
        assert_eq!(experiment.count, 100);
        assert_eq!(experiment.runs, 100);
        assert_eq!(experiment.seed, 42);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "compact");
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                "[matching]\nstrategy = \"naive\"\n[experiment]\nruns = 7\n",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.matching.strategy, Strategy::Naive);
        assert!(!settings.matching.reverse_roles);
        assert_eq!(settings.experiment.runs, 7);
        assert_eq!(settings.experiment.count, 100);
        assert_eq!(settings.output.format, "text");

        let request = settings.experiment_request();
        assert_eq!(request.strategy, Strategy::Naive);
        assert_eq!(request.runs, 7);
    }

    #[test]
    fn test_environment_uses_double_underscore_prefix() {
        let mut vars = config::Map::new();
        vars.insert("PAIRS__EXPERIMENT__RUNS".to_string(), "9".to_string());
        vars.insert("PAIRS__LOGGING__FORMAT".to_string(), "pretty".to_string());
        // Single underscore after the prefix is not picked up
        vars.insert("PAIRS_EXPERIMENT__COUNT".to_string(), "3".to_string());

        let settings: Settings = Config::builder()
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.experiment.runs, 9);
        assert_eq!(settings.experiment.count, 100);
        assert_eq!(settings.logging.log_format(), LogFormat::Pretty);
    }

    #[test]
    fn test_log_format_names() {
        assert_eq!(LogFormat::from_name("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::from_name("Compact"), LogFormat::Compact);
        assert_eq!(LogFormat::from_name("json"), LogFormat::Full);
        assert_eq!(LoggingSettings::default().log_format(), LogFormat::Compact);
    }
}
