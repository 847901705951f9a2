use crate::agent::Orientation;
use crate::cost::DEFAULT_HAZARD_PENALTY;
use crate::error::ConfigError;
use crate::evaluator::ReturnLeg;
use crate::heuristic::HeuristicKind;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub cost: CostConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Search algorithm used for both legs of the round trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Bfs,
    Astar,
}

#[derive(Debug, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_search")]
    pub search: SearchMode,
    #[serde(default = "default_heuristic")]
    pub heuristic: HeuristicKind,
    #[serde(default = "default_aggressive_factor")]
    pub aggressive_factor: f64,
    #[serde(default)]
    pub return_leg: ReturnLeg,
}

#[derive(Debug, Deserialize)]
pub struct CostConfig {
    #[serde(default = "default_hazard_penalty")]
    pub hazard_penalty: u32,
}

#[derive(Debug, Deserialize)]
pub struct AgentConfig {
    /// Overrides the hunter's facing from the world file when set
    #[serde(default)]
    pub initial_orientation: Option<Orientation>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub enable_command_log: bool,
    #[serde(default = "default_command_log_path")]
    pub command_log_path: String,
}

// Default values
fn default_search() -> SearchMode { SearchMode::Bfs }
fn default_heuristic() -> HeuristicKind { HeuristicKind::Manhattan }
fn default_aggressive_factor() -> f64 { 1.5 }
fn default_hazard_penalty() -> u32 { DEFAULT_HAZARD_PENALTY }
fn default_filter() -> String { "info".to_string() }
fn default_command_log_path() -> String { "command_log.json".to_string() }

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            search: default_search(),
            heuristic: default_heuristic(),
            aggressive_factor: default_aggressive_factor(),
            return_leg: ReturnLeg::default(),
        }
    }
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            hazard_penalty: default_hazard_penalty(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            initial_orientation: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            enable_command_log: false,
            command_log_path: default_command_log_path(),
        }
    }
}

impl Config {
    /// Load configuration from `config.toml`, or use defaults if it is missing or broken.
    ///
    /// Runs before the tracing subscriber exists, so a broken file is reported on stderr.
    pub fn load() -> Self {
        let (config, problem) = Self::load_or_default("config.toml");
        if let Some(e) = problem {
            eprintln!("Warning: Failed to load config.toml: {}", e);
            eprintln!("Using default configuration");
        }
        config
    }

    /// Load `path`, falling back to defaults.
    ///
    /// A missing file is not a problem. Any other failure is handed back
    /// alongside the defaults so the caller can report it.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> (Self, Option<ConfigError>) {
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => (Config::default(), None),
            Err(e) => (Config::default(), Some(e)),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.planner.aggressive_factor.is_finite() && self.planner.aggressive_factor > 0.0) {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "aggressive_factor must be a positive number, got {}",
                    self.planner.aggressive_factor
                ),
            });
        }
        Ok(())
    }
}
