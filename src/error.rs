use crate::grid::Cell;
use thiserror::Error;

/// Errors raised by the planning core (graph, search, synthesis)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Invalid grid: {reason}")]
    InvalidGrid { reason: String },

    #[error("No path from {from} to {to}")]
    NoPath { from: Cell, to: Cell },

    #[error("Invalid step from {from} to {to}: cells are not 4-adjacent")]
    InvalidStep { from: Cell, to: Cell },
}

/// Errors raised while loading a world description
#[derive(Error, Debug)]
pub enum WorldError {
    #[error("Failed to read world file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse world description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("World has no {kind}")]
    MissingObject { kind: &'static str },

    #[error("World has more than one {kind}")]
    DuplicateObject { kind: &'static str },

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Errors raised while loading `config.toml`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },
}

pub type PlanResult<T> = Result<T, PlanError>;
pub type WorldResult<T> = Result<T, WorldError>;
