pub mod agent;
pub mod command_log;
pub mod config;
pub mod cost;
pub mod error;
pub mod evaluator;
pub mod graph;
pub mod grid;
pub mod heuristic;
pub mod pathfinding;
pub mod planner;
pub mod world;

pub use agent::{synthesize, ActionSynthesizer, Command, Orientation};
pub use config::Config;
pub use error::{ConfigError, PlanError, WorldError};
pub use evaluator::{HazardTradeoffEvaluator, Outcome};
pub use graph::GridGraph;
pub use grid::{Cell, Grid};
pub use pathfinding::{find_path, Path};
pub use planner::{Plan, PlanRequest, Planner};
pub use world::World;
