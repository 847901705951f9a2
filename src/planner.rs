use crate::agent::{ActionSynthesizer, Command, Orientation};
use crate::config::{Config, SearchMode};
use crate::cost::CostModel;
use crate::error::PlanResult;
use crate::evaluator::{HazardTradeoffEvaluator, Outcome, ReturnLeg};
use crate::graph::GridGraph;
use crate::grid::{Cell, Grid};
use crate::heuristic::{Heuristic, HeuristicKind};
use tracing::{info, warn};

/// Everything the planner needs to know about one episode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    pub grid: Grid,
    pub start: Cell,
    pub orientation: Orientation,
    pub goal: Cell,
    pub exit: Cell,
    pub hazard: Option<Cell>,
}

/// The evaluated outcome and the commands to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub outcome: Outcome,
    pub commands: Vec<Command>,
}

/// Full pipeline: grid → graph → hazard trade-off → commands
pub struct Planner {
    heuristic: Option<Box<dyn Heuristic>>,
    return_leg: ReturnLeg,
    cost: CostModel,
}

impl Default for Planner {
    fn default() -> Self {
        Planner {
            heuristic: None,
            return_leg: ReturnLeg::Replan,
            cost: CostModel::default(),
        }
    }
}

impl Planner {
    pub fn new(heuristic: Option<Box<dyn Heuristic>>, return_leg: ReturnLeg, cost: CostModel) -> Self {
        Planner {
            heuristic,
            return_leg,
            cost,
        }
    }

    /// Build a planner from the `[planner]` and `[cost]` config sections
    pub fn from_config(config: &Config) -> Self {
        let heuristic = match config.planner.search {
            SearchMode::Bfs => None,
            SearchMode::Astar => Some(heuristic_for(&config.planner.heuristic, config.planner.aggressive_factor)),
        };
        Planner::new(
            heuristic,
            config.planner.return_leg,
            CostModel::new(config.cost.hazard_penalty),
        )
    }

    /// Plan one episode.
    ///
    /// An unreachable goal is not an error: the plan is just `[Terminate]`.
    pub fn plan(&self, request: &PlanRequest) -> PlanResult<Plan> {
        let graph = GridGraph::build(request.grid.clone());
        let mut evaluator = HazardTradeoffEvaluator::new(self.cost, request.orientation)
            .with_return_leg(self.return_leg);
        if let Some(h) = &self.heuristic {
            evaluator = evaluator.with_heuristic(&**h);
        }

        let outcome = evaluator.choose_best_path(
            &graph,
            request.start,
            request.goal,
            request.exit,
            request.hazard,
        )?;

        let commands = match &outcome {
            Outcome::Route { chosen, .. } => {
                let synthesizer = ActionSynthesizer::new(request.orientation, request.hazard, request.goal);
                synthesizer.synthesize(&chosen.path)?
            }
            Outcome::Unreachable(reason) => {
                info!(?reason, "goal unreachable, terminating immediately");
                vec![Command::Terminate]
            }
        };

        Ok(Plan { outcome, commands })
    }
}

fn heuristic_for(kind: &HeuristicKind, aggressive_factor: f64) -> Box<dyn Heuristic> {
    let heuristic = kind.build(aggressive_factor);
    if !heuristic.is_admissible() {
        warn!(?kind, aggressive_factor, "heuristic is not admissible, routes may be longer than optimal");
    }
    heuristic
}
