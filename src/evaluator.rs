use crate::agent::{ActionSynthesizer, Orientation};
use crate::cost::CostModel;
use crate::error::{PlanError, PlanResult};
use crate::graph::GridGraph;
use crate::grid::Cell;
use crate::heuristic::Heuristic;
use crate::pathfinding::{find_path, Path};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// How the goal→exit leg of the round trip is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnLeg {
    /// Plan goal→exit as its own search
    #[default]
    Replan,
    /// Walk the outbound leg backwards. Only used when the exit is the start cell.
    Retrace,
}

/// Which graph a candidate was planned on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    /// Full graph, the hazard cell may be crossed
    WithHazard,
    /// Hazard cell removed from the graph
    WithoutHazard,
}

/// A scored round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: Path,
    pub variant: Variant,
    pub traverses_hazard: bool,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreachableReason {
    /// The goal sits on a permanently blocked cell
    GoalBlocked,
    /// No route start→goal→exit exists even through the hazard
    NoRoute,
}

/// Result of the hazard trade-off
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Route {
        chosen: Candidate,
        /// The losing candidate, if a hazard-free route existed
        rejected: Option<Candidate>,
    },
    Unreachable(UnreachableReason),
}

impl Outcome {
    pub fn chosen(&self) -> Option<&Candidate> {
        match self {
            Outcome::Route { chosen, .. } => Some(chosen),
            Outcome::Unreachable(_) => None,
        }
    }
}

/// Compares the round trip through the hazard with the one around it
pub struct HazardTradeoffEvaluator<'h> {
    pub heuristic: Option<&'h dyn Heuristic>,
    pub return_leg: ReturnLeg,
    pub cost: CostModel,
    pub initial_orientation: Orientation,
}

impl<'h> HazardTradeoffEvaluator<'h> {
    pub fn new(cost: CostModel, initial_orientation: Orientation) -> Self {
        HazardTradeoffEvaluator {
            heuristic: None,
            return_leg: ReturnLeg::Replan,
            cost,
            initial_orientation,
        }
    }

    pub fn with_heuristic(mut self, heuristic: &'h dyn Heuristic) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    pub fn with_return_leg(mut self, return_leg: ReturnLeg) -> Self {
        self.return_leg = return_leg;
        self
    }

    /// Pick the cheaper of the hazard and hazard-free round trips.
    ///
    /// Missing paths never escape as errors: a missing hazard-free route
    /// leaves the hazard route as the only candidate, and a missing hazard
    /// route gives `Outcome::Unreachable`. On equal scores the hazard-free
    /// route wins. Only a malformed path (`InvalidStep`) is returned as `Err`.
    pub fn choose_best_path(
        &self,
        graph: &GridGraph,
        start: Cell,
        goal: Cell,
        exit: Cell,
        hazard: Option<Cell>,
    ) -> PlanResult<Outcome> {
        if graph.grid().is_blocked(&goal) {
            info!(%goal, "goal is on a blocked cell, aborting");
            return Ok(Outcome::Unreachable(UnreachableReason::GoalBlocked));
        }

        let synthesizer = ActionSynthesizer::new(self.initial_orientation, hazard, goal);

        let with_hazard = match self.round_trip(graph, start, goal, exit) {
            Ok(path) => path,
            Err(PlanError::NoPath { from, to }) => {
                info!(%from, %to, "no route even through the hazard, aborting");
                return Ok(Outcome::Unreachable(UnreachableReason::NoRoute));
            }
            Err(e) => return Err(e),
        };
        let traverses_hazard = hazard.map_or(false, |h| with_hazard.enters(&h));
        let with_candidate = Candidate {
            score: self.cost.score(&with_hazard, traverses_hazard, &synthesizer)?,
            path: with_hazard,
            variant: Variant::WithHazard,
            traverses_hazard,
        };
        debug!(score = with_candidate.score, traverses_hazard, "scored route on full graph");

        let hazard_node = match hazard {
            Some(cell) if graph.contains(&cell) => cell,
            _ => return Ok(Outcome::Route { chosen: with_candidate, rejected: None }),
        };

        let reduced = graph.without_node(hazard_node);
        let without_hazard = match self.round_trip(&reduced, start, goal, exit) {
            Ok(path) => path,
            Err(PlanError::NoPath { from, to }) => {
                warn!(%from, %to, hazard = %hazard_node, "hazard-free route unavailable, keeping hazard route");
                return Ok(Outcome::Route { chosen: with_candidate, rejected: None });
            }
            Err(e) => return Err(e),
        };
        let without_candidate = Candidate {
            score: self.cost.score(&without_hazard, false, &synthesizer)?,
            path: without_hazard,
            variant: Variant::WithoutHazard,
            traverses_hazard: false,
        };
        debug!(score = without_candidate.score, "scored hazard-free route");

        let (chosen, rejected) = if without_candidate.score <= with_candidate.score {
            (without_candidate, with_candidate)
        } else {
            (with_candidate, without_candidate)
        };
        info!(
            variant = ?chosen.variant,
            score = chosen.score,
            rejected_score = rejected.score,
            "selected route"
        );
        Ok(Outcome::Route { chosen, rejected: Some(rejected) })
    }

    /// start→goal joined with goal→exit on one graph
    fn round_trip(&self, graph: &GridGraph, start: Cell, goal: Cell, exit: Cell) -> PlanResult<Path> {
        let outbound = find_path(graph, start, goal, self.heuristic)?;
        let inbound = match self.return_leg {
            ReturnLeg::Retrace if exit == start => outbound.reversed(),
            ReturnLeg::Retrace => {
                debug!(%start, %exit, "exit differs from start, replanning return leg");
                find_path(graph, goal, exit, self.heuristic)?
            }
            ReturnLeg::Replan => find_path(graph, goal, exit, self.heuristic)?,
        };
        Ok(outbound.join(&inbound))
    }
}
