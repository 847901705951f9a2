use crate::agent::ActionSynthesizer;
use crate::error::PlanResult;
use crate::pathfinding::Path;

/// Penalty for stepping through the hazard. One neutralize action (already
/// counted as a command) plus this penalty gives a hazard crossing cost of 10.
pub const DEFAULT_HAZARD_PENALTY: u32 = 9;

/// Scores candidate routes by the number of commands needed to follow them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostModel {
    pub hazard_penalty: u32,
}

impl Default for CostModel {
    fn default() -> Self {
        CostModel {
            hazard_penalty: DEFAULT_HAZARD_PENALTY,
        }
    }
}

impl CostModel {
    pub fn new(hazard_penalty: u32) -> Self {
        CostModel { hazard_penalty }
    }

    /// Number of commands the synthesizer emits for `path`, turns and `Terminate` included
    pub fn action_count(&self, path: &Path, synthesizer: &ActionSynthesizer) -> PlanResult<u32> {
        synthesizer
            .commands(path)
            .try_fold(0u32, |count, command| command.map(|_| count + 1))
    }

    /// `action_count` plus the hazard penalty when `traverses_hazard`
    pub fn score(
        &self,
        path: &Path,
        traverses_hazard: bool,
        synthesizer: &ActionSynthesizer,
    ) -> PlanResult<u32> {
        let actions = self.action_count(path, synthesizer)?;
        let penalty = if traverses_hazard { self.hazard_penalty } else { 0 };
        Ok(actions.saturating_add(penalty))
    }
}
