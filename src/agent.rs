use crate::error::{PlanError, PlanResult};
use crate::grid::Cell;
use crate::pathfinding::Path;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Facing direction of the agent. North is `+y`, east is `+x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[serde(alias = "N")]
    North,
    #[serde(alias = "E")]
    East,
    #[serde(alias = "S")]
    South,
    #[serde(alias = "W")]
    West,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    /// Position in clockwise order starting at north
    fn index(self) -> i32 {
        match self {
            Orientation::North => 0,
            Orientation::East => 1,
            Orientation::South => 2,
            Orientation::West => 3,
        }
    }

    pub fn turn_right(self) -> Self {
        Self::ALL[((self.index() + 1) % 4) as usize]
    }

    pub fn turn_left(self) -> Self {
        Self::ALL[((self.index() + 3) % 4) as usize]
    }

    /// Unit step `(dx, dy)` when moving forward
    pub fn delta(self) -> (i32, i32) {
        match self {
            Orientation::North => (0, 1),
            Orientation::East => (1, 0),
            Orientation::South => (0, -1),
            Orientation::West => (-1, 0),
        }
    }

    /// Direction of travel between two 4-adjacent cells
    pub fn between(from: &Cell, to: &Cell) -> Option<Self> {
        match (to.x - from.x, to.y - from.y) {
            (1, 0) => Some(Orientation::East),
            (-1, 0) => Some(Orientation::West),
            (0, 1) => Some(Orientation::North),
            (0, -1) => Some(Orientation::South),
            _ => None,
        }
    }

    /// Turn commands that rotate `self` onto `target`.
    ///
    /// The agent only turns in 90 degree steps, so an about-face is always
    /// two right turns.
    pub fn turns_to(self, target: Orientation) -> &'static [Command] {
        match (target.index() - self.index()).rem_euclid(4) {
            0 => &[],
            1 => &[Command::TurnRight],
            2 => &[Command::TurnRight, Command::TurnRight],
            _ => &[Command::TurnLeft],
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::North => "N",
            Orientation::East => "E",
            Orientation::South => "S",
            Orientation::West => "W",
        };
        write!(f, "{}", name)
    }
}

/// One atomic instruction for the executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Forward,
    TurnLeft,
    TurnRight,
    /// Neutralize the hazard in the cell ahead
    InteractNeutralize,
    /// Pick up the goal item in the current cell
    InteractCollect,
    Terminate,
}

impl Command {
    pub fn is_turn(self) -> bool {
        matches!(self, Command::TurnLeft | Command::TurnRight)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Forward => "Forward",
            Command::TurnLeft => "TurnLeft",
            Command::TurnRight => "TurnRight",
            Command::InteractNeutralize => "Neutralize",
            Command::InteractCollect => "Collect",
            Command::Terminate => "Terminate",
        };
        write!(f, "{}", name)
    }
}

/// Mutable state of one synthesis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentState {
    pub position: Cell,
    pub orientation: Orientation,
    pub has_grabbed: bool,
    pub has_neutralized: bool,
    /// Number of commands emitted so far
    pub emitted: usize,
}

impl AgentState {
    pub fn new(position: Cell, orientation: Orientation) -> Self {
        AgentState {
            position,
            orientation,
            has_grabbed: false,
            has_neutralized: false,
            emitted: 0,
        }
    }
}

/// Turns a path into orientation-aware commands.
#[derive(Debug, Clone, Copy)]
pub struct ActionSynthesizer {
    pub initial_orientation: Orientation,
    pub hazard: Option<Cell>,
    pub goal: Cell,
}

impl ActionSynthesizer {
    pub fn new(initial_orientation: Orientation, hazard: Option<Cell>, goal: Cell) -> Self {
        ActionSynthesizer {
            initial_orientation,
            hazard,
            goal,
        }
    }

    /// Lazily yield the commands for `path`, one at a time
    pub fn commands<'a>(&self, path: &'a Path) -> CommandStream<'a> {
        CommandStream {
            cells: path.cells(),
            step: 0,
            state: AgentState::new(path.source(), self.initial_orientation),
            hazard: self.hazard,
            goal: self.goal,
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Collect the full command sequence for `path`
    pub fn synthesize(&self, path: &Path) -> PlanResult<Vec<Command>> {
        self.commands(path).collect()
    }
}

/// Synthesize commands for `path` from the given start facing
pub fn synthesize(
    path: &Path,
    initial_orientation: Orientation,
    hazard: Option<Cell>,
    goal: Cell,
) -> PlanResult<Vec<Command>> {
    ActionSynthesizer::new(initial_orientation, hazard, goal).synthesize(path)
}

/// Finite iterator of commands for one path.
///
/// Every successful run ends with `Terminate`. After an `InvalidStep` error
/// the stream is exhausted and cannot be resumed.
pub struct CommandStream<'a> {
    cells: &'a [Cell],
    step: usize,
    state: AgentState,
    hazard: Option<Cell>,
    goal: Cell,
    pending: VecDeque<Command>,
    done: bool,
}

impl CommandStream<'_> {
    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// Queue the commands that carry the agent into `next`
    fn advance_to(&mut self, next: Cell) -> PlanResult<()> {
        let current = self.state.position;
        let heading = Orientation::between(&current, &next)
            .ok_or(PlanError::InvalidStep { from: current, to: next })?;

        self.pending
            .extend(self.state.orientation.turns_to(heading).iter().copied());
        self.state.orientation = heading;

        if self.hazard == Some(next) && !self.state.has_neutralized {
            self.pending.push_back(Command::InteractNeutralize);
            self.state.has_neutralized = true;
        }

        self.pending.push_back(Command::Forward);
        self.state.position = next;

        if next == self.goal && !self.state.has_grabbed {
            self.pending.push_back(Command::InteractCollect);
            self.state.has_grabbed = true;
        }
        Ok(())
    }
}

impl Iterator for CommandStream<'_> {
    type Item = PlanResult<Command>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(command) = self.pending.pop_front() {
                self.state.emitted += 1;
                return Some(Ok(command));
            }
            if self.done {
                return None;
            }

            match self.cells.get(self.step + 1) {
                Some(&next) => {
                    self.step += 1;
                    if let Err(e) = self.advance_to(next) {
                        self.done = true;
                        self.pending.clear();
                        return Some(Err(e));
                    }
                }
                None => {
                    self.pending.push_back(Command::Terminate);
                    self.done = true;
                }
            }
        }
    }
}

impl std::iter::FusedIterator for CommandStream<'_> {}

/// Agent position and facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pose {
    pub cell: Cell,
    pub orientation: Orientation,
}

/// Pose after each command, replayed from the start pose
pub fn replay_poses(start: Cell, orientation: Orientation, commands: &[Command]) -> Vec<Pose> {
    let mut pose = Pose {
        cell: start,
        orientation,
    };
    commands
        .iter()
        .map(|command| {
            match command {
                Command::Forward => {
                    let (dx, dy) = pose.orientation.delta();
                    pose.cell = Cell::new(pose.cell.x + dx, pose.cell.y + dy);
                }
                Command::TurnLeft => pose.orientation = pose.orientation.turn_left(),
                Command::TurnRight => pose.orientation = pose.orientation.turn_right(),
                Command::InteractNeutralize | Command::InteractCollect | Command::Terminate => {}
            }
            pose
        })
        .collect()
}

/// Cells visited when executing `commands`, starting with `start`
pub fn replay(start: Cell, orientation: Orientation, commands: &[Command]) -> Vec<Cell> {
    let mut cells = vec![start];
    for (command, pose) in commands.iter().zip(replay_poses(start, orientation, commands)) {
        if *command == Command::Forward {
            cells.push(pose.cell);
        }
    }
    cells
}
