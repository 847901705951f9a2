use crate::agent::Orientation;
use crate::error::{WorldError, WorldResult};
use crate::grid::{Cell, Grid};
use crate::planner::PlanRequest;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Built-in world used when no file is given on the command line
pub const DEMO_WORLD: &str = include_str!("../worlds/kill_to_grab.json");

/// Something placed on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorldObject {
    Hunter {
        position: Cell,
        #[serde(default = "default_orientation")]
        orientation: Orientation,
    },
    Pit {
        position: Cell,
    },
    #[serde(alias = "wumpus")]
    Hazard {
        position: Cell,
        #[serde(default = "default_active")]
        active: bool,
    },
    #[serde(alias = "gold")]
    Goal {
        position: Cell,
    },
    Exit {
        position: Cell,
    },
}

fn default_orientation() -> Orientation {
    Orientation::North
}

fn default_active() -> bool {
    true
}

impl WorldObject {
    pub fn position(&self) -> Cell {
        match self {
            WorldObject::Hunter { position, .. }
            | WorldObject::Pit { position }
            | WorldObject::Hazard { position, .. }
            | WorldObject::Goal { position }
            | WorldObject::Exit { position } => *position,
        }
    }
}

/// World description: grid size, walls and placed objects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    pub size: (i32, i32),
    #[serde(default)]
    pub blocks: Vec<Cell>,
    #[serde(default)]
    pub objects: Vec<WorldObject>,
}

impl World {
    /// Parse a world from its JSON description
    pub fn from_json(json: &str) -> WorldResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> WorldResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> WorldResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn demo() -> WorldResult<Self> {
        Self::from_json(DEMO_WORLD)
    }

    pub fn pits(&self) -> Vec<Cell> {
        self.objects
            .iter()
            .filter_map(|object| match object {
                WorldObject::Pit { position } => Some(*position),
                _ => None,
            })
            .collect()
    }

    pub fn exits(&self) -> Vec<Cell> {
        self.objects
            .iter()
            .filter_map(|object| match object {
                WorldObject::Exit { position } => Some(*position),
                _ => None,
            })
            .collect()
    }

    /// Grid with both walls and pits blocked
    pub fn grid(&self) -> WorldResult<Grid> {
        let blocked = self.blocks.iter().copied().chain(self.pits());
        Ok(Grid::new(self.size.0, self.size.1, blocked)?)
    }

    /// Validate the object set and turn it into a planning request.
    ///
    /// Requires exactly one hunter, one goal and one exit, and at most one
    /// hazard. An inactive hazard is planned around as if absent.
    pub fn to_request(&self) -> WorldResult<PlanRequest> {
        let mut hunter = None;
        let mut goal = None;
        let mut exit = None;
        let mut hazard = None;

        for object in &self.objects {
            match object {
                WorldObject::Hunter { position, orientation } => {
                    set_once(&mut hunter, (*position, *orientation), "hunter")?
                }
                WorldObject::Pit { .. } => {}
                WorldObject::Hazard { position, active } => {
                    set_once(&mut hazard, (*position, *active), "hazard")?
                }
                WorldObject::Goal { position } => set_once(&mut goal, *position, "goal")?,
                WorldObject::Exit { position } => set_once(&mut exit, *position, "exit")?,
            }
        }

        let (start, orientation) = hunter.ok_or(WorldError::MissingObject { kind: "hunter" })?;
        Ok(PlanRequest {
            grid: self.grid()?,
            start,
            orientation,
            goal: goal.ok_or(WorldError::MissingObject { kind: "goal" })?,
            exit: exit.ok_or(WorldError::MissingObject { kind: "exit" })?,
            hazard: hazard.filter(|(_, active)| *active).map(|(cell, _)| cell),
        })
    }

    /// Human-readable world details
    pub fn summary(&self) -> String {
        let mut out = String::from("World details:\n");
        let hazards: Vec<Cell> = self
            .objects
            .iter()
            .filter_map(|object| match object {
                WorldObject::Hazard { position, .. } => Some(*position),
                _ => None,
            })
            .collect();
        let goals: Vec<Cell> = self
            .objects
            .iter()
            .filter_map(|object| match object {
                WorldObject::Goal { position } => Some(*position),
                _ => None,
            })
            .collect();

        let _ = writeln!(out, "  Size: ({}, {})", self.size.0, self.size.1);
        let _ = writeln!(out, "  Pits: {}", format_cells(&self.pits()));
        let _ = writeln!(out, "  Hazard: {}", format_cells(&hazards));
        let _ = writeln!(out, "  Goal: {}", format_cells(&goals));
        let _ = writeln!(out, "  Exits: {}", format_cells(&self.exits()));
        let _ = write!(out, "  Blocks: {}", format_cells(&self.blocks));
        out
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, kind: &'static str) -> WorldResult<()> {
    if slot.is_some() {
        return Err(WorldError::DuplicateObject { kind });
    }
    *slot = Some(value);
    Ok(())
}

fn format_cells(cells: &[Cell]) -> String {
    let items: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
    format!("[{}]", items.join(", "))
}
