use crate::agent::{replay_poses, Command, Orientation, Pose};
use crate::grid::Cell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One executed command with the pose it leaves the agent in
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedCommand {
    pub index: usize,
    pub command: Command,
    pub pose: Pose,
}

/// Record of a command sequence replayed from a start pose
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLog {
    entries: Vec<LoggedCommand>,
}

impl CommandLog {
    /// Replay `commands` from the start pose and record every step
    pub fn record(start: Cell, orientation: Orientation, commands: &[Command]) -> Self {
        let entries = commands
            .iter()
            .zip(replay_poses(start, orientation, commands))
            .enumerate()
            .map(|(index, (command, pose))| LoggedCommand {
                index,
                command: *command,
                pose,
            })
            .collect();
        CommandLog { entries }
    }

    pub fn entries(&self) -> &[LoggedCommand] {
        &self.entries
    }

    /// Save log to JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a previously saved log
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let entries: Vec<LoggedCommand> = serde_json::from_str(&json)?;
        Ok(CommandLog { entries })
    }

    /// Print log to console
    pub fn print(&self) {
        println!("\n=== Command Log ({} commands) ===", self.entries.len());
        for logged in &self.entries {
            println!(
                "#{:3} {:<10} -> at {} facing {}",
                logged.index + 1,
                logged.command.to_string(),
                logged.pose.cell,
                logged.pose.orientation
            );
        }
        println!("=== End of Log ===\n");
    }

    /// Count of each command kind
    pub fn counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for logged in &self.entries {
            *counts.entry(logged.command.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut moves = 0;
        let mut turns = 0;
        let mut interactions = 0;
        for logged in &self.entries {
            match logged.command {
                Command::Forward => moves += 1,
                Command::TurnLeft | Command::TurnRight => turns += 1,
                Command::InteractNeutralize | Command::InteractCollect => interactions += 1,
                Command::Terminate => {}
            }
        }

        let final_pose = self
            .entries
            .last()
            .map(|logged| format!("{} facing {}", logged.pose.cell, logged.pose.orientation))
            .unwrap_or_else(|| "n/a".to_string());

        format!(
            "Total Commands: {}\n\
             Movement: {} forward, {} turns\n\
             Interactions: {}\n\
             Final Pose: {}",
            self.entries.len(),
            moves,
            turns,
            interactions,
            final_pose
        )
    }
}
