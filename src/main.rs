use clap::Parser;
use gridhunt::command_log::CommandLog;
use gridhunt::evaluator::Outcome;
use gridhunt::{Config, Planner, World};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Plan a hazard-aware round trip and print the agent's commands
#[derive(Parser, Debug)]
#[command(name = "gridhunt")]
#[command(about = "Plan a route to the goal and back, trading off the hazard against a detour")]
struct Args {
    /// World description files (JSON). Runs the built-in demo world when empty.
    worlds: Vec<PathBuf>,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Write the replayed command log to this JSON file
    #[arg(long)]
    command_log: Option<PathBuf>,

    /// Print every command with the pose it leaves the agent in
    #[arg(long)]
    print_log: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    info!(
        search = ?config.planner.search,
        hazard_penalty = config.cost.hazard_penalty,
        return_leg = ?config.planner.return_leg,
        "configuration ready"
    );
    let planner = Planner::from_config(&config);

    let worlds: Vec<(String, World)> = if args.worlds.is_empty() {
        info!("No world given, running the built-in demo world");
        vec![("demo".to_string(), World::demo()?)]
    } else {
        let mut loaded = Vec::new();
        for path in &args.worlds {
            loaded.push((path.display().to_string(), World::load_from_file(path)?));
        }
        loaded
    };

    let log_path = args.command_log.clone().or_else(|| {
        config
            .logging
            .enable_command_log
            .then(|| PathBuf::from(&config.logging.command_log_path))
    });

    for (index, (name, world)) in worlds.iter().enumerate() {
        println!("World {}:", name);
        println!("{}", world.summary());

        let mut request = world.to_request()?;
        if let Some(orientation) = config.agent.initial_orientation {
            request.orientation = orientation;
        }

        let plan = match planner.plan(&request) {
            Ok(plan) => plan,
            Err(e) => {
                error!(world = %name, "planning failed: {}", e);
                return Err(e.into());
            }
        };

        match &plan.outcome {
            Outcome::Route { chosen, rejected } => {
                println!("Route ({:?}, score {}): {}", chosen.variant, chosen.score, chosen.path);
                if let Some(other) = rejected {
                    println!("Rejected ({:?}, score {})", other.variant, other.score);
                }
            }
            Outcome::Unreachable(reason) => println!("Goal unreachable: {:?}", reason),
        }

        let commands: Vec<String> = plan.commands.iter().map(|c| c.to_string()).collect();
        println!("Commands: {}\n", commands.join(", "));

        let log = CommandLog::record(request.start, request.orientation, &plan.commands);
        if args.print_log {
            log.print();
        }
        println!("{}\n", log.summary());

        if let Some(path) = &log_path {
            let target = numbered_path(path, index, worlds.len());
            log.save_to_file(&target)?;
            info!(path = %target.display(), "saved command log");
        }
    }

    Ok(())
}

/// `log.json` for a single world, `log-1.json`, `log-2.json`, ... otherwise
fn numbered_path(path: &Path, index: usize, total: usize) -> PathBuf {
    if total <= 1 {
        return path.to_path_buf();
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("command_log");
    let file_name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}-{}.{}", stem, index + 1, ext),
        None => format!("{}-{}", stem, index + 1),
    };
    path.with_file_name(file_name)
}
