//! Fleet Tactics - Scenario Tools

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use fleet_core::config::FleetAiConfig;
use fleet_core::math::Vec2;
use fleet_tools::batch::run_batch;
use fleet_tools::report::{assess_scenario, parse_point, plan_route, PlannerKind};
use fleet_tools::scenario::Scenario;
use fleet_tools::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "fleet-tools")]
#[command(about = "Tactical assessment tools for fleet scenarios")]
struct Cli {
    /// Log decisions as they are made
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess one scenario and print the report as JSON
    Assess {
        /// Scenario RON file
        scenario: PathBuf,
        /// Config RON file overriding the default doctrine
        #[arg(long)]
        config: Option<PathBuf>,
        /// Path planner
        #[arg(long, value_enum, default_value_t = PlannerKind::Greedy)]
        planner: PlannerKind,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Assess every scenario in a directory in parallel
    Batch {
        /// Directory of scenario RON files
        dir: PathBuf,
        /// Write results here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Config RON file overriding the default doctrine
        #[arg(long)]
        config: Option<PathBuf>,
        /// Path planner
        #[arg(long, value_enum, default_value_t = PlannerKind::Greedy)]
        planner: PlannerKind,
    },
    /// Plan a route from the scenario fleet to a point
    Path {
        /// Scenario RON file
        scenario: PathBuf,
        /// Destination as X,Y
        #[arg(long, value_parser = parse_point_arg, allow_hyphen_values = true)]
        to: Vec2,
        /// Config RON file overriding the default doctrine
        #[arg(long)]
        config: Option<PathBuf>,
        /// Path planner
        #[arg(long, value_enum, default_value_t = PlannerKind::Greedy)]
        planner: PlannerKind,
    },
}

fn parse_point_arg(text: &str) -> std::result::Result<Vec2, String> {
    parse_point(text).ok_or_else(|| format!("expected X,Y but got '{text}'"))
}

fn load_config(path: Option<&Path>) -> Result<FleetAiConfig> {
    match path {
        Some(path) => Ok(FleetAiConfig::load(path)?),
        None => Ok(FleetAiConfig::default()),
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Assess {
            scenario,
            config,
            planner,
            pretty,
        } => {
            let config = load_config(config.as_deref())?;
            let scenario = Scenario::load(&scenario)?;
            let report = assess_scenario(&scenario, &config, planner);
            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{json}");
        }
        Commands::Batch {
            dir,
            output,
            config,
            planner,
        } => {
            let config = load_config(config.as_deref())?;
            let results = run_batch(&dir, &config, planner)?;
            match output {
                Some(path) => {
                    results.save(&path)?;
                    tracing::info!("Results written to {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&results)?),
            }
        }
        Commands::Path {
            scenario,
            to,
            config,
            planner,
        } => {
            let config = load_config(config.as_deref())?;
            let scenario = Scenario::load(&scenario)?;
            let path = plan_route(&scenario, &config, planner, to);
            if !path.complete {
                tracing::warn!("Route stops short of the destination");
            }
            println!("{}", serde_json::to_string_pretty(&path)?);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG takes precedence over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if let Err(e) = run(cli.command) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
