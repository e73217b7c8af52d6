//! Pennant CLI: simulation, benchmarking, and debugging.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pennant")]
#[command(version, about = "Pennant: mass-spring banner simulation in the wind")]
struct Cli {
    /// Forward per-step telemetry events to the log.
    #[arg(long, global = true)]
    trace_events: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a config file.
    Simulate {
        /// Path to simulation config (TOML). Defaults are used when omitted.
        #[arg(short, long)]
        config: Option<String>,

        /// Number of frames to run.
        #[arg(short, long, default_value_t = 300)]
        frames: u32,

        /// Write a binary snapshot of the final state here.
        #[arg(short, long)]
        snapshot: Option<String>,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (hanging_banner, corner_pinned, becalmed, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Inspect a state snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Validate a config (.toml) or exported surface mesh (.json).
    Validate {
        /// Path to config or mesh file.
        path: String,
    },

    /// Run a simulation and export the final surface mesh as JSON.
    Export {
        /// Path to simulation config (TOML).
        #[arg(short, long)]
        config: Option<String>,

        /// Number of frames to run before exporting.
        #[arg(short, long, default_value_t = 300)]
        frames: u32,

        /// Output JSON file path.
        #[arg(short, long, default_value = "banner.json")]
        output: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            config,
            frames,
            snapshot,
        } => commands::simulate(
            config.as_deref(),
            frames,
            snapshot.as_deref(),
            cli.trace_events,
        ),
        Commands::Benchmark { scenario, output } => {
            commands::benchmark(&scenario, output.as_deref())
        }
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Export {
            config,
            frames,
            output,
        } => commands::export(config.as_deref(), frames, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
