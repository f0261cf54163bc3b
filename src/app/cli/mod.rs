//! Command-line interface.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::Level;

use crate::app::api::{self, ApplyOutcome, ApplySettings, MergeOutcome};
use crate::app::telemetry;
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "kubescribe")]
#[command(version)]
#[command(
    about = "Synthesize Kubernetes manifests for a service and merge them into existing YAML",
    long_about = None
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); defaults to RUST_LOG or warn
    #[arg(long, global = true)]
    log_level: Option<Level>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate or update the manifests of one service
    #[clap(visible_alias = "a")]
    Apply {
        /// Service payload JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        payload: String,
        /// Configuration file (default: kubescribe.toml in the project root)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Project root holding the manifests directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
        /// Environment type of the target cluster (overrides the configuration)
        #[arg(short, long)]
        env_type: Option<String>,
        /// Fail on unresolved fields instead of prompting
        #[arg(long)]
        no_interactive: bool,
    },
    /// Merge a YAML fragment into a manifest file
    #[clap(visible_alias = "m")]
    Merge {
        /// Manifest file to create or update
        target: PathBuf,
        /// Fragment YAML file, or `-` for stdin
        fragment: String,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    telemetry::init(cli.log_level);

    let result = match cli.command {
        Commands::Apply { payload, config, root, env_type, no_interactive } => {
            run_apply(&payload, config, &root, env_type, no_interactive)
        }
        Commands::Merge { target, fragment } => run_merge(&target, &fragment),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_apply(
    payload: &str,
    config: Option<PathBuf>,
    root: &Path,
    env_type: Option<String>,
    no_interactive: bool,
) -> Result<(), AppError> {
    let payload_from_stdin = payload == "-";
    let payload = read_input(payload)?;
    let interactive = !no_interactive && !payload_from_stdin && io::stdin().is_terminal();
    let settings = ApplySettings { config, env_type, interactive };

    match api::apply_at(root, &payload, &settings)? {
        ApplyOutcome::Skipped { service, env_type } => {
            println!("Skipped service {service}: not targeted at environment {env_type}");
        }
        outcome @ ApplyOutcome::Applied { .. } => {
            for manifest in outcome.manifests() {
                println!(
                    "{} {} {}",
                    outcome_marker(manifest.outcome),
                    manifest.kind,
                    manifest.path.display()
                );
            }
            println!("✅ Service {} is up to date", outcome.service());
        }
    }
    Ok(())
}

fn run_merge(target: &Path, fragment: &str) -> Result<(), AppError> {
    let fragment = read_input(fragment)?;
    let plan = api::merge_file(target, &fragment)?;
    println!("{} {}", outcome_marker(plan.outcome), plan.path.display());
    Ok(())
}

fn outcome_marker(outcome: MergeOutcome) -> String {
    match outcome {
        MergeOutcome::Unchanged => format!("   {}", outcome.label()),
        _ => format!("✅ {}", outcome.label()),
    }
}

fn read_input(source: &str) -> Result<String, AppError> {
    if source == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        Ok(fs::read_to_string(source)?)
    }
}
