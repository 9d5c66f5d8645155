//! CLI command definitions for the `bprint` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod explain;
pub mod inspect;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Run and inspect workflow-automation blueprints.
#[derive(Parser)]
#[command(name = "bprint", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a config.toml (default: $BLUEPRINT_HOME/config.toml or ~/.blueprint/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit structured JSON logs.
    #[arg(long, global = true, env = "BLUEPRINT_LOG_JSON")]
    pub log_json: bool,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, env = "BLUEPRINT_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (overrides config and PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config and HOST).
        #[arg(long)]
        host: Option<String>,
    },

    /// Execute a blueprint file and print per-module results.
    Run {
        /// Path to the blueprint JSON file.
        file: PathBuf,

        /// Initial input payload as a JSON string.
        #[arg(short, long)]
        input: Option<String>,
    },

    /// List a blueprint's modules in display order, or show one module.
    Inspect {
        /// Path to the blueprint JSON file.
        file: PathBuf,

        /// Show details for the module with this id.
        #[arg(short, long)]
        module: Option<i64>,
    },

    /// Ask the generative API for a plain-language explanation.
    Explain {
        /// Path to the blueprint JSON file.
        file: PathBuf,

        /// API key (overrides GEMINI_API_KEY / API_KEY).
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
