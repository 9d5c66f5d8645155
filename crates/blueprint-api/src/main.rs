//! Blueprint runner CLI and REST API entry point.
//!
//! Binary name: `bprint`
//!
//! Parses CLI arguments, loads configuration, then dispatches to the
//! appropriate command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;

use blueprint_infra::config::{
    apply_env_overrides, load_config, load_config_file, process_env, resolve_api_key,
    resolve_data_dir,
};
use blueprint_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};
use blueprint_types::config::ServiceConfig;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config or tracing
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "bprint", &mut std::io::stdout());
        return Ok(());
    }

    let default_filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn,blueprint_api=info",
        1 => "info,blueprint_core=debug,blueprint_api=debug",
        _ => "trace",
    };
    init_tracing(&TracingOptions {
        default_filter: default_filter.to_string(),
        json: cli.log_json,
        otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();

    match result {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => Err(e),
    }
}

/// Execute the selected command. `Ok(false)` means the command ran but the
/// workflow it executed failed.
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = load_service_config(&cli).await?;
    let api_key = resolve_api_key(process_env);

    match cli.command {
        Commands::Serve { port, host } => {
            let mut config = config;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            serve(config, api_key, cli.quiet).await?;
        }

        Commands::Run { file, input } => {
            let state = AppState::new(config, api_key)?;
            return cli::run::run_blueprint(&state, &file, input.as_deref(), cli.json, cli.quiet).await;
        }

        Commands::Inspect { file, module } => {
            cli::inspect::inspect_blueprint(&file, module, cli.json)?;
        }

        Commands::Explain { file, api_key: key_arg } => {
            let state = AppState::new(config, api_key)?;
            cli::explain::explain(&state, &file, key_arg, cli.json).await?;
        }

        Commands::Completions { .. } => {}
    }

    Ok(true)
}

async fn load_service_config(cli: &Cli) -> anyhow::Result<ServiceConfig> {
    let config = match &cli.config {
        Some(path) => load_config_file(path).await?,
        None => {
            let data_dir = resolve_data_dir(process_env)?;
            load_config(&data_dir).await
        }
    };
    Ok(apply_env_overrides(config, process_env))
}

async fn serve(
    config: ServiceConfig,
    api_key: Option<secrecy::SecretString>,
    quiet: bool,
) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    if api_key.is_none() {
        tracing::warn!("No GEMINI_API_KEY or API_KEY set; /blueprints/explain needs an x-api-key header");
    }

    if !quiet {
        println!(
            "  {} Blueprint executor listening on {}",
            console::style("⚡").bold(),
            console::style(format!("http://{addr}")).cyan()
        );
        println!(
            "  {} {}",
            console::style("Webhook base:").dim(),
            console::style(&config.base_url).dim()
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }

    let state = AppState::new(config, api_key)?;
    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
