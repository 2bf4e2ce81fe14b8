//! promptkeep CLI and HTTP entry point.
//!
//! Binary name: `pkeep`
//!
//! Parses CLI arguments, wires the stores, then dispatches to the matching
//! command handler or starts the HTTP server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,promptkeep=debug",
        _ => "trace",
    };

    // `serve --otel` installs the OpenTelemetry-bridged subscriber instead.
    let otel = matches!(cli.command, Commands::Serve { otel: true, .. });
    if otel {
        promptkeep_observe::tracing_setup::init_tracing(filter, true)
            .map_err(|e| anyhow::anyhow!(e))?;
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_target(false)
            .init();
    }

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "pkeep", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Serve { host, port, .. } => {
            let addr = cli::bind_address(&state.config.bind, host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} promptkeep listening on {}",
                    console::style(">").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(%addr, data_dir = %state.data_dir.display(), "server started");

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Get { key } => {
            cli::store::get(&state, &key, cli.json).await?;
        }

        Commands::Set { key, value } => {
            cli::store::set(&state, &key, &value, cli.json).await?;
        }

        Commands::History { action } => {
            cli::history::handle_history_command(action, &state, cli.json).await?;
        }

        Commands::Favorites { action } => {
            cli::history::handle_favorites_command(action, &state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    if otel {
        promptkeep_observe::tracing_setup::shutdown_tracing();
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
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

    tracing::info!("shutdown signal received");
}
