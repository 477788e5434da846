mod cli;
mod config;
mod health;
mod http;
mod logging;

#[cfg(test)]
mod http_tests;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use explorer_core::LookupService;
use github_backend::GitHubClient;
use sqlite_store::SqliteRepositoryStore;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.merge_with_cli(&cli);
    config.validate()?;

    logging::init(&config.log)?;

    let lookup = build_lookup(&config)?;

    match &cli.command {
        Commands::Serve { .. } => serve(&config, lookup),
        Commands::Lookup { owner, name } => {
            let repository = lookup.get_repository_details(owner, name)?;
            let json = serde_json::to_string_pretty(&repository)?;
            println!("{}", json);
            Ok(())
        }
    }
}

/// Wire the SQLite store and GitHub client into the lookup service
fn build_lookup(config: &Config) -> Result<LookupService> {
    let store = SqliteRepositoryStore::open_location(&config.database)
        .with_context(|| format!("failed to open database at {}", config.database))?;
    let client = GitHubClient::with_base_url(&config.github.api_url);

    Ok(LookupService::new(Arc::new(store), Arc::new(client)))
}

// ---------------------------------------------------------------------------
// HTTP server (axum)
// ---------------------------------------------------------------------------

fn serve(config: &Config, lookup: LookupService) -> Result<()> {
    let listen_addr = config.listen_addr()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async move {
        let app = http::create_router(Arc::new(http::AppState::new(lookup)));

        let listener = tokio::net::TcpListener::bind(listen_addr)
            .await
            .with_context(|| format!("failed to bind HTTP listener on {listen_addr}"))?;

        tracing::info!(%listen_addr, "HTTP server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        tracing::info!("HTTP server stopped");
        Ok::<(), anyhow::Error>(())
    })
}

// ---------------------------------------------------------------------------
// Graceful shutdown
// ---------------------------------------------------------------------------

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
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
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
