//! Folio - unified CLI
//!
//! Runs the HTTP API, a terminal game or the particle generator.

#![warn(missing_docs)]

mod cli;
mod play;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, ServeArgs};
use folio_content::particle_field;
use folio_server::{AppState, ServerConfig, router};
use folio_tictactoe::{GameMode, Session};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,folio_server=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => run_server(args).await,
        Command::Play { mode } => run_play(mode),
        Command::Particles { count } => run_particles(count),
    }
}

/// Run the HTTP API server
#[instrument]
async fn run_server(args: ServeArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    }
    .with_env()?;
    let config = args.apply(config);

    let state = AppState::from_config(&config)?;
    let app = router(state);

    let addr = format!("{}:{}", config.host(), config.port());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, github_username = %config.github_username(), "Server ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

/// Play in the terminal
fn run_play(mode: GameMode) -> Result<()> {
    let mut session = Session::new(mode);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    play::play_loop(&mut session, stdin.lock(), &mut stdout)?;
    Ok(())
}

/// Print a particle field
fn run_particles(count: usize) -> Result<()> {
    let field = particle_field(count);
    println!("{}", serde_json::to_string_pretty(&field)?);
    Ok(())
}
