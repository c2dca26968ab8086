//! Command-line interface for the `folio` binary.

use clap::{Args, Parser, Subcommand};
use folio_server::ServerConfig;
use folio_tictactoe::GameMode;
use std::path::PathBuf;

/// Folio - portfolio backend and terminal tic-tac-toe
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Portfolio backend with a GitHub proxy and an unbeatable tic-tac-toe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server
    Serve(ServeArgs),

    /// Play tic-tac-toe in the terminal
    Play {
        /// human-vs-human or human-vs-computer
        #[arg(short, long, default_value = "human-vs-human")]
        mode: GameMode,
    },

    /// Print a particle field as JSON
    Particles {
        /// Number of particles
        #[arg(short, long, default_value = "50")]
        count: usize,
    },
}

/// Flags of `folio serve`. Each one, when given, beats the file and environment.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Project catalog TOML file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// GitHub REST API base URL
    #[arg(long)]
    pub github_api_base: Option<String>,
}

impl ServeArgs {
    /// Applies the given flags on top of `config`.
    pub fn apply(&self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = &self.host {
            config = config.with_host(host.clone());
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(catalog) = &self.catalog {
            config = config.with_catalog_path(catalog.clone());
        }
        if let Some(base) = &self.github_api_base {
            config = config.with_github_api_base(base.clone());
        }
        config
    }
}
