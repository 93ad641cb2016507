//! Unified CLI for the VOD portal
//!
//! Runs the HTTP portal or resolves the featured VOD once from the terminal.
//!
//! # Usage
//!
//! ## Server Mode
//! ```bash
//! vodkit-portal server --port 8080 --host 0.0.0.0
//! ```
//!
//! ## Resolve Mode
//! ```bash
//! vodkit-portal --verbose
//! ```
//!
//! ## Help and Version
//! ```bash
//! vodkit-portal --version
//! vodkit-portal --help
//! vodkit-portal server --help
//! ```

use clap::{Parser, Subcommand};

use vodkit_portal::cli::{
    resolve::{ResolveArgs, run_resolve_mode},
    server::{ServerArgs, run_server_mode},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "vodkit-portal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // Resolve mode options (when no subcommand is provided)
    /// Configuration file path
    #[arg(long, value_name = "CONFIG")]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server mode
    Server {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Configuration file path
        #[arg(long)]
        config: Option<String>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Server {
            port,
            host,
            config,
            verbose,
        }) => {
            let args = ServerArgs {
                port,
                host,
                config,
                verbose,
            };
            run_server_mode(args).await
        }
        None => {
            let args = ResolveArgs {
                config: cli.config,
                verbose: cli.verbose,
            };
            run_resolve_mode(args).await
        }
    }
}
