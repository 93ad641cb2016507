//! Server mode CLI logic
//!
//! Contains the core logic for running the HTTP portal.

use crate::{config::Settings, error::format_error, server::app, utils::version};
use anyhow::{Context, Result};
use tokio::signal;

/// Arguments for server mode
#[derive(Debug)]
pub struct ServerArgs {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub config: Option<String>,
    pub verbose: bool,
}

/// Run server mode with the given arguments
pub async fn run_server_mode(args: ServerArgs) -> Result<()> {
    // Configuration precedence:
    // 1. Command line arguments (highest priority)
    // 2. Environment variables (including .env)
    // 3. Configuration file (from --config, VODKIT_CONFIG or default location)
    // 4. Default values (lowest priority)
    //
    // Settings are loaded before logging so logging.level can apply.
    let settings = match prepare_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", format_error(&e));
            return Err(e).context("refusing to start with invalid configuration");
        }
    };

    super::init_logging(settings.logging.verbose, &settings.logging.level);

    tracing::info!("Starting VOD portal v{}", version::get_version());

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let app = app::create_app(settings)?;

    let addr = parse_and_bind_address(&host, port).await?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding to {}", addr))?;

    tracing::info!(
        "VOD portal v{} listening on {}",
        version::get_version(),
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("running HTTP server")?;

    tracing::info!("VOD portal stopped");
    Ok(())
}

/// Load settings, layer the command line flags on top and validate the
/// result, so flags are held to the same rules as file and env values
fn prepare_settings(args: &ServerArgs) -> crate::Result<Settings> {
    let mut settings = super::load_unvalidated_settings(args.config.as_deref())?;
    apply_overrides(&mut settings, args);
    settings.validate()?;
    Ok(settings)
}

fn apply_overrides(settings: &mut Settings, args: &ServerArgs) {
    if let Some(host) = &args.host {
        settings.server.host = host.clone();
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    // --verbose can only raise verbosity set by VERBOSE or the file
    settings.logging.verbose |= args.verbose;
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", err);
    }
}

/// Parse host string and attempt to bind to the address
///
/// `::` is tried first; when the host has no IPv6 stack the wildcard IPv4
/// address `0.0.0.0` is used instead.
pub async fn parse_and_bind_address(host: &str, port: u16) -> Result<std::net::SocketAddr> {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

    if let Ok(ip) = host.parse::<IpAddr>() {
        if ip == IpAddr::V6(Ipv6Addr::UNSPECIFIED) {
            let addr = SocketAddr::new(ip, port);
            return match tokio::net::TcpListener::bind(addr).await {
                Ok(_) => {
                    tracing::debug!("IPv6 wildcard {} is available", addr);
                    Ok(addr)
                }
                Err(e) => {
                    tracing::warn!(
                        "Could not listen on [::]:{} (Caused by {}), falling back to 0.0.0.0",
                        port,
                        e
                    );
                    Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port))
                }
            };
        }

        let addr = SocketAddr::new(ip, port);
        tracing::debug!("Parsed address: {}", addr);
        return Ok(addr);
    }

    anyhow::bail!(
        "Invalid host address: {}. Use an IP literal such as '::' or '0.0.0.0'",
        host
    );
}
