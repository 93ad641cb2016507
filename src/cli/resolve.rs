//! Resolve mode CLI logic
//!
//! Runs one token-list-select cycle and prints the featured VOD as JSON.

use anyhow::Result;
use tracing::{debug, info};

use crate::{Error, VodPortal, error::format_error, vod::SelectedVod};

/// Exit code when the listing holds no playable VOD
pub const EXIT_DEGRADED: i32 = 2;

/// Arguments for resolve mode
#[derive(Debug)]
pub struct ResolveArgs {
    pub config: Option<String>,
    pub verbose: bool,
}

/// Outcome of a single resolution, mapped to stdout and an exit code
#[derive(Debug)]
pub enum ResolveOutcome {
    Found(SelectedVod),
    Degraded(Error),
}

impl ResolveOutcome {
    /// Line printed on stdout
    pub fn stdout_line(&self) -> Result<String> {
        match self {
            Self::Found(vod) => Ok(serde_json::to_string(vod)?),
            Self::Degraded(_) => Ok("{}".to_string()),
        }
    }

    /// Process exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Found(_) => 0,
            Self::Degraded(_) => EXIT_DEGRADED,
        }
    }
}

/// Resolve the featured VOD through the portal
pub async fn resolve(portal: &VodPortal) -> crate::Result<ResolveOutcome> {
    match portal.featured_vod().await {
        Ok(vod) => Ok(ResolveOutcome::Found(vod)),
        Err(e) if e.is_degraded() => Ok(ResolveOutcome::Degraded(e)),
        Err(e) => Err(e),
    }
}

/// Run resolve mode with the given arguments
pub async fn run_resolve_mode(args: ResolveArgs) -> Result<()> {
    let settings = match super::load_settings(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", format_error(&e));
            std::process::exit(1);
        }
    };

    // Quiet by default; stdout carries only the JSON result
    let verbose = args.verbose || settings.logging.verbose;
    let level = if verbose || std::env::var("RUST_LOG").is_ok() {
        settings.logging.level.as_str()
    } else {
        "error"
    };
    super::init_logging(verbose, level);

    debug!(
        "Resolving featured VOD for subdomain {}",
        settings.provider.subdomain
    );

    let portal = VodPortal::from_settings(&settings)?;
    let outcome = match resolve(&portal).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!(
                "Failed while resolving the featured VOD. Error: {}",
                format_error(&e)
            );
            println!("{{}}");
            std::process::exit(1);
        }
    };

    println!("{}", outcome.stdout_line()?);

    match &outcome {
        ResolveOutcome::Found(vod) => {
            info!("Resolved featured VOD '{}'", vod.title);
            Ok(())
        }
        ResolveOutcome::Degraded(e) => {
            eprintln!("No playable VOD: {}", e);
            std::process::exit(outcome.exit_code());
        }
    }
}
