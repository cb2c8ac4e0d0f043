//! Command-line argument dispatch and server initialization.
//!
//! This module maps validated CLI arguments to the appropriate action, such
//! as starting the API server with its full configuration state.

use crate::cli::actions::{server::Args, Action};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;

    let secret = matches
        .get_one::<String>("secret")
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --secret")?;

    let frontend_url = matches
        .get_one::<String>("frontend-url")
        .cloned()
        .unwrap_or_else(|| "http://localhost:5173".to_string());

    Ok(Action::Server(Args {
        port,
        dsn,
        secret,
        frontend_url,
    }))
}
