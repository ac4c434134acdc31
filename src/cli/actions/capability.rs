use crate::{api::handlers::auth::exchange_url, auth, cli::globals::GlobalArgs};
use anyhow::{Context, Result};
use tracing::info;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub public_url: Url,
    pub next: Option<String>,
    pub globals: GlobalArgs,
}

/// Mint a capability token from the configured secret and return its exchange link.
///
/// # Errors
/// Returns an error if no signing secret is configured or the link cannot be built.
pub fn link(args: &Args) -> Result<Url> {
    let context = args.globals.auth_context();
    let token = auth::issue_capability(&context)
        .context("cannot mint a capability token: LATCHKEY_PASSWORD is not set")?;
    exchange_url(&args.public_url, &token, args.next.as_deref())
}

/// Print the exchange link on stdout.
///
/// # Errors
/// Returns an error if the link cannot be minted.
pub fn execute(args: &Args) -> Result<()> {
    let url = link(args)?;
    info!("capability link minted, valid for two minutes");
    println!("{url}");
    Ok(())
}
