//! Map validated CLI matches to the action to run.

use crate::cli::{
    actions::{Action, capability, server},
    commands::{self, auth},
    globals::GlobalArgs,
};
use anyhow::Result;
use clap::ArgMatches;

fn globals(options: auth::Options) -> GlobalArgs {
    let mut globals = GlobalArgs::new(options.password);
    if let Some(secret) = options.session_secret {
        globals.set_session_secret(secret);
    }
    globals
}

/// Build the [`Action`] selected on the command line.
///
/// # Errors
/// Returns an error if the auth arguments are invalid.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    if let Some(sub) = matches.subcommand_matches(commands::CMD_CAPABILITY) {
        let options = auth::Options::parse(sub)?;
        return Ok(Action::Capability(capability::Args {
            public_url: options.public_url.clone(),
            next: sub.get_one::<String>(commands::ARG_NEXT).cloned(),
            globals: globals(options),
        }));
    }

    let port = matches
        .get_one::<u16>(commands::ARG_PORT)
        .copied()
        .unwrap_or(8080);
    let options = auth::Options::parse(matches)?;

    Ok(Action::Server(server::Args {
        port,
        public_url: options.public_url.clone(),
        login_path: options.login_path.clone(),
        globals: globals(options),
    }))
}
