use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;
use url::Url;

pub const ARG_PASSWORD: &str = "password";
pub const ARG_SESSION_SECRET: &str = "session-secret";
pub const ARG_PUBLIC_URL: &str = "public-url";
pub const ARG_LOGIN_PATH: &str = "login-path";

#[derive(Debug)]
pub struct Options {
    pub password: SecretString,
    pub session_secret: Option<SecretString>,
    pub public_url: Url,
    pub login_path: String,
}

impl Options {
    /// Parse the shared auth arguments from matches.
    ///
    /// A missing password is not an error: the service starts and refuses every
    /// login until one is configured.
    ///
    /// # Errors
    /// Returns an error if the public URL is not an absolute URL.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let get_non_empty = |id: &str| {
            matches
                .get_one::<String>(id)
                .cloned()
                .filter(|v| !v.trim().is_empty())
        };

        let public_url = get_non_empty(ARG_PUBLIC_URL)
            .unwrap_or_else(|| "http://localhost:8080".to_string());
        let public_url = Url::parse(&public_url)
            .map_err(|e| anyhow::anyhow!("invalid --{ARG_PUBLIC_URL} {public_url}: {e}"))?;

        Ok(Self {
            password: SecretString::from(get_non_empty(ARG_PASSWORD).unwrap_or_default()),
            session_secret: get_non_empty(ARG_SESSION_SECRET).map(SecretString::from),
            public_url,
            login_path: get_non_empty(ARG_LOGIN_PATH).unwrap_or_else(|| "/login".to_string()),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Shared password accepted by the login endpoint")
                .env("LATCHKEY_PASSWORD")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_SECRET)
                .long(ARG_SESSION_SECRET)
                .help("Key used to sign credentials, defaults to the password")
                .env("LATCHKEY_SESSION_SECRET")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_PUBLIC_URL)
                .long(ARG_PUBLIC_URL)
                .help("Externally reachable base URL, used to build exchange links")
                .env("LATCHKEY_PUBLIC_URL")
                .default_value("http://localhost:8080")
                .global(true),
        )
        .arg(
            Arg::new(ARG_LOGIN_PATH)
                .long(ARG_LOGIN_PATH)
                .help("Where failed exchanges are redirected")
                .env("LATCHKEY_LOGIN_PATH")
                .default_value("/login")
                .global(true),
        )
}
