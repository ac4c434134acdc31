use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub mod auth;
pub mod logging;

pub const ARG_PORT: &str = "port";
pub const ARG_NEXT: &str = "next";
pub const CMD_CAPABILITY: &str = "capability";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let git_hash = crate::GIT_COMMIT_HASH;
    let long_version: &'static str =
        Box::leak(format!("{} - {}", env!("CARGO_PKG_VERSION"), git_hash).into_boxed_str());

    let command = Command::new("latchkey")
        .about("Single-password session bootstrap")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long(ARG_PORT)
                .help("Port to listen on")
                .default_value("8080")
                .env("LATCHKEY_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .subcommand(
            Command::new(CMD_CAPABILITY)
                .about("Mint a short-lived capability link and print it")
                .arg(
                    Arg::new(ARG_NEXT)
                        .long(ARG_NEXT)
                        .help("Path to land on after the exchange, e.g. /chat/42"),
                ),
        );

    let command = auth::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "latchkey");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Single-password session bootstrap".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_check_port() {
        temp_env::with_vars([("LATCHKEY_PORT", None::<&str>)], || {
            let matches = new().get_matches_from(vec!["latchkey"]);
            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8080));

            let matches = new().get_matches_from(vec!["latchkey", "-p", "9090"]);
            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(9090));
        });
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("LATCHKEY_PORT", Some("443")),
                ("LATCHKEY_PASSWORD", Some("hunter2")),
                ("LATCHKEY_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["latchkey"]);
                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(443));
                assert_eq!(
                    matches.get_one::<String>(auth::ARG_PASSWORD).cloned(),
                    Some("hunter2".to_string())
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, level) in levels.iter().enumerate() {
            temp_env::with_vars([("LATCHKEY_LOG_LEVEL", Some(*level))], || {
                let matches = new().get_matches_from(vec!["latchkey"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for count in 1..=4_usize {
            temp_env::with_vars([("LATCHKEY_LOG_LEVEL", None::<&str>)], || {
                let flag = format!("-{}", "v".repeat(count));
                let matches = new().get_matches_from(vec!["latchkey".to_string(), flag]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(count).ok()
                );
            });
        }
    }

    #[test]
    fn test_capability_subcommand() {
        temp_env::with_vars([("LATCHKEY_PASSWORD", None::<&str>)], || {
            let matches = new().get_matches_from(vec![
                "latchkey",
                "capability",
                "--next",
                "/chat/42",
                "--password",
                "hunter2",
            ]);
            let sub = matches.subcommand_matches(CMD_CAPABILITY);
            assert!(sub.is_some());
            if let Some(sub) = sub {
                assert_eq!(
                    sub.get_one::<String>(ARG_NEXT).cloned(),
                    Some("/chat/42".to_string())
                );
                assert_eq!(
                    sub.get_one::<String>(auth::ARG_PASSWORD).cloned(),
                    Some("hunter2".to_string())
                );
            }
        });
    }
}
