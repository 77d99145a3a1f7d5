//! Server configuration
//!
//! Flags with environment fallbacks:
//!
//! - `--addr` / `NAVMENU_ADDR`: listen address (default `127.0.0.1:3001`)
//! - `--body-limit` / `NAVMENU_BODY_LIMIT`: max request body in bytes (default 50 MiB)
//! - `--log-format` / `NAVMENU_LOG_FORMAT`: `pretty` or `json`
//!
//! Log filtering follows `RUST_LOG`.

use std::net::SocketAddr;
use std::str::FromStr;

use clap::{value_parser, Arg, ArgMatches, Command};

/// Default listen address
pub const DEFAULT_ADDR: &str = "127.0.0.1:3001";

/// Default request body limit (50 MiB)
pub const DEFAULT_BODY_LIMIT: u64 = 50 * 1024 * 1024;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable
    #[default]
    Pretty,
    /// JSON lines
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: '{other}'")),
        }
    }
}

/// Runtime configuration of the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address
    pub addr: SocketAddr,
    /// Max request body in bytes
    pub body_limit: u64,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            body_limit: DEFAULT_BODY_LIMIT,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ServerConfig {
    /// Command-line definition
    #[must_use]
    pub fn command() -> Command {
        Command::new("navmenu-server")
            .version(env!("CARGO_PKG_VERSION"))
            .about("In-memory store for navigation menu documents")
            .arg(
                Arg::new("addr")
                    .long("addr")
                    .env("NAVMENU_ADDR")
                    .default_value(DEFAULT_ADDR)
                    .value_parser(value_parser!(SocketAddr))
                    .help("Address to listen on"),
            )
            .arg(
                Arg::new("body-limit")
                    .long("body-limit")
                    .env("NAVMENU_BODY_LIMIT")
                    .default_value("52428800")
                    .value_parser(value_parser!(u64))
                    .help("Maximum request body size in bytes"),
            )
            .arg(
                Arg::new("log-format")
                    .long("log-format")
                    .env("NAVMENU_LOG_FORMAT")
                    .default_value("pretty")
                    .value_parser(["pretty", "json"])
                    .help("Log output format"),
            )
    }

    /// Configuration from parsed arguments
    ///
    /// Missing values fall back to [`ServerConfig::default`].
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let defaults = Self::default();
        Self {
            addr: matches
                .get_one::<SocketAddr>("addr")
                .copied()
                .unwrap_or(defaults.addr),
            body_limit: matches
                .get_one::<u64>("body-limit")
                .copied()
                .unwrap_or(defaults.body_limit),
            log_format: matches
                .get_one::<String>("log-format")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.log_format),
        }
    }

    /// Set the body limit
    #[must_use]
    pub fn with_body_limit(mut self, body_limit: u64) -> Self {
        self.body_limit = body_limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_command_defaults() {
        let matches = ServerConfig::command()
            .try_get_matches_from(["navmenu-server"])
            .unwrap();
        let config = ServerConfig::from_matches(&matches);
        assert_eq!(config.body_limit, DEFAULT_BODY_LIMIT);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn flags_override_defaults() {
        let matches = ServerConfig::command()
            .try_get_matches_from([
                "navmenu-server",
                "--addr",
                "0.0.0.0:8080",
                "--body-limit",
                "1024",
                "--log-format",
                "json",
            ])
            .unwrap();
        let config = ServerConfig::from_matches(&matches);
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.body_limit, 1024);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(ServerConfig::command()
            .try_get_matches_from(["navmenu-server", "--log-format", "xml"])
            .is_err());
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
