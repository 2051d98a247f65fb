//! Server configuration.
//!
//! Settings come from three layers, highest precedence first: command-line
//! flags (each with an environment variable fallback), an optional TOML file,
//! and built-in defaults.
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//! cors = false
//!
//! [logging]
//! format = "json"
//! filter = "issues=debug,info"
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Command-line interface of the `issues-server` binary.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "issues-server", version, about = "REST API for project-scoped issues")]
pub struct Cli {
    /// Address to listen on (default: 0.0.0.0:3000)
    #[arg(long, env = "ISSUES_BIND")]
    pub bind: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long, env = "ISSUES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, env = "ISSUES_LOG_FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,

    /// Disable the permissive CORS layer
    #[arg(long)]
    pub no_cors: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Root structure of the TOML configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Listener and middleware settings (optional).
    pub server: Option<ServerSection>,
    /// Log output settings (optional).
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// Socket address to bind, e.g. "127.0.0.1:3000".
    pub bind: Option<String>,
    /// Enable permissive CORS (default: true).
    pub cors: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// "compact" or "json" (default: compact).
    pub format: Option<LogFormat>,
    /// Default `EnvFilter` directives when `RUST_LOG` is unset (default: info).
    pub filter: Option<String>,
}

impl FileConfig {
    /// Load and parse a configuration file.
    ///
    /// Unlike an absent `--config`, a path that was given but cannot be read
    /// is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Fully resolved settings the server runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub cors: bool,
    pub log_format: LogFormat,
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            cors: true,
            log_format: LogFormat::Compact,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServerConfig {
    /// Resolve settings from the CLI, loading the config file it names.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, &file)
    }

    /// Combine CLI values over file values over defaults.
    pub fn merge(cli: &Cli, file: &FileConfig) -> Result<Self> {
        let server = file.server.clone().unwrap_or_default();
        let logging = file.logging.clone().unwrap_or_default();

        let bind = cli
            .bind
            .as_deref()
            .or(server.bind.as_deref())
            .unwrap_or(DEFAULT_BIND);
        let bind: SocketAddr = bind
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", bind))?;

        Ok(Self {
            bind,
            cors: !cli.no_cors && server.cors.unwrap_or(true),
            log_format: cli.log_format.or(logging.format).unwrap_or_default(),
            log_filter: logging
                .filter
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}
