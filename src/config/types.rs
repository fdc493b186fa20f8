//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and resolver configuration.

use std::net::IpAddr;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_PORT, DNS_RETRIES, DNS_RETRY_DELAY, DNS_RETRY_DELAY_SECS,
    DNS_TIMEOUT, DNS_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How diagnosis results are printed by the CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One colored line per finding
    Plain,
    /// The full report as pretty-printed JSON
    Json,
}

/// Resolver timeouts, retries and optional upstream nameservers.
///
/// The defaults keep every query bounded: a 5s timeout per attempt and up to
/// three retries spaced 5s apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Per-attempt query timeout
    pub timeout: Duration,
    /// Retries after the first failed attempt (transport failures only)
    pub retries: usize,
    /// Delay between retries
    pub retry_delay: Duration,
    /// Upstream nameservers; empty means the system configuration
    pub nameservers: Vec<IpAddr>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            timeout: DNS_TIMEOUT,
            retries: DNS_RETRIES,
            retry_delay: DNS_RETRY_DELAY,
            nameservers: Vec::new(),
        }
    }
}

/// Command-line interface of the `dns_check` binary.
#[derive(Debug, Parser)]
#[command(
    name = "dns_check",
    version,
    about = "Check DKIM and help-center custom domain DNS settings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Output format for findings
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain, global = true)]
    pub output: OutputFormat,

    /// DNS query timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS, global = true)]
    pub dns_timeout_secs: u64,

    /// Retries for DNS queries that fail with a transport error
    #[arg(long, default_value_t = DNS_RETRIES, global = true)]
    pub dns_retries: usize,

    /// Delay between DNS retries in seconds
    #[arg(long, default_value_t = DNS_RETRY_DELAY_SECS, global = true)]
    pub dns_retry_delay_secs: u64,

    /// Upstream nameserver to query instead of the system resolver (repeatable)
    #[arg(long = "nameserver", global = true)]
    pub nameservers: Vec<IpAddr>,

    /// Exit with status 2 when any error finding is produced
    #[arg(long, global = true)]
    pub fail_on_error: bool,
}

impl Cli {
    /// Resolver settings assembled from the global DNS options.
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            timeout: Duration::from_secs(self.dns_timeout_secs),
            retries: self.dns_retries,
            retry_delay: Duration::from_secs(self.dns_retry_delay_secs),
            nameservers: self.nameservers.clone(),
        }
    }
}

/// Subcommands of the CLI.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check the DKIM verification CNAME of a sending domain
    Dkim {
        /// Domain used to send email (e.g. mail.example.com)
        domain: String,
    },
    /// Check the CNAME of a help-center custom domain
    CustomDomain {
        /// Custom domain (e.g. help.example.com)
        domain: String,
        /// The custom domain is served over HTTPS/SSL
        #[arg(long)]
        ssl: bool,
    },
    /// Run both checks, mirroring the web form
    Check {
        /// Domain for DKIM verification
        #[arg(long)]
        dkim_domain: Option<String>,
        /// Help-center custom domain
        #[arg(long)]
        custom_domain: Option<String>,
        /// "yes" when the custom domain uses HTTPS/SSL
        #[arg(long)]
        custom_domain_ssl: Option<String>,
    },
    /// Print the raw A, MX, NS, CNAME and TXT answers for a name
    Lookup {
        /// Name to query
        name: String,
    },
    /// Serve the checks as a JSON HTTP API
    Serve {
        /// Address to bind
        #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}
