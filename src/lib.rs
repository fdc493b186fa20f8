//! dns_check library: DKIM and custom-domain DNS diagnosis
//!
//! This library checks that a domain's DNS points the right records at the
//! provider: the DKIM verification CNAME used for outbound email, and the
//! CNAME of a help-center custom domain. Lookup results are interpreted into
//! ordered [`Finding`]s (success, error, warning, informational) that a
//! presentation layer renders.
//!
//! # Example
//!
//! ```no_run
//! use dns_check::initialization::init_dns_client;
//! use dns_check::{diagnose_dkim, ResolverSettings};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = init_dns_client(&ResolverSettings::default())?;
//! for finding in diagnose_dkim(&client, "mail.example.com").await {
//!     println!("[{}] {}", finding.severity, finding.message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod config;
mod diagnosis;
pub mod dns;
pub mod domain;
pub mod error_handling;
pub mod initialization;
pub mod output;
pub mod server;
pub mod topology;

// Re-export public API
pub use config::{LogFormat, LogLevel, OutputFormat, ResolverSettings};
pub use diagnosis::{
    classify_txt, compare_cname, count_kind, count_severity, cross_check, diagnose_custom_domain,
    diagnose_dkim, dkim_record_name, double_domain_record_name, parse_ssl_flag, run_check,
    CheckReport, CheckRequest, Finding, FindingKind, Severity,
};
