//! Application configuration and constants.
//!
//! This module provides:
//! - Provider constants (DKIM selector, expected CNAME target, known CDNs)
//! - DNS timeouts and retry defaults
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Cli, Command, LogFormat, LogLevel, OutputFormat, ResolverSettings};
