//! Error handling.
//!
//! Errors are split by the layer that raises them:
//! - **Initialization**: logger or resolver setup failed (binary only)
//! - **Resolution**: a DNS query got no usable answer
//! - **Invalid domain**: input cannot be normalized to a root domain
//! - **Inspection**: provider discovery failed for either of the above reasons
//!
//! None of these escape a diagnoser: each is turned into a finding.

mod types;

// Re-export public API
pub use types::{InitializationError, InspectionError, InvalidDomainError, ResolutionFailure};
