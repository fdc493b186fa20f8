//! Error type definitions.
//!
//! This module defines the errors raised by the DNS client, the domain
//! normalizer, the topology inspector and application initialization.

use log::SetLoggerError;
use thiserror::Error;

use crate::dns::RecordKind;

/// NOTIMP response code (RFC 1035)
const RCODE_NOT_IMPLEMENTED: u16 = 4;
/// REFUSED response code (RFC 1035)
const RCODE_REFUSED: u16 = 5;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// A DNS query that could not be answered.
///
/// A name that does not exist, or exists without records of the queried type,
/// is not a failure: it resolves to an empty record set. This type only covers
/// queries that never got a usable answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionFailure {
    /// Every attempt timed out.
    #[error("{kind} lookup for {name} timed out")]
    Timeout { name: String, kind: RecordKind },

    /// The server answered with an error code such as SERVFAIL or REFUSED.
    #[error("{kind} lookup for {name} failed with response code {code}")]
    ServerError {
        name: String,
        kind: RecordKind,
        code: u16,
    },

    /// Any other transport or protocol failure.
    #[error("{kind} lookup for {name} failed: {message}")]
    Transport {
        name: String,
        kind: RecordKind,
        message: String,
    },
}

impl ResolutionFailure {
    /// The name whose lookup failed.
    pub fn name(&self) -> &str {
        match self {
            ResolutionFailure::Timeout { name, .. }
            | ResolutionFailure::ServerError { name, .. }
            | ResolutionFailure::Transport { name, .. } => name,
        }
    }

    /// Returns true for failures worth retrying.
    ///
    /// REFUSED and NOTIMP are deliberate answers from the server; everything
    /// else (timeouts, SERVFAIL, socket errors) may succeed on a later attempt.
    pub fn is_retriable(&self) -> bool {
        match self {
            ResolutionFailure::ServerError { code, .. } => {
                !matches!(*code, RCODE_NOT_IMPLEMENTED | RCODE_REFUSED)
            }
            ResolutionFailure::Timeout { .. } | ResolutionFailure::Transport { .. } => true,
        }
    }
}

/// Input that cannot be reduced to a registrable root domain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidDomainError {
    /// The input is not a syntactically valid host name.
    #[error("'{input}' is not a valid domain: {reason}")]
    Malformed { input: String, reason: String },

    /// IP literals have no registrable domain.
    #[error("IP addresses do not have registrable domains: {input}")]
    IpAddress { input: String },

    /// The name is a public suffix (e.g. `co.uk`) or has no known suffix.
    #[error("'{input}' has no registrable domain under public suffix rules")]
    NoRegistrableDomain { input: String },
}

/// Failure while deriving DNS providers from a domain's NS records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InspectionError {
    /// The NS query failed.
    #[error(transparent)]
    Resolution(#[from] ResolutionFailure),

    /// A nameserver host could not be normalized to a root domain.
    #[error(transparent)]
    InvalidDomain(#[from] InvalidDomainError),
}
