//! DNS resolution and record querying.
//!
//! This module provides async DNS operations:
//! - The [`DnsClient`] trait used by the diagnosers
//! - [`HickoryDnsClient`], backed by `hickory-resolver` with bounded retries
//! - [`StaticDnsClient`], a scripted client for tests and offline use
//! - Typed answers ([`RecordKind`], [`RecordData`], [`ResolvedRecordSet`])
//! - [`HostRecords`], a request-scoped cache of A/MX/NS answers

mod cache;
mod client;
mod records;
mod scripted;

// Re-export public API
pub use cache::HostRecords;
pub use client::{DnsClient, HickoryDnsClient};
pub use records::{RecordData, RecordKind, ResolvedRecordSet};
pub use scripted::StaticDnsClient;
