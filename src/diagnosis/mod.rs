//! DNS verification and diagnosis.
//!
//! Two independent diagnosers turn DNS answers into ordered [`Finding`]s:
//! - [`diagnose_dkim`] checks the DKIM verification CNAME of a sending domain
//! - [`diagnose_custom_domain`] checks the CNAME of a help-center custom domain
//!
//! [`run_check`] runs both for one request, concurrently.

mod custom_domain;
mod dkim;
mod finding;
mod preamble;

use serde::{Deserialize, Serialize};

use crate::dns::DnsClient;

// Re-export public API
pub use custom_domain::{compare_cname, diagnose_custom_domain};
pub use dkim::{classify_txt, diagnose_dkim, dkim_record_name, double_domain_record_name};
pub use finding::{count_kind, count_severity, cross_check, Finding, FindingKind, Severity};

/// The inputs of the web form: two free-text domains and the SSL choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub dkim_domain: Option<String>,
    #[serde(default)]
    pub custom_domain: Option<String>,
    /// `yes` (any case) when the custom domain uses HTTPS/SSL
    #[serde(default)]
    pub custom_domain_ssl: Option<String>,
}

impl CheckRequest {
    pub fn ssl_enabled(&self) -> bool {
        parse_ssl_flag(self.custom_domain_ssl.as_deref())
    }
}

/// Findings of both diagnosers for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub dkim: Vec<Finding>,
    pub custom_domain: Vec<Finding>,
}

impl CheckReport {
    /// Returns true if any finding has error severity.
    pub fn has_errors(&self) -> bool {
        self.dkim
            .iter()
            .chain(self.custom_domain.iter())
            .any(|f| f.severity == Severity::Error)
    }
}

/// Interprets the SSL form value: only `yes` (trimmed, any case) enables it.
pub fn parse_ssl_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("yes"))
}

/// Runs both diagnosers for `request`.
///
/// Missing or blank domains produce an empty finding list for that branch.
pub async fn run_check<C: DnsClient + ?Sized>(client: &C, request: &CheckRequest) -> CheckReport {
    let dkim_domain = request.dkim_domain.as_deref().unwrap_or_default();
    let custom_domain = request.custom_domain.as_deref().unwrap_or_default();
    let (dkim, custom_domain) = tokio::join!(
        diagnose_dkim(client, dkim_domain),
        diagnose_custom_domain(client, custom_domain, request.ssl_enabled()),
    );
    CheckReport {
        dkim,
        custom_domain,
    }
}

#[cfg(test)]
mod tests;
