//! Diagnosis findings handed to the presentation layer.

use serde::Serialize;
use strum_macros::{Display, EnumIter};
use url::Url;

use crate::config::CROSS_CHECK_BASE_URL;

/// How a finding should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Informational,
    Success,
    Warning,
    Error,
}

/// What a finding is about.
///
/// Every finding the diagnosers emit carries one of these tags, so callers
/// can react to specific outcomes without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FindingKind {
    /// The check started for the given input
    CheckStarted,
    /// The input could not be normalized to a root domain
    InvalidDomain,
    /// The normalized root differs from the input
    RootDomain,
    /// Provider discovery failed; results may be incomplete
    ProviderLookupFailed,
    /// Nameserver discovery failed; results may be incomplete
    NameserverLookupFailed,
    /// DNS providers hosting the zone
    DnsProvider,
    /// Raw nameservers, shown when no provider was derived
    Nameservers,
    /// The DKIM CNAME exists
    DkimCnameFound,
    /// The DKIM CNAME does not exist
    DkimCnameMissing,
    /// The CNAME query itself failed
    CnameLookupFailed,
    /// The zone is hosted on a known CDN that may flatten or proxy the CNAME
    CdnFlattening,
    /// A CNAME exists at the duplicated name `<selector>.<root>.<root>`
    DoubleDomain,
    /// Advice on how the duplicated name was probably created
    DoubleDomainHint,
    /// A TXT record at the DKIM name will block verification
    TxtBlocking,
    /// Other records were returned for the TXT query at the DKIM name
    TxtPresent,
    /// The custom domain has no CNAME
    CustomCnameMissing,
    /// The custom domain CNAME points somewhere else
    CustomCnameIncorrect,
    /// The custom domain CNAME has the expected value
    CustomCnameCorrect,
    /// Echo of the CNAME value found
    CnameValue,
    /// HTTPS/SSL setups depend on the user's configuration
    SslConfiguration,
    /// Guidance on proxy mode for CDN-hosted HTTPS custom domains
    CdnProxy,
    /// Link to an external lookup tool for cross-checking
    CrossCheck,
}

/// One line of a diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_links: Vec<Url>,
}

impl Finding {
    pub fn new(kind: FindingKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            related_links: Vec::new(),
        }
    }

    pub fn info(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Informational, message)
    }

    pub fn success(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Success, message)
    }

    pub fn warning(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Warning, message)
    }

    pub fn error(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Error, message)
    }

    /// Attaches links; strings that are not valid URLs are skipped.
    pub fn with_links(mut self, links: &[&str]) -> Self {
        for link in links {
            match Url::parse(link) {
                Ok(url) => self.related_links.push(url),
                Err(e) => log::warn!("Dropping invalid link {link}: {e}"),
            }
        }
        self
    }
}

/// Trailing finding pointing to an external CNAME lookup for `name`.
pub fn cross_check(name: &str) -> Finding {
    let finding = Finding::info(
        FindingKind::CrossCheck,
        format!("You can also check {name} via MXToolbox"),
    );
    match Url::parse_with_params(CROSS_CHECK_BASE_URL, &[("action", format!("cname:{name}"))]) {
        Ok(url) => Finding {
            related_links: vec![url],
            ..finding
        },
        Err(e) => {
            log::warn!("Could not build cross-check link for {name}: {e}");
            finding
        }
    }
}

/// Number of findings with the given severity.
pub fn count_severity(findings: &[Finding], severity: Severity) -> usize {
    findings.iter().filter(|f| f.severity == severity).count()
}

/// Number of findings with the given kind.
pub fn count_kind(findings: &[Finding], kind: FindingKind) -> usize {
    findings.iter().filter(|f| f.kind == kind).count()
}
