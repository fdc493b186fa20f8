//! Configuration constants.
//!
//! This module defines the provider-specific record names, the known-CDN
//! allow-list, DNS timeouts and the links attached to findings.

use std::time::Duration;

// Provider records
/// Selector label of the DKIM verification CNAME (`<selector>.<root domain>`).
pub const DKIM_SELECTOR: &str = "intercom._domainkey";

/// Value the help-center custom domain CNAME must point at.
pub const CUSTOM_DOMAIN_CNAME_TARGET: &str = "custom.intercom.help";

/// DNS providers that proxy traffic and need CDN-specific guidance.
///
/// This is a plain allow-list and not a CDN detector: a provider is "known"
/// only if its root domain matches one of these entries exactly.
pub const KNOWN_CDN_PROVIDERS: &[&str] = &["cloudflare.com"];

// Network operation timeouts
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 5;
/// Number of retries after the first attempt fails with a transport error
pub const DNS_RETRIES: usize = 3;
/// Delay between DNS retries in seconds
pub const DNS_RETRY_DELAY_SECS: u64 = 5;

/// Default per-query DNS timeout.
pub const DNS_TIMEOUT: Duration = Duration::from_secs(DNS_TIMEOUT_SECS);
/// Default delay between DNS retries.
pub const DNS_RETRY_DELAY: Duration = Duration::from_secs(DNS_RETRY_DELAY_SECS);

// Input limits
/// Maximum length of a domain name (RFC 1035)
pub const MAX_DOMAIN_LENGTH: usize = 253;
/// Maximum length of a single label (RFC 1035)
pub const MAX_LABEL_LENGTH: usize = 63;

// HTTP API
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4567;

// Links attached to findings
pub const CLOUDFLARE_CNAME_FLATTENING_URL: &str = "https://support.cloudflare.com/hc/en-us/articles/200169056-CNAME-Flattening-RFC-compliant-support-for-CNAME-at-the-root";
pub const CLOUDFLARE_PROXY_MODE_URL: &str = "https://support.cloudflare.com/hc/en-us/articles/200169626-What-subdomains-are-appropriate-for-orange-gray-clouds-";
pub const CUSTOM_DOMAIN_DOCS_URL: &str =
    "https://developers.intercom.com/installing-intercom/docs/set-up-your-custom-domain";
pub const CROSS_CHECK_BASE_URL: &str = "https://mxtoolbox.com/SuperTool.aspx";

// Messages shared by both diagnosers
pub const DNS_CHECK_MESSAGE: &str = "Ensure you are modifying the correct DNS server. Check the DNS provider or nameserver details to ensure it matches the server you're modifying";
pub const ABORT_MESSAGE: &str =
    "Can't complete check. Ensure you have specified a correct domain / URL";
