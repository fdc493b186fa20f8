//! Domain validation and normalization.
//!
//! This module turns user input into a validated [`Domain`] and reduces it to
//! its registrable [`RootDomain`] using the Public Suffix List, so that
//! `foo.example.co.uk` maps to `example.co.uk`.
//!
//! Key functions:
//! - `Domain::parse()` - Validates and normalizes user input
//! - `root_of()` - Extracts the registrable domain (eTLD+1)

use std::fmt;
use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::config::{MAX_DOMAIN_LENGTH, MAX_LABEL_LENGTH};
use crate::error_handling::InvalidDomainError;

static SCHEME_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("scheme pattern is a valid regex")
});

static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9_](?:[a-z0-9_\-]*[a-z0-9_])?$").expect("label pattern is a valid regex")
});

/// A validated, lowercase host name without scheme or trailing dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Domain(String);

/// The registrable part of a [`Domain`] (public suffix plus one label).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RootDomain(String);

impl Domain {
    /// Validates user input.
    ///
    /// Returns `Ok(None)` for blank input. A pasted URL is accepted and
    /// reduced to its host, e.g. `https://Help.Example.com/articles` becomes
    /// `help.example.com`. Internationalized names are converted to their
    /// punycode form (`münchen.de` becomes `xn--mnchen-3ya.de`).
    ///
    /// # Errors
    ///
    /// Returns an error for IP literals and names that are not valid host names.
    pub fn parse(raw: &str) -> Result<Option<Self>, InvalidDomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let host = if SCHEME_PREFIX.is_match(trimmed) {
            let parsed = url::Url::parse(trimmed).map_err(|e| InvalidDomainError::Malformed {
                input: trimmed.to_string(),
                reason: e.to_string(),
            })?;
            match parsed.host() {
                Some(url::Host::Domain(host)) => host.to_string(),
                Some(url::Host::Ipv4(_)) | Some(url::Host::Ipv6(_)) => {
                    return Err(InvalidDomainError::IpAddress {
                        input: trimmed.to_string(),
                    })
                }
                None => {
                    return Err(InvalidDomainError::Malformed {
                        input: trimmed.to_string(),
                        reason: "URL has no host component".to_string(),
                    })
                }
            }
        } else {
            trimmed.to_string()
        };

        let host = to_ascii_host(trimmed, &host)?;
        let host = host.strip_suffix('.').unwrap_or(&host).to_ascii_lowercase();
        validate_host(trimmed, &host)?;
        Ok(Some(Domain(host)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl RootDomain {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RootDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RootDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<RootDomain> for Domain {
    fn from(root: RootDomain) -> Self {
        Domain(root.0)
    }
}

/// Computes the registrable root domain of `domain`.
///
/// A root domain maps to itself, so `root_of(root_of(d)) == root_of(d)`.
///
/// # Errors
///
/// Returns `InvalidDomainError::NoRegistrableDomain` when the name is itself
/// a public suffix (e.g. `com`, `co.uk`).
pub fn root_of(domain: &Domain) -> Result<RootDomain, InvalidDomainError> {
    psl::domain_str(domain.as_str())
        .map(|root| RootDomain(root.to_string()))
        .ok_or_else(|| InvalidDomainError::NoRegistrableDomain {
            input: domain.as_str().to_string(),
        })
}

/// Parses and normalizes a raw host name in one step.
///
/// Used for host names that come from DNS answers (e.g. nameservers), where
/// blank input is an error rather than "nothing to check".
pub fn root_of_str(raw: &str) -> Result<RootDomain, InvalidDomainError> {
    match Domain::parse(raw)? {
        Some(domain) => root_of(&domain),
        None => Err(InvalidDomainError::Malformed {
            input: raw.to_string(),
            reason: "empty name".to_string(),
        }),
    }
}

/// IDNA-converts a host with non-ASCII characters; ASCII hosts pass through.
fn to_ascii_host(input: &str, host: &str) -> Result<String, InvalidDomainError> {
    if host.is_ascii() {
        return Ok(host.to_string());
    }
    match url::Host::parse(host) {
        Ok(url::Host::Domain(ascii)) => Ok(ascii),
        Ok(_) => Err(InvalidDomainError::IpAddress {
            input: input.to_string(),
        }),
        Err(e) => Err(InvalidDomainError::Malformed {
            input: input.to_string(),
            reason: format!("invalid internationalized name: {e}"),
        }),
    }
}

fn validate_host(input: &str, host: &str) -> Result<(), InvalidDomainError> {
    let malformed = |reason: String| InvalidDomainError::Malformed {
        input: input.to_string(),
        reason,
    };

    if host.parse::<IpAddr>().is_ok() || host.starts_with('[') {
        return Err(InvalidDomainError::IpAddress {
            input: input.to_string(),
        });
    }
    if host.len() > MAX_DOMAIN_LENGTH {
        return Err(malformed(format!(
            "name exceeds {MAX_DOMAIN_LENGTH} characters"
        )));
    }
    for label in host.split('.') {
        if label.is_empty() {
            return Err(malformed("empty label".to_string()));
        }
        if label.len() > MAX_LABEL_LENGTH {
            return Err(malformed(format!(
                "label '{label}' exceeds {MAX_LABEL_LENGTH} characters"
            )));
        }
        if !LABEL.is_match(label) {
            return Err(malformed(format!("invalid label '{label}'")));
        }
    }
    Ok(())
}
