//! DNS hosting inspection.
//!
//! Resolves a root domain's authoritative nameservers and reduces them to the
//! DNS providers hosting the zone (e.g. `ns1.cloudflare.com` becomes
//! `cloudflare.com`), then classifies providers against the known-CDN list.

use crate::config::KNOWN_CDN_PROVIDERS;
use crate::dns::{DnsClient, HostRecords};
use crate::domain::{root_of_str, RootDomain};
use crate::error_handling::{InspectionError, ResolutionFailure};

/// Nameserver and provider view of one root domain.
///
/// Both [`providers`](Self::providers) and [`nameservers`](Self::nameservers)
/// read the same NS answer, which is fetched once per instance.
pub struct DnsTopology<'a, C: DnsClient + ?Sized> {
    records: HostRecords<'a, C>,
}

impl<'a, C: DnsClient + ?Sized> DnsTopology<'a, C> {
    pub fn new(client: &'a C, root: &RootDomain) -> Self {
        Self {
            records: HostRecords::new(client, root.as_str()),
        }
    }

    /// Root domains of the zone's nameservers, deduplicated in answer order.
    ///
    /// # Errors
    ///
    /// Fails if the NS query fails or a nameserver host has no registrable
    /// domain.
    pub async fn providers(&self) -> Result<Vec<RootDomain>, InspectionError> {
        let answer = self.records.ns().await.as_ref().map_err(Clone::clone)?;
        let mut providers: Vec<RootDomain> = Vec::new();
        for host in answer.hostnames() {
            let provider = root_of_str(&host)?;
            if !providers.contains(&provider) {
                providers.push(provider);
            }
        }
        log::debug!(
            "DNS providers for {}: {:?}",
            self.records.host(),
            providers.iter().map(RootDomain::as_str).collect::<Vec<_>>()
        );
        Ok(providers)
    }

    /// Raw nameserver host names, used when no provider could be derived.
    pub async fn nameservers(&self) -> Result<Vec<String>, ResolutionFailure> {
        let answer = self.records.ns().await.as_ref().map_err(Clone::clone)?;
        Ok(answer.hostnames())
    }
}

/// Returns true if `provider` is on the known-CDN allow-list.
///
/// Comparison ignores case and surrounding whitespace. This is an exact match
/// against [`KNOWN_CDN_PROVIDERS`], not CDN detection: a zone proxied by a
/// CDN but hosted elsewhere is not recognized.
pub fn is_known_cdn(provider: &str) -> bool {
    let provider = provider.trim().to_ascii_lowercase();
    !provider.is_empty() && KNOWN_CDN_PROVIDERS.contains(&provider.as_str())
}

/// Returns true if any of `providers` is a known CDN.
pub fn has_known_cdn(providers: &[RootDomain]) -> bool {
    providers.iter().any(|p| is_known_cdn(p.as_str()))
}
