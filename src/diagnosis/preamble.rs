//! Steps shared by both diagnosers: root domain and DNS hosting.

use crate::config::ABORT_MESSAGE;
use crate::dns::DnsClient;
use crate::domain::{root_of, Domain, RootDomain};
use crate::topology::{has_known_cdn, DnsTopology};

use super::finding::{Finding, FindingKind};

/// What the preamble learned about the input domain.
pub(crate) struct Inspection {
    pub root: RootDomain,
    pub is_known_cdn: bool,
}

/// Finding for input that cannot be normalized.
pub(crate) fn invalid_domain(reason: impl std::fmt::Display) -> Finding {
    log::debug!("Root domain lookup failed: {reason}");
    Finding::error(
        FindingKind::InvalidDomain,
        format!("Problem retrieving root domain. {ABORT_MESSAGE}"),
    )
}

/// Normalizes `domain` and inspects its DNS hosting, appending findings.
///
/// Returns `None` when the root domain cannot be computed; the caller must
/// stop after that. Provider and nameserver lookup failures only add a
/// warning.
pub(crate) async fn inspect<C: DnsClient + ?Sized>(
    client: &C,
    domain: &Domain,
    findings: &mut Vec<Finding>,
) -> Option<Inspection> {
    let root = match root_of(domain) {
        Ok(root) => root,
        Err(e) => {
            findings.push(invalid_domain(e));
            return None;
        }
    };
    if root.as_str() != domain.as_str() {
        findings.push(Finding::info(
            FindingKind::RootDomain,
            format!("Root domain: {root}"),
        ));
    }

    let topology = DnsTopology::new(client, &root);
    let providers = match topology.providers().await {
        Ok(providers) => providers,
        Err(e) => {
            log::warn!("Could not determine DNS provider for {root}: {e}");
            findings.push(Finding::warning(
                FindingKind::ProviderLookupFailed,
                "Problem retrieving DNS host. Will continue processing but results may not be fully accurate",
            ));
            Vec::new()
        }
    };

    let mut nameservers = Vec::new();
    if providers.is_empty() {
        match topology.nameservers().await {
            Ok(hosts) => nameservers = hosts,
            Err(e) => {
                log::warn!("Could not retrieve nameservers for {root}: {e}");
                findings.push(Finding::warning(
                    FindingKind::NameserverLookupFailed,
                    "Problem retrieving nameservers. Will continue processing but results may not be fully accurate",
                ));
            }
        }
    }

    match providers.as_slice() {
        [] => {}
        [single] => findings.push(Finding::info(
            FindingKind::DnsProvider,
            format!("DNS provider: {single}"),
        )),
        many => findings.push(Finding::info(
            FindingKind::DnsProvider,
            format!(
                "DNS providers: {}",
                many.iter()
                    .map(RootDomain::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        )),
    }
    if !nameservers.is_empty() {
        findings.push(Finding::info(
            FindingKind::Nameservers,
            format!("Nameservers: [{}]", nameservers.join("][")),
        ));
    }

    Some(Inspection {
        is_known_cdn: has_known_cdn(&providers),
        root,
    })
}
