//! DKIM verification diagnosis.
//!
//! The provider verifies a sending domain through a CNAME at
//! `intercom._domainkey.<root>`. Besides checking that record, this looks for
//! two common mistakes: the record created at `<selector>.<root>.<root>` by DNS
//! panels that append the zone name, and a TXT record at the DKIM name that
//! shadows the CNAME.

use crate::config::{
    ABORT_MESSAGE, CLOUDFLARE_CNAME_FLATTENING_URL, CLOUDFLARE_PROXY_MODE_URL, DKIM_SELECTOR,
    DNS_CHECK_MESSAGE,
};
use crate::dns::{DnsClient, RecordKind, ResolvedRecordSet};
use crate::domain::{Domain, RootDomain};

use super::finding::{cross_check, Finding, FindingKind};
use super::preamble::{inspect, invalid_domain};

/// Name of the DKIM verification record for `root`.
pub fn dkim_record_name(root: &RootDomain) -> String {
    format!("{DKIM_SELECTOR}.{root}")
}

/// The DKIM name with the root domain appended twice.
pub fn double_domain_record_name(root: &RootDomain) -> String {
    format!("{DKIM_SELECTOR}.{root}.{root}")
}

/// Diagnoses the DKIM verification records of `raw_domain`.
///
/// Blank input yields no findings. Every DNS failure is reported as a
/// finding; this never fails.
pub async fn diagnose_dkim<C: DnsClient + ?Sized>(client: &C, raw_domain: &str) -> Vec<Finding> {
    let domain = match Domain::parse(raw_domain) {
        Ok(Some(domain)) => domain,
        Ok(None) => return Vec::new(),
        Err(e) => return vec![started(raw_domain.trim()), invalid_domain(e)],
    };
    log::info!("Checking DKIM records for {domain}");

    let mut findings = vec![started(domain.as_str())];
    let Some(inspection) = inspect(client, &domain, &mut findings).await else {
        return findings;
    };

    let dkim_name = dkim_record_name(&inspection.root);
    let double_name = double_domain_record_name(&inspection.root);
    let (primary, double, txt) = tokio::join!(
        client.query_cname(&dkim_name),
        client.query_cname(&double_name),
        client.query_txt(&dkim_name),
    );

    match primary {
        Ok(answer) => match answer.cname_target() {
            Some(target) => findings.push(Finding::success(
                FindingKind::DkimCnameFound,
                format!(
                    "CNAME exists for {dkim_name}: {target}. Ensure it is the same as the value shown in Intercom"
                ),
            )),
            None => findings.push(Finding::error(
                FindingKind::DkimCnameMissing,
                format!("No CNAME exists for {dkim_name}. {DNS_CHECK_MESSAGE}"),
            )),
        },
        Err(e) => {
            log::warn!("DKIM CNAME lookup failed for {dkim_name}: {e}");
            findings.push(Finding::error(
                FindingKind::CnameLookupFailed,
                format!("Problem retrieving CNAME for {dkim_name}. {ABORT_MESSAGE}"),
            ));
            return findings;
        }
    }

    if inspection.is_known_cdn {
        findings.push(
            Finding::warning(
                FindingKind::CdnFlattening,
                "It looks like you're using Cloudflare. If you're having issues, ensure that CNAME flattening is disabled and that the DNS entry is set to DNS only (gray cloud) so traffic goes to Intercom",
            )
            .with_links(&[CLOUDFLARE_CNAME_FLATTENING_URL, CLOUDFLARE_PROXY_MODE_URL]),
        );
    }

    match double {
        Ok(answer) => {
            if let Some(target) = answer.cname_target() {
                findings.push(Finding::error(
                    FindingKind::DoubleDomain,
                    format!(
                        "Found a CNAME for {double_name} (note the duplicate {root}): {target}",
                        root = inspection.root
                    ),
                ));
                findings.push(Finding::error(
                    FindingKind::DoubleDomainHint,
                    format!(
                        "This is likely an incorrect entry. If you have specified {dkim_name} in your DNS server try using {DKIM_SELECTOR} instead. Some DNS servers automatically add the domain name which causes this duplication"
                    ),
                ));
            }
        }
        Err(e) => log::warn!("Double-domain CNAME lookup failed for {double_name}: {e}"),
    }

    match txt {
        Ok(answer) => findings.extend(classify_txt(&dkim_name, &answer)),
        Err(e) => log::warn!("TXT lookup failed for {dkim_name}: {e}"),
    }

    findings.push(cross_check(&dkim_name));
    log::info!("DKIM check for {domain} produced {} findings", findings.len());
    findings
}

/// Interprets the TXT answer at the DKIM name.
///
/// Resolvers that chase the DKIM CNAME return it alongside the TXT record at
/// its target; that combination is expected. A TXT record without a CNAME
/// means a real TXT record sits at the name and blocks verification. Any
/// other non-empty answer is listed for the user.
pub fn classify_txt(dkim_name: &str, answer: &ResolvedRecordSet) -> Option<Finding> {
    if answer.is_empty() {
        return None;
    }
    let has_cname = answer.has_kind(RecordKind::Cname);
    let has_txt = answer.has_kind(RecordKind::Txt);
    match (has_cname, has_txt) {
        (false, true) => Some(Finding::error(
            FindingKind::TxtBlocking,
            format!("TXT record exists for {dkim_name}. This will prevent verification of the domain"),
        )),
        (true, true) => None,
        _ => {
            let records = answer
                .records()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            Some(Finding::info(
                FindingKind::TxtPresent,
                format!(
                    "TXT query for {dkim_name} returned records that could prevent verification of the domain and should be removed: {records}"
                ),
            ))
        }
    }
}

fn started(domain: &str) -> Finding {
    Finding::info(
        FindingKind::CheckStarted,
        format!("Checking domain for DKIM verification: {domain}"),
    )
}
