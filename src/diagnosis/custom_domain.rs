//! Help-center custom domain diagnosis.
//!
//! The custom domain itself (usually a subdomain such as `help.example.com`)
//! must carry the CNAME; the root domain is only used to find the DNS
//! provider.

use crate::config::{
    ABORT_MESSAGE, CLOUDFLARE_PROXY_MODE_URL, CUSTOM_DOMAIN_CNAME_TARGET, CUSTOM_DOMAIN_DOCS_URL,
    DNS_CHECK_MESSAGE,
};
use crate::dns::DnsClient;
use crate::domain::Domain;

use super::finding::{cross_check, Finding, FindingKind};
use super::preamble::{inspect, invalid_domain};

/// Diagnoses the CNAME of a help-center custom domain.
///
/// With `ssl_enabled` the CNAME value is not compared: HTTPS setups are often
/// proxied and may legitimately point elsewhere, so guidance is given instead
/// and a failed CNAME lookup only produces a warning.
pub async fn diagnose_custom_domain<C: DnsClient + ?Sized>(
    client: &C,
    raw_domain: &str,
    ssl_enabled: bool,
) -> Vec<Finding> {
    let domain = match Domain::parse(raw_domain) {
        Ok(Some(domain)) => domain,
        Ok(None) => return Vec::new(),
        Err(e) => return vec![started(raw_domain.trim()), invalid_domain(e)],
    };
    log::info!("Checking custom domain {domain} (ssl: {ssl_enabled})");

    let mut findings = vec![started(domain.as_str())];
    let Some(inspection) = inspect(client, &domain, &mut findings).await else {
        return findings;
    };

    let cname = match client.query_cname(domain.as_str()).await {
        Ok(answer) => answer
            .cname_target()
            .filter(|target| !target.is_empty())
            .map(str::to_string),
        Err(e) if ssl_enabled => {
            log::warn!("CNAME lookup failed for {domain}, continuing for HTTPS setup: {e}");
            findings.push(Finding::warning(
                FindingKind::CnameLookupFailed,
                format!("Problem retrieving CNAME for {domain}. Continuing since HTTPS setups may not expose a plain CNAME"),
            ));
            None
        }
        Err(e) => {
            log::warn!("CNAME lookup failed for {domain}: {e}");
            findings.push(Finding::error(
                FindingKind::CnameLookupFailed,
                format!("Problem retrieving CNAME on domain. {ABORT_MESSAGE}"),
            ));
            return findings;
        }
    };

    if ssl_enabled {
        if cname.is_some() && inspection.is_known_cdn {
            findings.push(
                Finding::info(
                    FindingKind::CdnProxy,
                    "It looks like you're using Cloudflare and a CNAME is visible. If you're having issues, ensure that the DNS entry is proxied (orange cloud) so traffic goes through Cloudflare to provide HTTPS",
                )
                .with_links(&[CLOUDFLARE_PROXY_MODE_URL]),
            );
        }
        findings.push(
            Finding::info(
                FindingKind::SslConfiguration,
                "For custom domains with HTTPS/SSL the setup depends on your configuration. Ensure you have followed the steps in the docs, or if you have a custom setup get in touch with Intercom with the details. Check the DNS providers listed to ensure you are configuring the correct DNS",
            )
            .with_links(&[CUSTOM_DOMAIN_DOCS_URL]),
        );
    } else {
        findings.push(compare_cname(cname.as_deref()));
        if let Some(value) = &cname {
            findings.push(Finding::info(
                FindingKind::CnameValue,
                format!("CNAME exists with value {value}"),
            ));
        }
    }

    findings.push(cross_check(domain.as_str()));
    log::info!(
        "Custom domain check for {domain} produced {} findings",
        findings.len()
    );
    findings
}

/// Compares the CNAME found against the expected target.
pub fn compare_cname(found: Option<&str>) -> Finding {
    match found {
        None => Finding::error(
            FindingKind::CustomCnameMissing,
            format!(
                "No CNAME value set up. It needs to be {CUSTOM_DOMAIN_CNAME_TARGET}. {DNS_CHECK_MESSAGE}"
            ),
        ),
        Some(value) if value != CUSTOM_DOMAIN_CNAME_TARGET => Finding::error(
            FindingKind::CustomCnameIncorrect,
            format!(
                "Looks like you have an incorrect CNAME value. It needs to be {CUSTOM_DOMAIN_CNAME_TARGET}. {DNS_CHECK_MESSAGE}"
            ),
        ),
        Some(_) => Finding::success(
            FindingKind::CustomCnameCorrect,
            "CNAME looks correctly configured",
        ),
    }
}

fn started(domain: &str) -> Finding {
    Finding::info(
        FindingKind::CheckStarted,
        format!("Checking help-center custom domain: {domain}"),
    )
}
