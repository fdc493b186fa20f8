//! Diagnosis module tests.

use super::*;
use crate::dns::{RecordData, RecordKind, ResolvedRecordSet, StaticDnsClient};
use crate::error_handling::ResolutionFailure;

const DKIM_NAME: &str = "intercom._domainkey.example.com";
const DOUBLE_NAME: &str = "intercom._domainkey.example.com.example.com";

fn kinds(findings: &[Finding]) -> Vec<FindingKind> {
    findings.iter().map(|f| f.kind).collect()
}

fn txt_answer(records: Vec<RecordData>) -> ResolvedRecordSet {
    ResolvedRecordSet::new(DKIM_NAME, RecordKind::Txt, records)
}

#[test]
fn test_parse_ssl_flag() {
    assert!(parse_ssl_flag(Some("yes")));
    assert!(parse_ssl_flag(Some("YES")));
    assert!(parse_ssl_flag(Some(" Yes ")));
    assert!(!parse_ssl_flag(Some("no")));
    assert!(!parse_ssl_flag(Some("true")));
    assert!(!parse_ssl_flag(Some("")));
    assert!(!parse_ssl_flag(None));
}

#[test]
fn test_record_names() {
    let root = crate::domain::root_of_str("example.com").unwrap();
    assert_eq!(dkim_record_name(&root), DKIM_NAME);
    assert_eq!(double_domain_record_name(&root), DOUBLE_NAME);
}

#[test]
fn test_classify_txt_cname_and_txt_is_expected() {
    let answer = txt_answer(vec![
        RecordData::Cname("dkim.intercom.io".to_string()),
        RecordData::Txt("k=rsa; p=MIGf".to_string()),
    ]);
    assert_eq!(classify_txt(DKIM_NAME, &answer), None);
}

#[test]
fn test_classify_txt_only_txt_blocks() {
    let answer = txt_answer(vec![RecordData::Txt("v=DKIM1; p=abc".to_string())]);
    let finding = classify_txt(DKIM_NAME, &answer).expect("finding");
    assert_eq!(finding.kind, FindingKind::TxtBlocking);
    assert_eq!(finding.severity, Severity::Error);
    assert!(finding.message.contains(DKIM_NAME));
}

#[test]
fn test_classify_txt_other_records_are_listed() {
    let answer = txt_answer(vec![RecordData::Cname("dkim.intercom.io".to_string())]);
    let finding = classify_txt(DKIM_NAME, &answer).expect("finding");
    assert_eq!(finding.kind, FindingKind::TxtPresent);
    assert_eq!(finding.severity, Severity::Informational);
    assert!(finding.message.contains("CNAME dkim.intercom.io"));
}

#[test]
fn test_classify_txt_empty() {
    assert_eq!(classify_txt(DKIM_NAME, &txt_answer(Vec::new())), None);
}

#[test]
fn test_compare_cname() {
    let missing = compare_cname(None);
    assert_eq!(missing.kind, FindingKind::CustomCnameMissing);
    assert!(missing.message.contains("custom.intercom.help"));

    let wrong = compare_cname(Some("example.zendesk.com"));
    assert_eq!(wrong.kind, FindingKind::CustomCnameIncorrect);
    assert_eq!(wrong.severity, Severity::Error);

    let right = compare_cname(Some("custom.intercom.help"));
    assert_eq!(right.kind, FindingKind::CustomCnameCorrect);
    assert_eq!(right.severity, Severity::Success);
}

#[test]
fn test_cross_check_link() {
    let finding = cross_check(DKIM_NAME);
    assert_eq!(finding.severity, Severity::Informational);
    assert_eq!(finding.related_links.len(), 1);
    let link = finding.related_links[0].as_str();
    assert!(link.starts_with("https://mxtoolbox.com/SuperTool.aspx?action=cname"));
    assert!(link.ends_with(DKIM_NAME));
}

#[test]
fn test_finding_serialization() {
    let finding = Finding::warning(FindingKind::CdnFlattening, "check flattening")
        .with_links(&["https://example.com/doc", "not a url"]);
    assert_eq!(finding.related_links.len(), 1);

    let json = serde_json::to_value(&finding).unwrap();
    assert_eq!(json["kind"], "cdn_flattening");
    assert_eq!(json["severity"], "warning");
    assert_eq!(json["related_links"][0], "https://example.com/doc");

    let plain = serde_json::to_value(Finding::info(FindingKind::RootDomain, "x")).unwrap();
    assert!(plain.get("related_links").is_none());
}

#[test]
fn test_enum_names_match_serialized_form() {
    use strum::IntoEnumIterator;
    for kind in FindingKind::iter() {
        assert_eq!(serde_json::to_value(kind).unwrap(), kind.to_string());
    }
    for severity in Severity::iter() {
        assert_eq!(serde_json::to_value(severity).unwrap(), severity.to_string());
    }
    assert_eq!(FindingKind::DkimCnameFound.to_string(), "dkim_cname_found");
}

#[tokio::test]
async fn test_dkim_finding_order() {
    let client = StaticDnsClient::new()
        .with_nameservers("example.com", &["ns1.cloudflare.com", "ns2.cloudflare.com"])
        .with_cname(DKIM_NAME, "dkim.intercom.io")
        .with_cname(DOUBLE_NAME, "dkim.intercom.io")
        .with_txt(
            DKIM_NAME,
            vec![RecordData::Txt("v=DKIM1; p=abc".to_string())],
        );

    let findings = diagnose_dkim(&client, "mail.example.com").await;
    assert_eq!(
        kinds(&findings),
        vec![
            FindingKind::CheckStarted,
            FindingKind::RootDomain,
            FindingKind::DnsProvider,
            FindingKind::DkimCnameFound,
            FindingKind::CdnFlattening,
            FindingKind::DoubleDomain,
            FindingKind::DoubleDomainHint,
            FindingKind::TxtBlocking,
            FindingKind::CrossCheck,
        ]
    );
    assert_eq!(findings[2].message, "DNS provider: cloudflare.com");
}

#[tokio::test]
async fn test_dkim_invalid_domain_stops() {
    let client = StaticDnsClient::new();
    let findings = diagnose_dkim(&client, "co.uk").await;
    assert_eq!(
        kinds(&findings),
        vec![FindingKind::CheckStarted, FindingKind::InvalidDomain]
    );
    assert_eq!(count_severity(&findings, Severity::Error), 1);
    assert!(client.queries().is_empty());

    let findings = diagnose_dkim(&client, "not a domain").await;
    assert_eq!(count_severity(&findings, Severity::Error), 1);
    assert_eq!(findings.last().unwrap().kind, FindingKind::InvalidDomain);
}

#[tokio::test]
async fn test_dkim_provider_failure_degrades() {
    let client = StaticDnsClient::new()
        .with_timeout("example.com", RecordKind::Ns)
        .with_cname(DKIM_NAME, "dkim.intercom.io");

    let findings = diagnose_dkim(&client, "example.com").await;
    assert_eq!(
        kinds(&findings),
        vec![
            FindingKind::CheckStarted,
            FindingKind::ProviderLookupFailed,
            FindingKind::NameserverLookupFailed,
            FindingKind::DkimCnameFound,
            FindingKind::CrossCheck,
        ]
    );
    assert_eq!(count_severity(&findings, Severity::Warning), 2);
    assert_eq!(client.query_count("example.com", RecordKind::Ns), 1);
}

#[tokio::test]
async fn test_dkim_falls_back_to_nameservers() {
    let client = StaticDnsClient::new()
        .with_nameservers("example.com", &["co.uk"])
        .with_cname(DKIM_NAME, "dkim.intercom.io");

    let findings = diagnose_dkim(&client, "example.com").await;
    assert_eq!(findings[1].kind, FindingKind::ProviderLookupFailed);
    assert_eq!(findings[2].kind, FindingKind::Nameservers);
    assert_eq!(findings[2].message, "Nameservers: [co.uk]");
}

#[tokio::test]
async fn test_dkim_primary_lookup_failure_is_fatal() {
    let client = StaticDnsClient::new()
        .with_nameservers("example.com", &["ns1.cloudflare.com"])
        .with_timeout(DKIM_NAME, RecordKind::Cname)
        .with_cname(DOUBLE_NAME, "dkim.intercom.io");

    let findings = diagnose_dkim(&client, "example.com").await;
    let last = findings.last().unwrap();
    assert_eq!(last.kind, FindingKind::CnameLookupFailed);
    assert_eq!(last.severity, Severity::Error);
    assert_eq!(count_kind(&findings, FindingKind::CdnFlattening), 0);
    assert_eq!(count_kind(&findings, FindingKind::CrossCheck), 0);
}

#[tokio::test]
async fn test_dkim_secondary_failures_are_soft() {
    let client = StaticDnsClient::new()
        .with_cname(DKIM_NAME, "dkim.intercom.io")
        .with_timeout(DOUBLE_NAME, RecordKind::Cname)
        .with_failure(
            DKIM_NAME,
            RecordKind::Txt,
            ResolutionFailure::ServerError {
                name: DKIM_NAME.to_string(),
                kind: RecordKind::Txt,
                code: 2,
            },
        );

    let findings = diagnose_dkim(&client, "example.com").await;
    assert_eq!(
        kinds(&findings),
        vec![
            FindingKind::CheckStarted,
            FindingKind::DkimCnameFound,
            FindingKind::CrossCheck,
        ]
    );
}

#[tokio::test]
async fn test_custom_domain_queries_input_not_root() {
    let client = StaticDnsClient::new()
        .with_nameservers("example.com", &["ns1.example-dns.net"])
        .with_cname("help.example.com", "custom.intercom.help");

    let findings = diagnose_custom_domain(&client, "help.example.com", false).await;
    assert_eq!(
        kinds(&findings),
        vec![
            FindingKind::CheckStarted,
            FindingKind::RootDomain,
            FindingKind::DnsProvider,
            FindingKind::CustomCnameCorrect,
            FindingKind::CnameValue,
            FindingKind::CrossCheck,
        ]
    );
    assert_eq!(client.query_count("help.example.com", RecordKind::Cname), 1);
    assert_eq!(client.query_count("example.com", RecordKind::Cname), 0);
    assert_eq!(client.query_count("example.com", RecordKind::Ns), 1);
    assert!(findings
        .last()
        .unwrap()
        .related_links[0]
        .as_str()
        .ends_with("help.example.com"));
}

#[tokio::test]
async fn test_custom_domain_lookup_failure_without_ssl_is_fatal() {
    let client = StaticDnsClient::new().with_timeout("help.example.com", RecordKind::Cname);

    let findings = diagnose_custom_domain(&client, "help.example.com", false).await;
    let last = findings.last().unwrap();
    assert_eq!(last.kind, FindingKind::CnameLookupFailed);
    assert_eq!(last.severity, Severity::Error);
    assert_eq!(count_kind(&findings, FindingKind::CrossCheck), 0);
}

#[tokio::test]
async fn test_custom_domain_lookup_failure_with_ssl_degrades() {
    let client = StaticDnsClient::new()
        .with_nameservers("example.com", &["ns1.cloudflare.com"])
        .with_timeout("help.example.com", RecordKind::Cname);

    let findings = diagnose_custom_domain(&client, "help.example.com", true).await;
    assert_eq!(
        kinds(&findings),
        vec![
            FindingKind::CheckStarted,
            FindingKind::RootDomain,
            FindingKind::DnsProvider,
            FindingKind::CnameLookupFailed,
            FindingKind::SslConfiguration,
            FindingKind::CrossCheck,
        ]
    );
    assert_eq!(findings[3].severity, Severity::Warning);
    assert_eq!(count_severity(&findings, Severity::Error), 0);
}

#[tokio::test]
async fn test_custom_domain_ssl_with_cdn_adds_proxy_guidance() {
    let client = StaticDnsClient::new()
        .with_nameservers("example.com", &["ns1.cloudflare.com"])
        .with_cname("help.example.com", "example.cdn.cloudflare.net");

    let findings = diagnose_custom_domain(&client, "help.example.com", true).await;
    assert_eq!(count_kind(&findings, FindingKind::CdnProxy), 1);
    assert_eq!(count_kind(&findings, FindingKind::SslConfiguration), 1);
    assert_eq!(count_kind(&findings, FindingKind::CustomCnameIncorrect), 0);
    assert_eq!(count_severity(&findings, Severity::Error), 0);
}

#[tokio::test]
async fn test_custom_domain_ssl_without_cname_skips_proxy_guidance() {
    let client =
        StaticDnsClient::new().with_nameservers("example.com", &["ns1.cloudflare.com"]);

    let findings = diagnose_custom_domain(&client, "help.example.com", true).await;
    assert_eq!(count_kind(&findings, FindingKind::CdnProxy), 0);
    assert_eq!(count_kind(&findings, FindingKind::SslConfiguration), 1);
}

#[tokio::test]
async fn test_run_check_runs_both_branches() {
    let client = StaticDnsClient::new()
        .with_cname(DKIM_NAME, "dkim.intercom.io")
        .with_cname("help.example.com", "custom.intercom.help");
    let request = CheckRequest {
        dkim_domain: Some("example.com".to_string()),
        custom_domain: Some("help.example.com".to_string()),
        custom_domain_ssl: Some("no".to_string()),
    };

    let report = run_check(&client, &request).await;
    assert_eq!(count_kind(&report.dkim, FindingKind::DkimCnameFound), 1);
    assert_eq!(
        count_kind(&report.custom_domain, FindingKind::CustomCnameCorrect),
        1
    );
    assert!(!report.has_errors());
}

#[tokio::test]
async fn test_run_check_with_empty_request() {
    let client = StaticDnsClient::new();
    let report = run_check(&client, &CheckRequest::default()).await;
    assert_eq!(report, CheckReport::default());
    assert!(client.queries().is_empty());
}
