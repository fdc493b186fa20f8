// Domain module tests.

use super::*;

fn parse(raw: &str) -> Domain {
    Domain::parse(raw)
        .expect("valid domain")
        .expect("non-blank domain")
}

fn root(raw: &str) -> String {
    root_of(&parse(raw)).expect("registrable").to_string()
}

#[test]
fn test_parse_blank_is_none() {
    assert_eq!(Domain::parse("").unwrap(), None);
    assert_eq!(Domain::parse("   ").unwrap(), None);
    assert_eq!(Domain::parse("\t\n").unwrap(), None);
}

#[test]
fn test_parse_trims_and_lowercases() {
    assert_eq!(parse("  Help.Example.COM ").as_str(), "help.example.com");
}

#[test]
fn test_parse_strips_trailing_dot() {
    assert_eq!(parse("example.com.").as_str(), "example.com");
}

#[test]
fn test_parse_accepts_pasted_url() {
    assert_eq!(
        parse("https://help.example.com/articles?x=1").as_str(),
        "help.example.com"
    );
    assert_eq!(parse("http://Example.com:8080").as_str(), "example.com");
}

#[test]
fn test_parse_rejects_ip_addresses() {
    assert!(matches!(
        Domain::parse("192.0.2.1"),
        Err(InvalidDomainError::IpAddress { .. })
    ));
    assert!(matches!(
        Domain::parse("https://192.0.2.1/"),
        Err(InvalidDomainError::IpAddress { .. })
    ));
    assert!(matches!(
        Domain::parse("2001:db8::1"),
        Err(InvalidDomainError::IpAddress { .. })
    ));
}

#[test]
fn test_parse_rejects_malformed_names() {
    for input in [
        "exa mple.com",
        "example..com",
        ".example.com",
        "-example.com",
        "example-.com",
        "exam!ple.com",
    ] {
        assert!(
            matches!(
                Domain::parse(input),
                Err(InvalidDomainError::Malformed { .. })
            ),
            "{input} should be rejected"
        );
    }
}

#[test]
fn test_parse_rejects_overlong_names() {
    let long_label = "a".repeat(64);
    assert!(Domain::parse(&format!("{long_label}.com")).is_err());

    let long_name = vec!["abcdefghij"; 25].join(".") + ".com";
    assert!(long_name.len() > 253);
    assert!(Domain::parse(&long_name).is_err());
}

#[test]
fn test_parse_converts_internationalized_names() {
    assert_eq!(parse("münchen.de").as_str(), "xn--mnchen-3ya.de");
    assert_eq!(parse(" Help.MÜNCHEN.de. ").as_str(), "help.xn--mnchen-3ya.de");
    assert_eq!(
        parse("https://hilfe.münchen.de/artikel").as_str(),
        "hilfe.xn--mnchen-3ya.de"
    );
    assert_eq!(root("hilfe.münchen.de"), "xn--mnchen-3ya.de");

    assert!(matches!(
        Domain::parse("mün chen.de"),
        Err(InvalidDomainError::Malformed { .. })
    ));
}

#[test]
fn test_parse_allows_underscore_labels() {
    assert_eq!(
        parse("intercom._domainkey.example.com").as_str(),
        "intercom._domainkey.example.com"
    );
}

#[test]
fn test_root_of_simple() {
    assert_eq!(root("example.com"), "example.com");
    assert_eq!(root("help.example.com"), "example.com");
    assert_eq!(root("a.b.c.example.com"), "example.com");
}

#[test]
fn test_root_of_multi_part_suffix() {
    assert_eq!(root("foo.example.co.uk"), "example.co.uk");
    assert_eq!(root("example.co.uk"), "example.co.uk");
    assert_eq!(root("shop.example.com.au"), "example.com.au");
}

#[test]
fn test_root_of_nameserver_hosts() {
    assert_eq!(root("ns1.cloudflare.com"), "cloudflare.com");
    assert_eq!(root("ns-123.awsdns-45.co.uk"), "awsdns-45.co.uk");
}

#[test]
fn test_root_of_public_suffix_fails() {
    for input in ["com", "co.uk"] {
        assert!(
            matches!(
                root_of(&parse(input)),
                Err(InvalidDomainError::NoRegistrableDomain { .. })
            ),
            "{input} has no registrable domain"
        );
    }
}

#[test]
fn test_root_of_is_idempotent() {
    for input in [
        "example.com",
        "help.example.com",
        "foo.example.co.uk",
        "deep.sub.domain.example.org",
        "intercom._domainkey.example.net",
        "ns1.cloudflare.com",
    ] {
        let once = root_of(&parse(input)).unwrap();
        let twice = root_of(&Domain::from(once.clone())).unwrap();
        assert_eq!(once, twice, "root_of should be idempotent for {input}");
    }
}

#[test]
fn test_root_of_str() {
    assert_eq!(
        root_of_str("NS2.CloudFlare.com.").unwrap().as_str(),
        "cloudflare.com"
    );
    assert!(root_of_str("").is_err());
    assert!(root_of_str("com").is_err());
}
