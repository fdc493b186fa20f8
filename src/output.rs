//! Terminal rendering of findings and record sets for the CLI.

use colored::*;

use crate::diagnosis::{CheckReport, Finding, Severity};
use crate::dns::ResolvedRecordSet;
use crate::error_handling::ResolutionFailure;

/// Outcome of one query of a raw lookup.
pub type LookupAnswer = Result<ResolvedRecordSet, ResolutionFailure>;

/// Renders one titled section of findings, one line per finding.
///
/// Links are listed on indented lines below their finding. An empty section
/// renders as an empty string.
pub fn render_section(title: &str, findings: &[Finding]) -> String {
    if findings.is_empty() {
        return String::new();
    }
    let mut out = format!("{}\n", title.bold());
    for finding in findings {
        out.push_str(&format!(
            "  {} {}\n",
            severity_label(finding.severity),
            finding.message
        ));
        for link in &finding.related_links {
            out.push_str(&format!("      {}\n", link.as_str().dimmed()));
        }
    }
    out
}

/// Renders both sections of a report.
pub fn render_report(report: &CheckReport) -> String {
    let sections = [
        render_section("DKIM domain verification", &report.dkim),
        render_section("Help-center custom domain", &report.custom_domain),
    ];
    sections
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the answers of a raw lookup, one record per line.
pub fn render_records(answer: &ResolvedRecordSet) -> String {
    let header = format!("{} {}", answer.kind(), answer.name());
    if answer.is_empty() {
        return format!("{}\n  {}\n", header.bold(), "(no records)".dimmed());
    }
    let mut out = format!("{}\n", header.bold());
    for record in answer.records() {
        out.push_str(&format!("  {record}\n"));
    }
    out
}

/// Renders every answer of a raw lookup; failed queries show their error.
pub fn render_lookup(answers: &[LookupAnswer]) -> String {
    answers
        .iter()
        .map(|answer| match answer {
            Ok(set) => render_records(set),
            Err(e) => format!("{}\n", e.to_string().red()),
        })
        .collect()
}

/// JSON form of a raw lookup: one object per query with either its records
/// or its error message.
pub fn lookup_to_json(answers: &[LookupAnswer]) -> serde_json::Value {
    answers
        .iter()
        .map(|answer| match answer {
            Ok(set) => serde_json::json!(set),
            Err(e) => serde_json::json!({ "name": e.name(), "error": e.to_string() }),
        })
        .collect()
}

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Informational => "[info]   ".normal(),
        Severity::Success => "[ok]     ".green(),
        Severity::Warning => "[warning]".yellow(),
        Severity::Error => "[error]  ".red(),
    }
}
