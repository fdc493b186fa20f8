//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `dns_check` library that handles:
//! - Command-line argument parsing
//! - Logger and resolver initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use dns_check::config::{Cli, Command};
use dns_check::dns::{DnsClient, HickoryDnsClient, HostRecords};
use dns_check::initialization::{init_dns_client, init_logger_with};
use dns_check::output::{lookup_to_json, render_lookup, render_report, render_section};
use dns_check::server::{start_server, AppState};
use dns_check::{
    diagnose_custom_domain, diagnose_dkim, run_check, CheckReport, CheckRequest, Finding,
    OutputFormat, Severity,
};

/// Exit status when `--fail-on-error` is set and an error finding was produced
const EXIT_FINDINGS_ERROR: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    match run(cli).await {
        Ok(true) => process::exit(EXIT_FINDINGS_ERROR),
        Ok(false) => Ok(()),
        Err(e) => {
            eprintln!("dns_check error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Runs the selected command; returns true when the process should exit with
/// the findings error status.
async fn run(cli: Cli) -> Result<bool> {
    let client = init_dns_client(&cli.resolver_settings())
        .context("Failed to initialize DNS resolver")?;
    let output = cli.output;

    let has_errors = match cli.command {
        Command::Dkim { domain } => {
            let findings = diagnose_dkim(&client, &domain).await;
            print_findings("DKIM domain verification", &findings, output)?;
            contains_error(&findings)
        }
        Command::CustomDomain { domain, ssl } => {
            let findings = diagnose_custom_domain(&client, &domain, ssl).await;
            print_findings("Help-center custom domain", &findings, output)?;
            contains_error(&findings)
        }
        Command::Check {
            dkim_domain,
            custom_domain,
            custom_domain_ssl,
        } => {
            let request = CheckRequest {
                dkim_domain,
                custom_domain,
                custom_domain_ssl,
            };
            let report = run_check(&client, &request).await;
            print_report(&report, output)?;
            report.has_errors()
        }
        Command::Lookup { name } => {
            lookup(&client, &name, output).await?;
            false
        }
        Command::Serve { bind, port } => {
            let client: Arc<dyn DnsClient> = Arc::new(client);
            start_server(&bind, port, AppState::new(client)).await?;
            false
        }
    };

    Ok(has_errors && cli.fail_on_error)
}

async fn lookup(client: &HickoryDnsClient, name: &str, output: OutputFormat) -> Result<()> {
    let answers = HostRecords::new(client, name).all().await;
    match output {
        OutputFormat::Plain => print!("{}", render_lookup(&answers)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&lookup_to_json(&answers))
                .context("Failed to serialize lookup results")?
        ),
    }
    Ok(())
}

fn print_findings(title: &str, findings: &[Finding], output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Plain => print!("{}", render_section(title, findings)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(findings).context("Failed to serialize findings")?
        ),
    }
    Ok(())
}

fn print_report(report: &CheckReport, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Plain => print!("{}", render_report(report)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(report).context("Failed to serialize report")?
        ),
    }
    Ok(())
}

fn contains_error(findings: &[Finding]) -> bool {
    findings.iter().any(|f| f.severity == Severity::Error)
}
