//! DNS resolver initialization.
//!
//! This module builds the hickory resolver behind [`HickoryDnsClient`] with
//! bounded timeouts and no cross-request caching.

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::ResolverSettings;
use crate::dns::HickoryDnsClient;
use crate::error_handling::InitializationError;

/// Standard DNS port
const DNS_PORT: u16 = 53;

/// Initializes the DNS client used by the checks.
///
/// Uses the nameservers from `settings` when given, otherwise the system
/// configuration (`/etc/resolv.conf` or the platform equivalent), falling back
/// to the library default upstreams if the system configuration cannot be read.
///
/// Each attempt is limited to `settings.timeout`; retries are handled by the
/// client so every query stays bounded.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the configured
/// nameserver list is unusable.
pub fn init_dns_client(settings: &ResolverSettings) -> Result<HickoryDnsClient, InitializationError> {
    let (config, opts) = if settings.nameservers.is_empty() {
        match hickory_resolver::system_conf::read_system_conf() {
            Ok((config, opts)) => {
                log::debug!("Using system DNS configuration");
                (config, opts)
            }
            Err(e) => {
                log::warn!("Failed to read system DNS config, using defaults: {e}");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        }
    } else {
        let group = NameServerConfigGroup::from_ips_clear(&settings.nameservers, DNS_PORT, true);
        if group.is_empty() {
            return Err(InitializationError::DnsResolverError(
                "no usable nameservers configured".to_string(),
            ));
        }
        log::debug!("Using configured nameservers: {:?}", settings.nameservers);
        (
            ResolverConfig::from_parts(None, Vec::new(), group),
            ResolverOpts::default(),
        )
    };

    Ok(client_with_config(config, opts, settings))
}

/// Builds the client for `config`, overriding the options the checks rely on.
///
/// The system configuration may carry a search list and local domain; the
/// client queries absolute names so neither is ever applied.
pub(crate) fn client_with_config(
    config: ResolverConfig,
    mut opts: ResolverOpts,
    settings: &ResolverSettings,
) -> HickoryDnsClient {
    opts.timeout = settings.timeout;
    // Retries are driven by the client with a delay between attempts
    opts.attempts = 1;
    opts.ndots = 0;
    // Results must not be shared between requests
    opts.cache_size = 0;
    // Keep chased CNAMEs in TXT answers
    opts.preserve_intermediates = true;

    let resolver = TokioAsyncResolver::tokio(config, opts);
    HickoryDnsClient::new(resolver, settings)
}
