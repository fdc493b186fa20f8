//! DNS client abstraction and the hickory-backed implementation.
//!
//! The diagnosers only see [`DnsClient`], so production code runs against
//! [`HickoryDnsClient`] while tests swap in a scripted client.

use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::lookup::Lookup;
use hickory_resolver::proto::error::ProtoErrorKind;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{Name, RData, RecordType};
use hickory_resolver::TokioAsyncResolver;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::RetryIf;

use super::records::{trim_root_dot, RecordData, RecordKind, ResolvedRecordSet};
use crate::config::ResolverSettings;
use crate::error_handling::ResolutionFailure;

/// Issues DNS queries for the checks.
///
/// Implementations must return an empty [`ResolvedRecordSet`] when the name
/// does not exist or has no records of the requested type, and a
/// [`ResolutionFailure`] only when no usable answer was received.
#[async_trait]
pub trait DnsClient: Send + Sync {
    /// Queries `name` for records of `kind`.
    async fn query(
        &self,
        name: &str,
        kind: RecordKind,
    ) -> Result<ResolvedRecordSet, ResolutionFailure>;

    async fn query_a(&self, name: &str) -> Result<ResolvedRecordSet, ResolutionFailure> {
        self.query(name, RecordKind::A).await
    }

    async fn query_mx(&self, name: &str) -> Result<ResolvedRecordSet, ResolutionFailure> {
        self.query(name, RecordKind::Mx).await
    }

    async fn query_ns(&self, name: &str) -> Result<ResolvedRecordSet, ResolutionFailure> {
        self.query(name, RecordKind::Ns).await
    }

    async fn query_cname(&self, name: &str) -> Result<ResolvedRecordSet, ResolutionFailure> {
        self.query(name, RecordKind::Cname).await
    }

    /// TXT answers may also carry the CNAME records the resolver chased.
    async fn query_txt(&self, name: &str) -> Result<ResolvedRecordSet, ResolutionFailure> {
        self.query(name, RecordKind::Txt).await
    }
}

impl From<RecordKind> for RecordType {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::A => RecordType::A,
            RecordKind::Mx => RecordType::MX,
            RecordKind::Ns => RecordType::NS,
            RecordKind::Cname => RecordType::CNAME,
            RecordKind::Txt => RecordType::TXT,
        }
    }
}

/// [`DnsClient`] backed by `hickory-resolver`.
///
/// Each attempt is bounded by the resolver timeout; failed attempts are
/// retried on a fixed interval, so a query never takes longer than roughly
/// `(retries + 1) * timeout + retries * retry_delay`.
pub struct HickoryDnsClient {
    resolver: TokioAsyncResolver,
    retries: usize,
    retry_delay: Duration,
}

impl HickoryDnsClient {
    /// Wraps an already configured resolver.
    pub fn new(resolver: TokioAsyncResolver, settings: &ResolverSettings) -> Self {
        Self {
            resolver,
            retries: settings.retries,
            retry_delay: settings.retry_delay,
        }
    }

    async fn query_once(
        &self,
        name: &str,
        fqdn: &Name,
        kind: RecordKind,
    ) -> Result<ResolvedRecordSet, ResolutionFailure> {
        log::debug!("Querying {kind} records for {fqdn}");
        match self.resolver.lookup(fqdn.clone(), kind.into()).await {
            Ok(lookup) => Ok(ResolvedRecordSet::new(name, kind, records_of(&lookup))),
            Err(e) => classify_resolve_error(name, kind, &e),
        }
    }
}

/// Parses `name` as an absolute name.
///
/// A relative name would be expanded with the system search list and local
/// domain, answering for a name the user never entered.
pub(crate) fn absolute_name(name: &str, kind: RecordKind) -> Result<Name, ResolutionFailure> {
    let mut fqdn =
        Name::from_ascii(trim_root_dot(name)).map_err(|e| ResolutionFailure::Transport {
            name: name.to_string(),
            kind,
            message: format!("invalid query name: {e}"),
        })?;
    fqdn.set_fqdn(true);
    Ok(fqdn)
}

#[async_trait]
impl DnsClient for HickoryDnsClient {
    async fn query(
        &self,
        name: &str,
        kind: RecordKind,
    ) -> Result<ResolvedRecordSet, ResolutionFailure> {
        let fqdn = absolute_name(name, kind)?;
        let strategy = FixedInterval::new(self.retry_delay).take(self.retries);
        // renamed to `start` in later 0.3 releases
        #[allow(deprecated)]
        let result = RetryIf::spawn(
            strategy,
            || self.query_once(name, &fqdn, kind),
            |e: &ResolutionFailure| {
                let retry = e.is_retriable();
                if retry {
                    log::debug!("Retrying after failure: {e}");
                }
                retry
            },
        )
        .await;

        if let Err(e) = &result {
            log::warn!("Giving up on {kind} lookup for {name}: {e}");
        }
        result
    }
}

/// Maps a resolver error to an empty answer or a [`ResolutionFailure`].
///
/// "No records found" with NXDOMAIN or NOERROR means the record is absent.
/// Any other response code is a server failure.
pub(crate) fn classify_resolve_error(
    name: &str,
    kind: RecordKind,
    error: &ResolveError,
) -> Result<ResolvedRecordSet, ResolutionFailure> {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
            ResponseCode::NoError | ResponseCode::NXDomain => {
                log::debug!("No {kind} records for {name} ({response_code})");
                Ok(ResolvedRecordSet::empty(name, kind))
            }
            code => Err(ResolutionFailure::ServerError {
                name: name.to_string(),
                kind,
                code: u16::from(code),
            }),
        },
        ResolveErrorKind::Timeout => Err(ResolutionFailure::Timeout {
            name: name.to_string(),
            kind,
        }),
        ResolveErrorKind::Proto(proto) if matches!(proto.kind(), ProtoErrorKind::Timeout) => {
            Err(ResolutionFailure::Timeout {
                name: name.to_string(),
                kind,
            })
        }
        _ => Err(ResolutionFailure::Transport {
            name: name.to_string(),
            kind,
            message: error.to_string(),
        }),
    }
}

/// Converts every answer record, including chased CNAMEs, into [`RecordData`].
fn records_of(lookup: &Lookup) -> Vec<RecordData> {
    lookup
        .record_iter()
        .filter_map(|record| record.data().map(record_data))
        .collect()
}

fn record_data(rdata: &RData) -> RecordData {
    match rdata {
        RData::A(a) => RecordData::A(a.0),
        RData::MX(mx) => RecordData::Mx {
            preference: mx.preference(),
            exchange: trim_root_dot(&mx.exchange().to_utf8()).to_string(),
        },
        RData::NS(ns) => RecordData::Ns(trim_root_dot(&ns.0.to_utf8()).to_string()),
        RData::CNAME(cname) => RecordData::Cname(trim_root_dot(&cname.0.to_utf8()).to_string()),
        RData::TXT(txt) => RecordData::Txt(
            // TXT records can contain multiple strings - join them
            txt.iter()
                .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                .collect::<Vec<String>>()
                .join(""),
        ),
        other => RecordData::Other {
            kind: other.record_type().to_string(),
            data: other.to_string(),
        },
    }
}
