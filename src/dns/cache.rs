//! Request-scoped record cache for a single host.

use tokio::sync::OnceCell;

use super::client::DnsClient;
use super::records::ResolvedRecordSet;
use crate::error_handling::ResolutionFailure;

type CachedAnswer = Result<ResolvedRecordSet, ResolutionFailure>;

/// A, MX and NS answers for one host, each fetched at most once.
///
/// Lives for one diagnosis; nothing is shared between requests. Failures are
/// cached too, so a host whose NS lookup timed out is not queried again
/// within the same request.
pub struct HostRecords<'a, C: DnsClient + ?Sized> {
    client: &'a C,
    host: String,
    a: OnceCell<CachedAnswer>,
    mx: OnceCell<CachedAnswer>,
    ns: OnceCell<CachedAnswer>,
}

impl<'a, C: DnsClient + ?Sized> HostRecords<'a, C> {
    pub fn new(client: &'a C, host: impl Into<String>) -> Self {
        Self {
            client,
            host: host.into(),
            a: OnceCell::new(),
            mx: OnceCell::new(),
            ns: OnceCell::new(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub async fn a(&self) -> &CachedAnswer {
        self.a
            .get_or_init(|| self.client.query_a(&self.host))
            .await
    }

    pub async fn mx(&self) -> &CachedAnswer {
        self.mx
            .get_or_init(|| self.client.query_mx(&self.host))
            .await
    }

    pub async fn ns(&self) -> &CachedAnswer {
        self.ns
            .get_or_init(|| self.client.query_ns(&self.host))
            .await
    }

    /// Answers for every record kind: the memoized A, MX and NS answers plus
    /// CNAME and TXT queries issued now.
    pub async fn all(&self) -> Vec<CachedAnswer> {
        let (a, mx, ns, cname, txt) = tokio::join!(
            self.a(),
            self.mx(),
            self.ns(),
            self.client.query_cname(&self.host),
            self.client.query_txt(&self.host),
        );
        vec![a.clone(), mx.clone(), ns.clone(), cname, txt]
    }
}
