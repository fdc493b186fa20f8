//! Scripted in-memory DNS client.
//!
//! Answers come from a table keyed by (name, record kind); names without an
//! entry have no records. Used by the test suites and for offline demos.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::client::DnsClient;
use super::records::{trim_root_dot, RecordData, RecordKind, ResolvedRecordSet};
use crate::error_handling::ResolutionFailure;

type Answer = Result<Vec<RecordData>, ResolutionFailure>;

/// [`DnsClient`] that answers from a fixed table and records every query.
#[derive(Debug, Default)]
pub struct StaticDnsClient {
    answers: HashMap<(String, RecordKind), Answer>,
    queries: Mutex<Vec<(String, RecordKind)>>,
}

impl StaticDnsClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the answer records for `name`.
    pub fn with_records(mut self, name: &str, kind: RecordKind, records: Vec<RecordData>) -> Self {
        self.answers.insert((key(name), kind), Ok(records));
        self
    }

    /// Makes every query for (`name`, `kind`) time out.
    pub fn with_timeout(mut self, name: &str, kind: RecordKind) -> Self {
        let failure = ResolutionFailure::Timeout {
            name: key(name),
            kind,
        };
        self.answers.insert((key(name), kind), Err(failure));
        self
    }

    /// Makes every query for (`name`, `kind`) fail with `failure`.
    pub fn with_failure(mut self, name: &str, kind: RecordKind, failure: ResolutionFailure) -> Self {
        self.answers.insert((key(name), kind), Err(failure));
        self
    }

    pub fn with_cname(self, name: &str, target: &str) -> Self {
        self.with_records(
            name,
            RecordKind::Cname,
            vec![RecordData::Cname(target.to_string())],
        )
    }

    pub fn with_nameservers(self, name: &str, hosts: &[&str]) -> Self {
        let records = hosts
            .iter()
            .map(|h| RecordData::Ns(h.to_string()))
            .collect();
        self.with_records(name, RecordKind::Ns, records)
    }

    pub fn with_txt(self, name: &str, records: Vec<RecordData>) -> Self {
        self.with_records(name, RecordKind::Txt, records)
    }

    /// Queries received so far, in order.
    pub fn queries(&self) -> Vec<(String, RecordKind)> {
        self.queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of queries received for (`name`, `kind`).
    pub fn query_count(&self, name: &str, kind: RecordKind) -> usize {
        let name = key(name);
        self.queries()
            .iter()
            .filter(|(n, k)| *n == name && *k == kind)
            .count()
    }
}

#[async_trait]
impl DnsClient for StaticDnsClient {
    async fn query(
        &self,
        name: &str,
        kind: RecordKind,
    ) -> Result<ResolvedRecordSet, ResolutionFailure> {
        let name = key(name);
        self.queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((name.clone(), kind));

        match self.answers.get(&(name.clone(), kind)) {
            Some(Ok(records)) => Ok(ResolvedRecordSet::new(name, kind, records.clone())),
            Some(Err(failure)) => Err(failure.clone()),
            None => Ok(ResolvedRecordSet::empty(name, kind)),
        }
    }
}

fn key(name: &str) -> String {
    trim_root_dot(name.trim()).to_ascii_lowercase()
}
