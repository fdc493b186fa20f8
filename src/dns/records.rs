//! Typed DNS answers.
//!
//! Record data is modeled as a tagged union over the record kinds the checks
//! query, so callers match on the variant instead of comparing type strings.

use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Record types issued by the checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordKind {
    #[strum(serialize = "A")]
    A,
    #[strum(serialize = "MX")]
    Mx,
    #[strum(serialize = "NS")]
    Ns,
    #[strum(serialize = "CNAME")]
    Cname,
    #[strum(serialize = "TXT")]
    Txt,
}

/// Data of a single answer record.
///
/// `Other` keeps records of a type the checks never query (e.g. DNAME in a
/// chased answer) so they can still be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "UPPERCASE")]
pub enum RecordData {
    A(Ipv4Addr),
    Mx { preference: u16, exchange: String },
    Ns(String),
    Cname(String),
    Txt(String),
    Other { kind: String, data: String },
}

impl RecordData {
    /// The record kind, or `None` for types outside [`RecordKind`].
    pub fn kind(&self) -> Option<RecordKind> {
        match self {
            RecordData::A(_) => Some(RecordKind::A),
            RecordData::Mx { .. } => Some(RecordKind::Mx),
            RecordData::Ns(_) => Some(RecordKind::Ns),
            RecordData::Cname(_) => Some(RecordKind::Cname),
            RecordData::Txt(_) => Some(RecordKind::Txt),
            RecordData::Other { .. } => None,
        }
    }

    /// Host name carried by NS, CNAME and MX records.
    pub fn host(&self) -> Option<&str> {
        match self {
            RecordData::Ns(host) | RecordData::Cname(host) => Some(host),
            RecordData::Mx { exchange, .. } => Some(exchange),
            _ => None,
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(ip) => write!(f, "A {ip}"),
            RecordData::Mx {
                preference,
                exchange,
            } => write!(f, "MX {preference} {exchange}"),
            RecordData::Ns(host) => write!(f, "NS {host}"),
            RecordData::Cname(target) => write!(f, "CNAME {target}"),
            RecordData::Txt(text) => write!(f, "TXT \"{text}\""),
            RecordData::Other { kind, data } => write!(f, "{kind} {data}"),
        }
    }
}

/// Answers to one query, in the order the resolver returned them.
///
/// An empty set means the name has no records of the queried type (or does
/// not exist). It is created per query and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRecordSet {
    name: String,
    kind: RecordKind,
    records: Vec<RecordData>,
}

impl ResolvedRecordSet {
    pub fn new(name: impl Into<String>, kind: RecordKind, records: Vec<RecordData>) -> Self {
        Self {
            name: name.into(),
            kind,
            records,
        }
    }

    /// An empty answer for `name`.
    pub fn empty(name: impl Into<String>, kind: RecordKind) -> Self {
        Self::new(name, kind, Vec::new())
    }

    /// The queried name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The queried record type.
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn records(&self) -> &[RecordData] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if any answer has the given kind.
    pub fn has_kind(&self, kind: RecordKind) -> bool {
        self.records.iter().any(|r| r.kind() == Some(kind))
    }

    /// Host names of the NS answers.
    pub fn hostnames(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| match r {
                RecordData::Ns(host) => Some(host.clone()),
                _ => None,
            })
            .collect()
    }

    /// Target of the first CNAME answer.
    pub fn cname_target(&self) -> Option<&str> {
        self.records.iter().find_map(|r| match r {
            RecordData::Cname(target) => Some(target.as_str()),
            _ => None,
        })
    }
}

/// Strips the trailing root label dot from a presentation-format name.
pub(crate) fn trim_root_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}
