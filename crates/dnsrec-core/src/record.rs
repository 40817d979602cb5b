//! Provider-agnostic DNS record shape
//!
//! A [`Record`] is what callers hand to and receive from a record store.
//! Providers translate it to and from their own typed objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// DNS record type
///
/// Known kinds are closed variants and only match their upper-case
/// spelling; anything else (including "cname") is carried verbatim in
/// [`RecordType::Other`] so that providers can report it as unsupported
/// instead of failing to parse the caller's input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    /// Canonical name alias
    Cname,
    /// Free-form text
    Txt,
    /// Any other record type, as given by the caller
    Other(String),
}

impl RecordType {
    /// The textual DNS type (e.g. "CNAME")
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::Cname => "CNAME",
            RecordType::Txt => "TXT",
            RecordType::Other(other) => other,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RecordType {
    fn from(s: &str) -> Self {
        match s {
            "CNAME" => RecordType::Cname,
            "TXT" => RecordType::Txt,
            other => RecordType::Other(other.to_string()),
        }
    }
}

impl From<String> for RecordType {
    fn from(s: String) -> Self {
        RecordType::from(s.as_str())
    }
}

impl From<RecordType> for String {
    fn from(t: RecordType) -> Self {
        match t {
            RecordType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for RecordType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RecordType::from(s))
    }
}

/// A DNS record as exchanged with record store callers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Fully-qualified record name (e.g. "_acme-challenge.example.com")
    pub name: String,

    /// Record payload: canonical target for CNAME, text for TXT
    pub value: String,

    /// Time-to-live, serialized as whole seconds
    #[serde(default, with = "ttl_secs")]
    pub ttl: Duration,
}

impl Record {
    /// Create a new record
    pub fn new(
        record_type: impl Into<RecordType>,
        name: impl Into<String>,
        value: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            record_type: record_type.into(),
            name: name.into(),
            value: value.into(),
            ttl,
        }
    }

    /// Create a CNAME record
    pub fn cname(name: impl Into<String>, target: impl Into<String>, ttl: Duration) -> Self {
        Self::new(RecordType::Cname, name, target, ttl)
    }

    /// Create a TXT record
    pub fn txt(name: impl Into<String>, text: impl Into<String>, ttl: Duration) -> Self {
        Self::new(RecordType::Txt, name, text, ttl)
    }

    /// Set the time-to-live
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// TTL in whole seconds, saturating at `u32::MAX`
    pub fn ttl_secs(&self) -> u32 {
        u32::try_from(self.ttl.as_secs()).unwrap_or(u32::MAX)
    }
}

mod ttl_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(ttl.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
