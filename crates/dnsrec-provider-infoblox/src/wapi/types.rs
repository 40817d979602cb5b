//! WAPI object shapes
//!
//! Typed views of the `record:cname` and `record:txt` objects as returned
//! by the appliance. Objects are fetched fresh for every operation and
//! never cached.

use dnsrec_core::{Record, RecordType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Extensible attribute value, WAPI form `{"value": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EaValue {
    /// String, integer or list value
    pub value: serde_json::Value,
}

impl EaValue {
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Extensible attributes attached to an object, keyed by attribute name
pub type ExtensibleAttributes = BTreeMap<String, EaValue>;

/// Record kinds handled by the Infoblox provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// `record:cname`
    Cname,
    /// `record:txt`
    Txt,
}

impl RecordKind {
    /// All supported kinds, in listing order
    pub const ALL: [RecordKind; 2] = [RecordKind::Cname, RecordKind::Txt];

    /// Map a generic record type to a supported kind
    pub fn from_record_type(record_type: &RecordType) -> Option<Self> {
        match record_type {
            RecordType::Cname => Some(RecordKind::Cname),
            RecordType::Txt => Some(RecordKind::Txt),
            RecordType::Other(_) => None,
        }
    }

    /// WAPI object type
    pub fn object_type(self) -> &'static str {
        match self {
            RecordKind::Cname => "record:cname",
            RecordKind::Txt => "record:txt",
        }
    }

    /// WAPI field carrying the record payload
    pub fn payload_field(self) -> &'static str {
        match self {
            RecordKind::Cname => "canonical",
            RecordKind::Txt => "text",
        }
    }

    /// Fields requested back from every read and write
    pub fn return_fields(self) -> String {
        format!(
            "name,{},view,ttl,use_ttl,comment,extattrs",
            self.payload_field()
        )
    }

    /// Generic record type
    pub fn record_type(self) -> RecordType {
        match self {
            RecordKind::Cname => RecordType::Cname,
            RecordKind::Txt => RecordType::Txt,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.record_type().as_str())
    }
}

/// `record:cname` object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordCname {
    /// Opaque object reference
    #[serde(rename = "_ref")]
    pub reference: String,
    #[serde(default)]
    pub name: String,
    /// Alias target
    #[serde(default)]
    pub canonical: String,
    #[serde(default)]
    pub view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Whether `ttl` overrides the zone default
    #[serde(default)]
    pub use_ttl: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default)]
    pub ea: ExtensibleAttributes,
}

/// `record:txt` object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordTxt {
    /// Opaque object reference
    #[serde(rename = "_ref")]
    pub reference: String,
    #[serde(default)]
    pub name: String,
    /// Text payload
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Whether `ttl` overrides the zone default
    #[serde(default)]
    pub use_ttl: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "extattrs", default)]
    pub ea: ExtensibleAttributes,
}

/// A stored record of any supported kind
#[derive(Debug, Clone, PartialEq)]
pub enum VendorRecord {
    Cname(RecordCname),
    Txt(RecordTxt),
}

impl VendorRecord {
    /// Decode a WAPI object of the given kind
    pub fn from_json(kind: RecordKind, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match kind {
            RecordKind::Cname => VendorRecord::Cname(serde_json::from_value(value)?),
            RecordKind::Txt => VendorRecord::Txt(serde_json::from_value(value)?),
        })
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            VendorRecord::Cname(_) => RecordKind::Cname,
            VendorRecord::Txt(_) => RecordKind::Txt,
        }
    }

    pub fn reference(&self) -> &str {
        match self {
            VendorRecord::Cname(r) => &r.reference,
            VendorRecord::Txt(r) => &r.reference,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            VendorRecord::Cname(r) => &r.name,
            VendorRecord::Txt(r) => &r.name,
        }
    }

    /// Canonical target or text, depending on kind
    pub fn value(&self) -> &str {
        match self {
            VendorRecord::Cname(r) => &r.canonical,
            VendorRecord::Txt(r) => &r.text,
        }
    }

    pub fn view(&self) -> &str {
        match self {
            VendorRecord::Cname(r) => &r.view,
            VendorRecord::Txt(r) => &r.view,
        }
    }

    pub fn ttl(&self) -> Option<u32> {
        match self {
            VendorRecord::Cname(r) => r.ttl,
            VendorRecord::Txt(r) => r.ttl,
        }
    }

    pub fn use_ttl(&self) -> bool {
        match self {
            VendorRecord::Cname(r) => r.use_ttl,
            VendorRecord::Txt(r) => r.use_ttl,
        }
    }

    pub fn comment(&self) -> Option<&str> {
        match self {
            VendorRecord::Cname(r) => r.comment.as_deref(),
            VendorRecord::Txt(r) => r.comment.as_deref(),
        }
    }

    pub fn ea(&self) -> &ExtensibleAttributes {
        match self {
            VendorRecord::Cname(r) => &r.ea,
            VendorRecord::Txt(r) => &r.ea,
        }
    }

    /// Translate to the generic record shape
    pub fn to_record(&self) -> Record {
        Record::new(
            self.kind().record_type(),
            self.name(),
            self.value(),
            Duration::from_secs(u64::from(self.ttl().unwrap_or(0))),
        )
    }
}

/// Error body returned by the WAPI on failure
#[derive(Debug, Clone, Deserialize)]
pub struct WapiError {
    #[serde(rename = "Error", default)]
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl WapiError {
    /// WAPI code for a missing object
    pub const NOT_FOUND_CODE: &'static str = "Client.Ibap.Data.NotFound";

    /// Human-readable message, preferring `text` over `Error`
    pub fn message(&self) -> &str {
        match self.text.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => &self.error,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code.as_deref() == Some(Self::NOT_FOUND_CODE)
    }
}
