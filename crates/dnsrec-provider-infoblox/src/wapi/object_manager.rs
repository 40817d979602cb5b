// # Object Manager
//
// Typed record CRUD on top of a [`Connector`]. The provider only talks to
// the [`ObjectManager`] trait, so tests can swap the appliance for an
// in-memory double.

use crate::config::{InfobloxConfig, TransportConfig};
use crate::wapi::connector::{Connector, QueryParams};
use crate::wapi::types::{ExtensibleAttributes, RecordKind, VendorRecord};
use async_trait::async_trait;
use dnsrec_core::{Error, Result};

/// Writable fields of a record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordParams {
    /// DNS view; only sent on create
    pub view: String,
    pub name: String,
    /// Canonical target or text, depending on kind
    pub value: String,
    /// Whether `ttl` overrides the zone default
    pub use_ttl: bool,
    pub ttl: Option<u32>,
    pub comment: Option<String>,
    pub ea: ExtensibleAttributes,
}

impl RecordParams {
    /// WAPI request body for `kind`
    pub fn to_body(&self, kind: RecordKind, include_view: bool) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        body.insert("name".into(), self.name.clone().into());
        body.insert(kind.payload_field().into(), self.value.clone().into());
        if include_view {
            body.insert("view".into(), self.view.clone().into());
        }
        body.insert("use_ttl".into(), self.use_ttl.into());
        if let Some(ttl) = self.ttl {
            body.insert("ttl".into(), ttl.into());
        }
        if let Some(ref comment) = self.comment {
            body.insert("comment".into(), comment.clone().into());
        }
        if !self.ea.is_empty() {
            // BTreeMap<String, EaValue> always serializes
            body.insert(
                "extattrs".into(),
                serde_json::to_value(&self.ea).unwrap_or_default(),
            );
        }
        serde_json::Value::Object(body)
    }
}

/// Typed CRUD over the supported record kinds
#[async_trait]
pub trait ObjectManager: Send + Sync {
    /// All records of `kind` whose name equals `name`, in any view
    async fn query_records(&self, kind: RecordKind, name: &str) -> Result<Vec<VendorRecord>>;

    /// Create a record and return it as stored
    async fn create_record(&self, kind: RecordKind, params: &RecordParams) -> Result<VendorRecord>;

    /// The record of `kind` named `name` in `view`
    ///
    /// Fails with `Error::NotFound` when there is none.
    async fn get_record(&self, kind: RecordKind, view: &str, name: &str) -> Result<VendorRecord>;

    /// Replace the writable fields of the record at `reference`
    async fn update_record(
        &self,
        kind: RecordKind,
        reference: &str,
        params: &RecordParams,
    ) -> Result<VendorRecord>;

    /// Delete the record at `reference`, returning the deleted reference
    async fn delete_record(&self, kind: RecordKind, reference: &str) -> Result<String>;
}

/// Hands out an object manager for one provider operation
#[async_trait]
pub trait ObjectManagerFactory: Send + Sync {
    async fn object_manager(&self) -> Result<Box<dyn ObjectManager>>;
}

/// [`ObjectManager`] backed by the WAPI
#[derive(Debug)]
pub struct WapiObjectManager {
    connector: Connector,
}

impl WapiObjectManager {
    pub fn new(connector: Connector) -> Self {
        Self { connector }
    }

    fn decode_all(kind: RecordKind, objects: Vec<serde_json::Value>) -> Result<Vec<VendorRecord>> {
        objects
            .into_iter()
            .map(|object| VendorRecord::from_json(kind, object).map_err(Error::from))
            .collect()
    }
}

#[async_trait]
impl ObjectManager for WapiObjectManager {
    async fn query_records(&self, kind: RecordKind, name: &str) -> Result<Vec<VendorRecord>> {
        let query = QueryParams::new()
            .filter("name", name)
            .return_fields(kind.return_fields());
        let objects = self.connector.get_objects(kind.object_type(), &query).await?;
        Self::decode_all(kind, objects)
    }

    async fn create_record(&self, kind: RecordKind, params: &RecordParams) -> Result<VendorRecord> {
        let object = self
            .connector
            .create_object(
                kind.object_type(),
                &params.to_body(kind, true),
                &kind.return_fields(),
            )
            .await?;
        Ok(VendorRecord::from_json(kind, object)?)
    }

    async fn get_record(&self, kind: RecordKind, view: &str, name: &str) -> Result<VendorRecord> {
        let query = QueryParams::new()
            .filter("view", view)
            .filter("name", name)
            .return_fields(kind.return_fields());
        let objects = self.connector.get_objects(kind.object_type(), &query).await?;

        Self::decode_all(kind, objects)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("{} record {} in view {}", kind, name, view)))
    }

    async fn update_record(
        &self,
        kind: RecordKind,
        reference: &str,
        params: &RecordParams,
    ) -> Result<VendorRecord> {
        let object = self
            .connector
            .update_object(reference, &params.to_body(kind, false), &kind.return_fields())
            .await?;
        Ok(VendorRecord::from_json(kind, object)?)
    }

    async fn delete_record(&self, _kind: RecordKind, reference: &str) -> Result<String> {
        self.connector.delete_object(reference).await
    }
}

/// Builds a fresh authenticated connector for every operation
#[derive(Debug, Clone)]
pub struct WapiObjectManagerFactory {
    config: InfobloxConfig,
    transport: TransportConfig,
}

impl WapiObjectManagerFactory {
    pub fn new(config: InfobloxConfig) -> Self {
        Self {
            config,
            transport: TransportConfig::default(),
        }
    }
}

#[async_trait]
impl ObjectManagerFactory for WapiObjectManagerFactory {
    async fn object_manager(&self) -> Result<Box<dyn ObjectManager>> {
        let connector = Connector::connect(
            self.config.host_config(),
            self.config.auth_config(),
            self.transport,
        )
        .await?;
        Ok(Box::new(WapiObjectManager::new(connector)))
    }
}
