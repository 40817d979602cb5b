//! Infoblox WAPI access
//!
//! - [`Connector`]: authenticated HTTP session with generic object CRUD
//! - [`ObjectManager`]: typed record CRUD, the capability the provider uses
//! - [`types`]: WAPI object shapes

pub mod connector;
pub mod object_manager;
pub mod types;

pub use connector::{Connector, QueryParams};
pub use object_manager::{
    ObjectManager, ObjectManagerFactory, RecordParams, WapiObjectManager, WapiObjectManagerFactory,
};
pub use types::{
    EaValue, ExtensibleAttributes, RecordCname, RecordKind, RecordTxt, VendorRecord, WapiError,
};
