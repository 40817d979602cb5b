// # Infoblox Record Provider
//
// Manages CNAME and TXT records on an Infoblox grid through its REST API
// (WAPI), behind the generic `dnsrec-core` record store traits.
//
// ## Layers
//
// - `config`: caller-supplied grid host, WAPI version and credentials, plus
//   the fixed transport parameters (HTTPS on 443, 20s timeout, 10 pooled
//   connections, certificate verification off)
// - `wapi`: the HTTP connector and a typed object manager for
//   `record:cname` / `record:txt`
// - `provider`: the record store itself, mapping generic records onto WAPI
//   objects in the `default` view
//
// ## Batch Behavior
//
// Each operation builds a fresh authenticated session. Records are handled
// one by one; unsupported types, missing records and per-record API
// failures are reported and skipped. Only session setup failures (and
// listing failures in `get_records`) fail the call as a whole.
//
// ## Security Requirements
//
// - The password NEVER appears in logs or Debug output
// - The provider fails fast on incomplete configuration

pub mod config;
pub mod provider;
pub mod wapi;

pub use config::{InfobloxConfig, TransportConfig, DEFAULT_WAPI_VERSION};
pub use provider::{InfobloxProvider, DEFAULT_VIEW};

use dnsrec_core::{ProviderRegistry, RecordStore, RecordStoreFactory, Result};

/// Factory for creating Infoblox providers from registry fields
pub struct InfobloxFactory;

impl RecordStoreFactory for InfobloxFactory {
    fn create(&self, config: &serde_json::Value) -> Result<Box<dyn RecordStore>> {
        let config = InfobloxConfig::from_json(config)?;
        tracing::debug!("Creating Infoblox provider for {}", config.host);
        Ok(Box::new(InfobloxProvider::new(config)?))
    }
}

/// Register the Infoblox provider with a registry
///
/// # Example
///
/// ```rust,ignore
/// use dnsrec_core::ProviderRegistry;
///
/// let registry = ProviderRegistry::new();
/// dnsrec_provider_infoblox::register(&registry);
/// ```
pub fn register(registry: &ProviderRegistry) {
    registry.register_provider("infoblox", Box::new(InfobloxFactory));
}
