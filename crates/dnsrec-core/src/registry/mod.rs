//! Plugin-based provider registry
//!
//! The registry allows record store providers to be registered dynamically
//! at runtime and instantiated from caller configuration by name.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dnsrec_core::registry::{ProviderRegistry, ProviderSpec};
//!
//! let registry = ProviderRegistry::new();
//! dnsrec_provider_infoblox::register(&registry);
//!
//! let spec: ProviderSpec = serde_json::from_str(r#"{
//!     "name": "infoblox",
//!     "host": "gridmaster.example.com",
//!     "version": "2.12",
//!     "username": "admin",
//!     "password": "secret"
//! }"#)?;
//! let provider = registry.create_provider(&spec)?;
//! ```

use crate::error::{Error, Result};
use crate::traits::{RecordStore, RecordStoreFactory};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Caller-side provider selection: a provider name plus its own fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSpec {
    /// Registered provider name (e.g. "infoblox")
    pub name: String,

    /// Provider-specific configuration fields
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl ProviderSpec {
    /// Create a spec with no provider fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: serde_json::Map::new(),
        }
    }

    /// Add a provider field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Provider registry for plugin-based record store creation
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<HashMap<String, Box<dyn RecordStoreFactory>>>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record store factory under `name`
    ///
    /// Registering the same name twice replaces the earlier factory.
    pub fn register_provider(&self, name: impl Into<String>, factory: Box<dyn RecordStoreFactory>) {
        let name = name.into();
        tracing::debug!("Registering record store provider: {}", name);
        let mut providers = self
            .providers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        providers.insert(name, factory);
    }

    /// Create a record store from a provider spec
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn RecordStore>)`: Created provider instance
    /// - `Err(Error::Config)`: If the provider name is not registered or creation fails
    pub fn create_provider(&self, spec: &ProviderSpec) -> Result<Box<dyn RecordStore>> {
        let providers = self
            .providers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let factory = providers
            .get(&spec.name)
            .ok_or_else(|| Error::config(format!("Unknown provider type: {}", spec.name)))?;

        factory.create(&serde_json::Value::Object(spec.fields.clone()))
    }

    /// List all registered provider names
    pub fn list_providers(&self) -> Vec<String> {
        let providers = self
            .providers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut names: Vec<String> = providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a provider name is registered
    pub fn has_provider(&self, name: &str) -> bool {
        let providers = self
            .providers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        providers.contains_key(name)
    }
}
