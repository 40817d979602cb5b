//! Record store backed by an Infoblox grid
//!
//! Every operation acquires its own object manager (and with it a freshly
//! authenticated WAPI session), then walks the input records one at a time.
//! A record that cannot be applied is reported in the batch outcome and the
//! batch continues; only failing to acquire the object manager, or a failed
//! listing query, aborts an operation.

use crate::config::InfobloxConfig;
use crate::wapi::{
    ExtensibleAttributes, ObjectManager, ObjectManagerFactory, RecordKind, RecordParams,
    VendorRecord, WapiObjectManagerFactory,
};
use async_trait::async_trait;
use dnsrec_core::{
    BatchReport, Error, Record, RecordAppender, RecordDeleter, RecordGetter, RecordSetter,
    RecordStore, Result, SkipReason,
};
use std::sync::Arc;

/// DNS view used for every lookup and create
pub const DEFAULT_VIEW: &str = "default";

/// Infoblox record store provider (CNAME and TXT)
///
/// The configuration is fixed for the provider's lifetime; no connection
/// is kept between operations.
pub struct InfobloxProvider {
    config: InfobloxConfig,
    managers: Arc<dyn ObjectManagerFactory>,
}

impl std::fmt::Debug for InfobloxProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfobloxProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl InfobloxProvider {
    /// Create a provider talking to the WAPI described by `config`
    ///
    /// # Returns
    ///
    /// - `Err(Error::Config)`: If the configuration is incomplete
    pub fn new(config: InfobloxConfig) -> Result<Self> {
        config.validate()?;
        let managers = Arc::new(WapiObjectManagerFactory::new(config.clone()));
        Ok(Self { config, managers })
    }

    /// Create a provider that acquires its object managers from `managers`
    pub fn with_object_managers(
        config: InfobloxConfig,
        managers: Arc<dyn ObjectManagerFactory>,
    ) -> Self {
        Self { config, managers }
    }

    async fn object_manager(&self, step: &str) -> Result<Box<dyn ObjectManager>> {
        self.managers
            .object_manager()
            .await
            .map_err(|e| Error::connector(step, e))
    }

    /// Parameters for a new record: TTL override on, no comment, no attributes
    fn create_params(record: &Record) -> RecordParams {
        RecordParams {
            view: DEFAULT_VIEW.to_string(),
            name: record.name.clone(),
            value: record.value.clone(),
            use_ttl: true,
            ttl: Some(record.ttl_secs()),
            comment: None,
            ea: ExtensibleAttributes::new(),
        }
    }

    /// Parameters replacing only the payload of `existing`
    ///
    /// TTL, TTL override, comment and extensible attributes are carried over
    /// from the stored record, never from the input.
    fn update_params(existing: &VendorRecord, record: &Record) -> RecordParams {
        RecordParams {
            view: existing.view().to_string(),
            name: existing.name().to_string(),
            value: record.value.clone(),
            use_ttl: existing.use_ttl(),
            ttl: existing.ttl(),
            comment: existing.comment().map(str::to_string),
            ea: existing.ea().clone(),
        }
    }

    fn unsupported(report: &mut BatchReport, record: &Record) {
        tracing::debug!(
            "Skipping {} record {}: unsupported type",
            record.record_type,
            record.name
        );
        report.skipped(
            record,
            SkipReason::UnsupportedType(record.record_type.to_string()),
        );
    }

    async fn upsert(
        manager: &dyn ObjectManager,
        kind: RecordKind,
        record: &Record,
    ) -> Result<VendorRecord> {
        match manager.get_record(kind, DEFAULT_VIEW, &record.name).await {
            Ok(existing) => {
                tracing::debug!("Updating {} record {}", kind, record.name);
                manager
                    .update_record(
                        kind,
                        existing.reference(),
                        &Self::update_params(&existing, record),
                    )
                    .await
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("Creating {} record {}", kind, record.name);
                manager.create_record(kind, &Self::create_params(record)).await
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl RecordGetter for InfobloxProvider {
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>> {
        let manager = self.object_manager("connector").await?;

        let mut records = Vec::new();
        for kind in RecordKind::ALL {
            let found = manager
                .query_records(kind, zone)
                .await
                .map_err(|e| Error::query(kind.to_string(), e))?;
            records.extend(found.iter().map(VendorRecord::to_record));
        }

        tracing::debug!("Found {} record(s) named {}", records.len(), zone);
        Ok(records)
    }
}

#[async_trait]
impl RecordAppender for InfobloxProvider {
    async fn append_records_detailed(&self, zone: &str, records: &[Record]) -> Result<BatchReport> {
        let manager = self.object_manager("object manager").await?;
        let mut report = BatchReport::with_capacity(records.len());

        for record in records {
            let Some(kind) = RecordKind::from_record_type(&record.record_type) else {
                Self::unsupported(&mut report, record);
                continue;
            };

            match manager.create_record(kind, &Self::create_params(record)).await {
                Ok(created) => report.applied(created.to_record()),
                Err(e) => {
                    tracing::warn!("Failed to create {} record {}: {}", kind, record.name, e);
                    report.failed(record, e);
                }
            }
        }

        tracing::info!(
            "Appended {} of {} record(s) in zone {}",
            report.applied_count(),
            records.len(),
            zone
        );
        Ok(report)
    }
}

#[async_trait]
impl RecordSetter for InfobloxProvider {
    async fn set_records_detailed(&self, zone: &str, records: &[Record]) -> Result<BatchReport> {
        let manager = self.object_manager("object manager").await?;
        let mut report = BatchReport::with_capacity(records.len());

        for record in records {
            let Some(kind) = RecordKind::from_record_type(&record.record_type) else {
                Self::unsupported(&mut report, record);
                continue;
            };

            match Self::upsert(manager.as_ref(), kind, record).await {
                Ok(stored) => report.applied(stored.to_record()),
                Err(e) => {
                    tracing::warn!("Failed to set {} record {}: {}", kind, record.name, e);
                    report.failed(record, e);
                }
            }
        }

        tracing::info!(
            "Set {} of {} record(s) in zone {}",
            report.applied_count(),
            records.len(),
            zone
        );
        Ok(report)
    }
}

#[async_trait]
impl RecordDeleter for InfobloxProvider {
    async fn delete_records_detailed(&self, zone: &str, records: &[Record]) -> Result<BatchReport> {
        let manager = self.object_manager("object manager").await?;
        let mut report = BatchReport::with_capacity(records.len());

        for record in records {
            let Some(kind) = RecordKind::from_record_type(&record.record_type) else {
                Self::unsupported(&mut report, record);
                continue;
            };

            let existing = match manager.get_record(kind, DEFAULT_VIEW, &record.name).await {
                Ok(existing) => existing,
                Err(e) if e.is_not_found() => {
                    tracing::debug!("No {} record {} to delete", kind, record.name);
                    report.skipped(record, SkipReason::NotFound);
                    continue;
                }
                Err(e) => {
                    tracing::warn!("Failed to look up {} record {}: {}", kind, record.name, e);
                    report.failed(record, e);
                    continue;
                }
            };

            match manager.delete_record(kind, existing.reference()).await {
                Ok(_) => report.applied(existing.to_record()),
                Err(e) => {
                    tracing::warn!("Failed to delete {} record {}: {}", kind, record.name, e);
                    report.failed(record, e);
                }
            }
        }

        tracing::info!(
            "Deleted {} of {} record(s) in zone {}",
            report.applied_count(),
            records.len(),
            zone
        );
        Ok(report)
    }
}

impl RecordStore for InfobloxProvider {
    fn provider_name(&self) -> &'static str {
        "infoblox"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wapi::{EaValue, RecordTxt};
    use std::time::Duration;

    fn config() -> InfobloxConfig {
        InfobloxConfig::new("gridmaster.example.com", "2.12", "admin", "s3cret")
    }

    #[test]
    fn test_new_validates_config() {
        assert!(InfobloxProvider::new(config()).is_ok());

        let mut bad = config();
        bad.password = String::new();
        assert!(matches!(InfobloxProvider::new(bad), Err(Error::Config(_))));
    }

    #[test]
    fn test_provider_name() {
        let provider = InfobloxProvider::new(config()).unwrap();
        assert_eq!(provider.provider_name(), "infoblox");
    }

    #[test]
    fn test_password_not_exposed_in_debug() {
        let provider = InfobloxProvider::new(config()).unwrap();
        let debug_str = format!("{:?}", provider);
        assert!(debug_str.contains("InfobloxProvider"));
        assert!(!debug_str.contains("s3cret"));
    }

    #[test]
    fn test_create_params() {
        let record = Record::txt("x.example.com", "hello", Duration::from_millis(90_500));
        let params = InfobloxProvider::create_params(&record);

        assert_eq!(params.view, DEFAULT_VIEW);
        assert_eq!(params.name, "x.example.com");
        assert_eq!(params.value, "hello");
        assert!(params.use_ttl);
        assert_eq!(params.ttl, Some(90));
        assert_eq!(params.comment, None);
        assert!(params.ea.is_empty());
    }

    #[test]
    fn test_update_params_only_replace_value() {
        let mut ea = ExtensibleAttributes::new();
        ea.insert("Owner".to_string(), EaValue::new("dns-team"));
        let existing = VendorRecord::Txt(RecordTxt {
            reference: "record:txt/abc:x.example.com/default".to_string(),
            name: "x.example.com".to_string(),
            text: "old".to_string(),
            view: "default".to_string(),
            ttl: Some(300),
            use_ttl: true,
            comment: Some("keep me".to_string()),
            ea: ea.clone(),
        });
        let input = Record::txt("x.example.com", "new", Duration::ZERO);

        let params = InfobloxProvider::update_params(&existing, &input);

        assert_eq!(params.value, "new");
        assert_eq!(params.ttl, Some(300));
        assert!(params.use_ttl);
        assert_eq!(params.comment.as_deref(), Some("keep me"));
        assert_eq!(params.ea, ea);
    }
}
