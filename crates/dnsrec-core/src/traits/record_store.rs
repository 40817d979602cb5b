// # Record Store Traits
//
// Defines the interface callers (certificate automation, DNS tooling) use to
// manage records inside a zone, independent of the backend.
//
// ## Implementations
//
// - Infoblox: `dnsrec-provider-infoblox` crate
//
// ## Usage
//
// ```rust,ignore
// use dnsrec_core::{Record, RecordAppender, RecordDeleter};
// use std::time::Duration;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* RecordStore implementation */;
//
//     let challenge = Record::txt("_acme-challenge.example.com", "token", Duration::from_secs(60));
//     provider.append_records("example.com", &[challenge.clone()]).await?;
//     // ... wait for validation ...
//     provider.delete_records("example.com", &[challenge]).await?;
//
//     Ok(())
// }
// ```

use crate::outcome::BatchReport;
use crate::record::Record;
use async_trait::async_trait;

/// Lists the records of a zone
#[async_trait]
pub trait RecordGetter: Send + Sync {
    /// List the records in `zone`
    ///
    /// Returns an empty list, not an error, when nothing matches. A failure
    /// of any underlying query fails the whole call; partial results are
    /// never returned.
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>, crate::Error>;
}

/// Adds records to a zone
#[async_trait]
pub trait RecordAppender: Send + Sync {
    /// Add `records` to `zone`, reporting the outcome of every input record
    ///
    /// Records are created unconditionally; appending the same record twice
    /// creates two records if the backend allows it.
    async fn append_records_detailed(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<BatchReport, crate::Error>;

    /// Add `records` to `zone` and return the records that were added
    ///
    /// Records that could not be added are silently left out.
    async fn append_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, crate::Error> {
        Ok(self.append_records_detailed(zone, records).await?.into_records())
    }
}

/// Creates or updates records in a zone
#[async_trait]
pub trait RecordSetter: Send + Sync {
    /// Upsert `records` in `zone`, reporting the outcome of every input record
    async fn set_records_detailed(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<BatchReport, crate::Error>;

    /// Upsert `records` in `zone` and return the records as stored afterwards
    ///
    /// Records that could not be set are silently left out.
    async fn set_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, crate::Error> {
        Ok(self.set_records_detailed(zone, records).await?.into_records())
    }
}

/// Removes records from a zone
#[async_trait]
pub trait RecordDeleter: Send + Sync {
    /// Delete `records` from `zone`, reporting the outcome of every input record
    async fn delete_records_detailed(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<BatchReport, crate::Error>;

    /// Delete `records` from `zone` and return the records that were deleted
    ///
    /// Records that did not exist or could not be deleted are silently left out.
    async fn delete_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, crate::Error> {
        Ok(self.delete_records_detailed(zone, records).await?.into_records())
    }
}

/// A backend supporting the full record lifecycle
pub trait RecordStore: RecordGetter + RecordAppender + RecordSetter + RecordDeleter {
    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing record stores from configuration
pub trait RecordStoreFactory: Send + Sync {
    /// Create a RecordStore instance from provider-specific configuration
    ///
    /// # Parameters
    ///
    /// - `config`: The provider fields of a [`crate::registry::ProviderSpec`]
    fn create(&self, config: &serde_json::Value) -> Result<Box<dyn RecordStore>, crate::Error>;
}
