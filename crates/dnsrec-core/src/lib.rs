// # dnsrec-core
//
// Core library for managing DNS records through pluggable providers.
//
// ## Architecture Overview
//
// - **Record**: Provider-agnostic record shape (type, name, value, TTL)
// - **RecordGetter / RecordAppender / RecordSetter / RecordDeleter**: The record
//   lifecycle, scoped to a zone
// - **BatchReport**: Per-record outcome of a batch (applied, skipped, failed)
// - **ProviderRegistry**: Plugin-based registry for record store providers
//
// ## Batch Semantics
//
// Batches are best-effort: one record failing does not stop the others.
// The plain operations return only the records that were applied; the
// `*_detailed` operations return a `BatchReport` explaining every record
// that was left out.

pub mod error;
pub mod outcome;
pub mod record;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use error::{Error, Result};
pub use outcome::{BatchReport, RecordOutcome, SkipReason};
pub use record::{Record, RecordType};
pub use registry::{ProviderRegistry, ProviderSpec};
pub use traits::{
    RecordAppender, RecordDeleter, RecordGetter, RecordSetter, RecordStore, RecordStoreFactory,
};
