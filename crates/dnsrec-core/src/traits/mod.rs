//! Core traits for the dnsrec system
//!
//! This module defines the abstract interfaces that all providers implement.
//!
//! - [`RecordGetter`], [`RecordAppender`], [`RecordSetter`], [`RecordDeleter`]: record lifecycle
//! - [`RecordStore`]: all four together
//! - [`RecordStoreFactory`]: construction from configuration

pub mod record_store;

pub use record_store::{
    RecordAppender, RecordDeleter, RecordGetter, RecordSetter, RecordStore, RecordStoreFactory,
};
