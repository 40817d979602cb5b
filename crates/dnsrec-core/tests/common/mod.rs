//! Test doubles for record store contract tests

use async_trait::async_trait;
use dnsrec_core::{
    BatchReport, Error, Record, RecordAppender, RecordDeleter, RecordGetter, RecordSetter,
    RecordStore, RecordStoreFactory, RecordType, Result, SkipReason,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A record store that keeps TXT records in memory
///
/// Only TXT is supported so that unsupported-type handling can be observed.
/// Names listed in `reject` fail on every mutation.
#[derive(Default, Clone)]
pub struct MemoryTxtStore {
    records: Arc<Mutex<Vec<Record>>>,
    reject: Arc<Mutex<Vec<String>>>,
    detailed_calls: Arc<AtomicUsize>,
}

impl MemoryTxtStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every mutation of `name` fail
    pub fn reject(&self, name: &str) {
        self.reject.lock().unwrap().push(name.to_string());
    }

    /// Number of `*_detailed` calls made so far
    pub fn detailed_calls(&self) -> usize {
        self.detailed_calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    fn check(&self, record: &Record) -> std::result::Result<(), SkipOrFail> {
        if record.record_type != RecordType::Txt {
            return Err(SkipOrFail::Skip(SkipReason::UnsupportedType(
                record.record_type.to_string(),
            )));
        }
        if self.reject.lock().unwrap().contains(&record.name) {
            return Err(SkipOrFail::Fail(Error::api(400, None, "rejected")));
        }
        Ok(())
    }
}

enum SkipOrFail {
    Skip(SkipReason),
    Fail(Error),
}

fn note(report: &mut BatchReport, record: &Record, why: SkipOrFail) {
    match why {
        SkipOrFail::Skip(reason) => report.skipped(record, reason),
        SkipOrFail::Fail(err) => report.failed(record, err),
    }
}

#[async_trait]
impl RecordGetter for MemoryTxtStore {
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.name == zone)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RecordAppender for MemoryTxtStore {
    async fn append_records_detailed(&self, _zone: &str, records: &[Record]) -> Result<BatchReport> {
        self.detailed_calls.fetch_add(1, Ordering::SeqCst);
        let mut report = BatchReport::with_capacity(records.len());
        for record in records {
            match self.check(record) {
                Ok(()) => {
                    self.records.lock().unwrap().push(record.clone());
                    report.applied(record.clone());
                }
                Err(why) => note(&mut report, record, why),
            }
        }
        Ok(report)
    }
}

#[async_trait]
impl RecordSetter for MemoryTxtStore {
    async fn set_records_detailed(&self, _zone: &str, records: &[Record]) -> Result<BatchReport> {
        self.detailed_calls.fetch_add(1, Ordering::SeqCst);
        let mut report = BatchReport::with_capacity(records.len());
        for record in records {
            if let Err(why) = self.check(record) {
                note(&mut report, record, why);
                continue;
            }
            let mut stored = self.records.lock().unwrap();
            match stored.iter_mut().find(|r| r.name == record.name) {
                Some(existing) => existing.value = record.value.clone(),
                None => stored.push(record.clone()),
            }
            report.applied(record.clone());
        }
        Ok(report)
    }
}

#[async_trait]
impl RecordDeleter for MemoryTxtStore {
    async fn delete_records_detailed(&self, _zone: &str, records: &[Record]) -> Result<BatchReport> {
        self.detailed_calls.fetch_add(1, Ordering::SeqCst);
        let mut report = BatchReport::with_capacity(records.len());
        for record in records {
            if let Err(why) = self.check(record) {
                note(&mut report, record, why);
                continue;
            }
            let mut stored = self.records.lock().unwrap();
            match stored.iter().position(|r| r.name == record.name) {
                Some(idx) => report.applied(stored.remove(idx)),
                None => report.skipped(record, SkipReason::NotFound),
            }
        }
        Ok(report)
    }
}

impl RecordStore for MemoryTxtStore {
    fn provider_name(&self) -> &'static str {
        "memory-txt"
    }
}

/// Factory handing out a shared MemoryTxtStore
pub struct MemoryTxtFactory {
    pub store: MemoryTxtStore,
}

impl RecordStoreFactory for MemoryTxtFactory {
    fn create(&self, config: &serde_json::Value) -> Result<Box<dyn RecordStore>> {
        if config.get("fail").and_then(|v| v.as_bool()).unwrap_or(false) {
            return Err(Error::config("fail requested"));
        }
        Ok(Box::new(self.store.clone()))
    }
}
