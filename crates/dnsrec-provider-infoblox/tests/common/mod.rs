//! Test doubles for Infoblox provider contract tests
//!
//! `MemoryGrid` stands in for the appliance: it hands out object managers
//! that read and write a shared in-memory record table, and lets a test
//! make individual calls fail.

#![allow(dead_code)]

use async_trait::async_trait;
use dnsrec_core::{Error, Result};
use dnsrec_provider_infoblox::wapi::{
    EaValue, ExtensibleAttributes, ObjectManager, ObjectManagerFactory, RecordCname, RecordKind,
    RecordParams, RecordTxt, VendorRecord,
};
use dnsrec_provider_infoblox::{InfobloxConfig, InfobloxProvider};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct GridState {
    records: Vec<VendorRecord>,
    next_ref: usize,
    sessions: usize,
    unavailable: bool,
    failing_query: Option<RecordKind>,
    failing_create: HashSet<String>,
    failing_lookup: HashSet<String>,
    failing_update: HashSet<String>,
    failing_delete: HashSet<String>,
}

/// Shared in-memory record table plus failure switches
#[derive(Default, Clone)]
pub struct MemoryGrid {
    state: Arc<Mutex<GridState>>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider wired to this grid
    pub fn provider(&self) -> InfobloxProvider {
        InfobloxProvider::with_object_managers(
            InfobloxConfig::new("gridmaster.example.com", "2.12", "admin", "s3cret"),
            Arc::new(self.clone()),
        )
    }

    /// Store a record directly, bypassing the provider
    pub fn seed(
        &self,
        kind: RecordKind,
        name: &str,
        value: &str,
        ttl: Option<u32>,
        comment: Option<&str>,
    ) -> String {
        let params = RecordParams {
            view: "default".to_string(),
            name: name.to_string(),
            value: value.to_string(),
            use_ttl: ttl.is_some(),
            ttl,
            comment: comment.map(str::to_string),
            ea: ExtensibleAttributes::new(),
        };
        let mut state = self.state.lock().unwrap();
        let record = new_record(&mut state, kind, &params);
        let reference = record.reference().to_string();
        state.records.push(record);
        reference
    }

    /// Attach an extensible attribute to the record at `reference`
    pub fn tag(&self, reference: &str, key: &str, value: &str) {
        let mut state = self.state.lock().unwrap();
        let record = state
            .records
            .iter_mut()
            .find(|r| r.reference() == reference)
            .expect("seeded record exists");
        let ea = match record {
            VendorRecord::Cname(r) => &mut r.ea,
            VendorRecord::Txt(r) => &mut r.ea,
        };
        ea.insert(key.to_string(), EaValue::new(value));
    }

    pub fn records(&self) -> Vec<VendorRecord> {
        self.state.lock().unwrap().records.clone()
    }

    pub fn records_named(&self, kind: RecordKind, name: &str) -> Vec<VendorRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.kind() == kind && r.name() == name)
            .collect()
    }

    /// Number of object managers handed out so far
    pub fn sessions(&self) -> usize {
        self.state.lock().unwrap().sessions
    }

    /// Make session setup fail
    pub fn go_offline(&self) {
        self.state.lock().unwrap().unavailable = true;
    }

    pub fn fail_query(&self, kind: RecordKind) {
        self.state.lock().unwrap().failing_query = Some(kind);
    }

    pub fn fail_create(&self, name: &str) {
        self.state.lock().unwrap().failing_create.insert(name.to_string());
    }

    pub fn fail_lookup(&self, name: &str) {
        self.state.lock().unwrap().failing_lookup.insert(name.to_string());
    }

    pub fn fail_update(&self, name: &str) {
        self.state.lock().unwrap().failing_update.insert(name.to_string());
    }

    pub fn fail_delete(&self, name: &str) {
        self.state.lock().unwrap().failing_delete.insert(name.to_string());
    }
}

#[async_trait]
impl ObjectManagerFactory for MemoryGrid {
    async fn object_manager(&self) -> Result<Box<dyn ObjectManager>> {
        let mut state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(Error::http("connection refused"));
        }
        state.sessions += 1;
        Ok(Box::new(MemoryObjectManager {
            state: Arc::clone(&self.state),
        }))
    }
}

struct MemoryObjectManager {
    state: Arc<Mutex<GridState>>,
}

fn new_record(state: &mut GridState, kind: RecordKind, params: &RecordParams) -> VendorRecord {
    state.next_ref += 1;
    let reference = format!(
        "{}/ZG5zLm{:04}:{}/{}",
        kind.object_type(),
        state.next_ref,
        params.name,
        params.view
    );
    match kind {
        RecordKind::Cname => VendorRecord::Cname(RecordCname {
            reference,
            name: params.name.clone(),
            canonical: params.value.clone(),
            view: params.view.clone(),
            ttl: params.ttl,
            use_ttl: params.use_ttl,
            comment: params.comment.clone(),
            ea: params.ea.clone(),
        }),
        RecordKind::Txt => VendorRecord::Txt(RecordTxt {
            reference,
            name: params.name.clone(),
            text: params.value.clone(),
            view: params.view.clone(),
            ttl: params.ttl,
            use_ttl: params.use_ttl,
            comment: params.comment.clone(),
            ea: params.ea.clone(),
        }),
    }
}

fn rejected(what: &str, name: &str) -> Error {
    Error::api(
        400,
        Some("Client.Ibap.Proto".to_string()),
        format!("{what} rejected for {name}"),
    )
}

#[async_trait]
impl ObjectManager for MemoryObjectManager {
    async fn query_records(&self, kind: RecordKind, name: &str) -> Result<Vec<VendorRecord>> {
        let state = self.state.lock().unwrap();
        if state.failing_query == Some(kind) {
            return Err(Error::api(500, None, "internal error"));
        }
        Ok(state
            .records
            .iter()
            .filter(|r| r.kind() == kind && r.name() == name)
            .cloned()
            .collect())
    }

    async fn create_record(&self, kind: RecordKind, params: &RecordParams) -> Result<VendorRecord> {
        let mut state = self.state.lock().unwrap();
        if state.failing_create.contains(&params.name) {
            return Err(rejected("create", &params.name));
        }
        let record = new_record(&mut state, kind, params);
        state.records.push(record.clone());
        Ok(record)
    }

    async fn get_record(&self, kind: RecordKind, view: &str, name: &str) -> Result<VendorRecord> {
        let state = self.state.lock().unwrap();
        if state.failing_lookup.contains(name) {
            return Err(Error::api(500, None, "lookup failed"));
        }
        state
            .records
            .iter()
            .find(|r| r.kind() == kind && r.view() == view && r.name() == name)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("{kind} record {name} in view {view}")))
    }

    async fn update_record(
        &self,
        _kind: RecordKind,
        reference: &str,
        params: &RecordParams,
    ) -> Result<VendorRecord> {
        let mut state = self.state.lock().unwrap();
        if state.failing_update.contains(&params.name) {
            return Err(rejected("update", &params.name));
        }
        let record = state
            .records
            .iter_mut()
            .find(|r| r.reference() == reference)
            .ok_or_else(|| Error::not_found(reference.to_string()))?;

        match &mut *record {
            VendorRecord::Cname(r) => {
                r.name = params.name.clone();
                r.canonical = params.value.clone();
                r.use_ttl = params.use_ttl;
                r.ttl = params.ttl;
                r.comment = params.comment.clone();
                r.ea = params.ea.clone();
            }
            VendorRecord::Txt(r) => {
                r.name = params.name.clone();
                r.text = params.value.clone();
                r.use_ttl = params.use_ttl;
                r.ttl = params.ttl;
                r.comment = params.comment.clone();
                r.ea = params.ea.clone();
            }
        }
        Ok(record.clone())
    }

    async fn delete_record(&self, _kind: RecordKind, reference: &str) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        let index = state
            .records
            .iter()
            .position(|r| r.reference() == reference)
            .ok_or_else(|| Error::not_found(reference.to_string()))?;
        let name = state.records[index].name().to_string();
        if state.failing_delete.contains(&name) {
            return Err(rejected("delete", &name));
        }
        state.records.remove(index);
        Ok(reference.to_string())
    }
}
