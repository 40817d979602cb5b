//! Per-record outcomes of a batch operation
//!
//! Record stores process batches best-effort: a record that cannot be
//! applied is left out of the returned list and the batch continues.
//! [`BatchReport`] keeps the reason for every record that was left out so
//! callers that need it can tell "already absent" from "failed".

use crate::record::Record;
use std::fmt;

/// Why a record was left out without an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The provider does not handle this record type
    UnsupportedType(String),
    /// No existing record matched (delete of an absent record)
    NotFound,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedType(t) => write!(f, "unsupported record type {t}"),
            SkipReason::NotFound => f.write_str("record not found"),
        }
    }
}

/// Outcome for a single input record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The operation succeeded; carries the record as stored by the provider
    Applied(Record),
    /// The record was intentionally left alone
    Skipped {
        /// The input record
        record: Record,
        /// Why it was skipped
        reason: SkipReason,
    },
    /// The provider rejected or failed the operation for this record
    Failed {
        /// The input record
        record: Record,
        /// Rendered error from the provider
        error: String,
    },
}

impl RecordOutcome {
    /// Whether the record was applied
    pub fn is_applied(&self) -> bool {
        matches!(self, RecordOutcome::Applied(_))
    }
}

/// Ordered outcomes of one batch, one entry per input record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty report with room for `n` outcomes
    pub fn with_capacity(n: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(n),
        }
    }

    /// Append an outcome
    pub fn push(&mut self, outcome: RecordOutcome) {
        self.outcomes.push(outcome);
    }

    /// Record a success
    pub fn applied(&mut self, record: Record) {
        self.push(RecordOutcome::Applied(record));
    }

    /// Record a skip
    pub fn skipped(&mut self, record: &Record, reason: SkipReason) {
        self.push(RecordOutcome::Skipped {
            record: record.clone(),
            reason,
        });
    }

    /// Record a failure
    pub fn failed(&mut self, record: &Record, error: impl fmt::Display) {
        self.push(RecordOutcome::Failed {
            record: record.clone(),
            error: error.to_string(),
        });
    }

    /// All outcomes in input order
    pub fn outcomes(&self) -> &[RecordOutcome] {
        &self.outcomes
    }

    /// Records that were applied, in input order
    pub fn applied_records(&self) -> impl Iterator<Item = &Record> {
        self.outcomes.iter().filter_map(|o| match o {
            RecordOutcome::Applied(record) => Some(record),
            _ => None,
        })
    }

    /// Consume the report, keeping only the applied records
    pub fn into_records(self) -> Vec<Record> {
        self.outcomes
            .into_iter()
            .filter_map(|o| match o {
                RecordOutcome::Applied(record) => Some(record),
                _ => None,
            })
            .collect()
    }

    /// Number of applied records
    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    /// Number of skipped records
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::Skipped { .. }))
            .count()
    }

    /// Number of failed records
    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::Failed { .. }))
            .count()
    }

    /// True when every input record was applied
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(RecordOutcome::is_applied)
    }

    /// Number of outcomes
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True when the batch was empty
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
