//! Immutable in-memory record store.

use std::collections::HashSet;

use crate::models::{ModelError, ModelResult, MonthKey, VisitRecord};
use crate::seed;

/// A validated, immutable snapshot of visit records.
///
/// Records keep their insertion order; every aggregation iterates in that order.
/// "Adding" a record produces a new snapshot via [`RecordStore::with_visit`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordStore {
    records: Vec<VisitRecord>,
}

impl RecordStore {
    /// Build a store, rejecting duplicate ids and invalid records.
    pub fn new(records: Vec<VisitRecord>) -> ModelResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record.validate()?;
            if !seen.insert(record.id.as_str()) {
                return Err(ModelError::DuplicateId(record.id.clone()));
            }
        }
        tracing::debug!(records = records.len(), "Record store created");
        Ok(Self { records })
    }

    /// Parse a JSON array of visit records.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let records: Vec<VisitRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// The built-in demo dataset.
    pub fn seed() -> Self {
        Self {
            records: seed::seed_records(),
        }
    }

    /// A new store with `record` appended. `self` is left untouched.
    pub fn with_visit(&self, record: VisitRecord) -> ModelResult<Self> {
        let mut records = self.records.clone();
        records.push(record);
        Self::new(records)
    }

    pub fn records(&self) -> &[VisitRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&VisitRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Distinct months across the whole store, ascending.
    pub fn months(&self) -> Vec<MonthKey> {
        let mut months: Vec<MonthKey> = self.records.iter().map(|r| r.month.clone()).collect();
        months.sort();
        months.dedup();
        months
    }

    /// Distinct family names in first-seen order.
    pub fn families(&self) -> Vec<String> {
        distinct_in_order(self.records.iter().map(|r| r.family.as_str()))
    }

    /// Distinct disease names in first-seen order.
    pub fn diseases(&self) -> Vec<String> {
        distinct_in_order(self.records.iter().map(|r| r.disease.as_str()))
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
