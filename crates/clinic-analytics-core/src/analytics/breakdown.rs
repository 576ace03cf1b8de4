//! Per-disease breakdown.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Gender, VisitRecord};

/// Rollup of the filtered visits for one disease.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiseaseBreakdownEntry {
    pub disease: String,
    pub total: u32,
    pub male: u32,
    pub female: u32,
    /// Ages in record iteration order; `ages.len() == total`
    pub ages: Vec<u32>,
}

impl DiseaseBreakdownEntry {
    fn empty(disease: &str) -> Self {
        Self {
            disease: disease.to_string(),
            total: 0,
            male: 0,
            female: 0,
            ages: Vec::new(),
        }
    }

    fn add(&mut self, record: &VisitRecord) {
        self.total += 1;
        self.ages.push(record.age);
        match record.gender {
            Gender::Male => self.male += 1,
            Gender::Female => self.female += 1,
        }
    }

    /// Mean age rounded half-up, 0 when there are no ages.
    pub fn average_age(&self) -> u32 {
        if self.ages.is_empty() {
            return 0;
        }
        let sum: u64 = self.ages.iter().map(|&a| u64::from(a)).sum();
        let mean = sum as f64 / self.ages.len() as f64;
        (mean + 0.5).floor() as u32
    }
}

/// Group records by disease, highest total first.
///
/// Ties keep first-seen order: the sort is stable and has no secondary key.
pub fn disease_breakdown(records: &[&VisitRecord]) -> Vec<DiseaseBreakdownEntry> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<DiseaseBreakdownEntry> = Vec::new();

    for record in records {
        let slot = *index.entry(record.disease.as_str()).or_insert_with(|| {
            entries.push(DiseaseBreakdownEntry::empty(&record.disease));
            entries.len() - 1
        });
        entries[slot].add(record);
    }

    entries.sort_by(|a, b| b.total.cmp(&a.total));
    entries
}
