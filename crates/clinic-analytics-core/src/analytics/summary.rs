//! Scalar counts and ratios over the filtered set.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::comparison::round_half_up;
use super::DiseaseBreakdownEntry;
use crate::models::{Gender, VisitRecord, VisitSource};
use crate::store::RecordStore;

/// `value` as a rounded percentage of `total`; 0 when `total` is 0.
pub fn to_percentage(value: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    round_half_up(value as f64 / total as f64 * 100.0) as u32
}

/// Headline numbers for the filtered visits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisitSummary {
    pub filtered_visits: usize,
    pub store_visits: usize,
    /// Filtered visits as a percentage of the whole store
    pub share_of_store: u32,
    pub male: usize,
    pub female: usize,
    pub clinic: usize,
    pub outside: usize,
    pub unique_diseases: usize,
    pub active_families: usize,
    pub all_families: usize,
    pub family_coverage: u32,
    /// Mean recurrence, 0 for an empty set
    pub average_recurrence: f64,
    pub top_disease: Option<TopDiseaseSummary>,
}

impl VisitSummary {
    /// Percentage of male visits among gendered visits.
    pub fn male_share(&self) -> u32 {
        to_percentage(self.male, self.male + self.female)
    }

    /// Percentage of clinic-sourced visits.
    pub fn clinic_share(&self) -> u32 {
        to_percentage(self.clinic, (self.clinic + self.outside).max(1))
    }
}

/// The highest-volume disease with its source split.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TopDiseaseSummary {
    pub disease: String,
    pub total: u32,
    pub clinic: usize,
    pub outside: usize,
}

fn count_where(records: &[&VisitRecord], pred: impl Fn(&VisitRecord) -> bool) -> usize {
    records.iter().filter(|&&r| pred(r)).count()
}

/// Fold the filtered records into a [`VisitSummary`].
pub fn summarize(
    store: &RecordStore,
    records: &[&VisitRecord],
    breakdown: &[DiseaseBreakdownEntry],
) -> VisitSummary {
    let unique_diseases = records
        .iter()
        .map(|r| r.disease.as_str())
        .collect::<HashSet<_>>()
        .len();
    let active_families = records
        .iter()
        .map(|r| r.family.as_str())
        .collect::<HashSet<_>>()
        .len();
    let all_families = store.families().len();

    let average_recurrence = if records.is_empty() {
        0.0
    } else {
        let sum: u64 = records.iter().map(|r| u64::from(r.recurrence)).sum();
        sum as f64 / records.len() as f64
    };

    let top_disease = breakdown.first().map(|top| TopDiseaseSummary {
        disease: top.disease.clone(),
        total: top.total,
        clinic: count_where(records, |r| {
            r.disease == top.disease && r.source == VisitSource::Clinic
        }),
        outside: count_where(records, |r| {
            r.disease == top.disease && r.source == VisitSource::Outside
        }),
    });

    VisitSummary {
        filtered_visits: records.len(),
        store_visits: store.len(),
        share_of_store: to_percentage(records.len(), store.len()),
        male: count_where(records, |r| r.gender == Gender::Male),
        female: count_where(records, |r| r.gender == Gender::Female),
        clinic: count_where(records, |r| r.source == VisitSource::Clinic),
        outside: count_where(records, |r| r.source == VisitSource::Outside),
        unique_diseases,
        active_families,
        all_families,
        family_coverage: to_percentage(active_families, all_families),
        average_recurrence,
        top_disease,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{disease_breakdown, filter_records};
    use crate::models::FilterCriteria;

    #[test]
    fn test_to_percentage() {
        assert_eq!(to_percentage(0, 0), 0);
        assert_eq!(to_percentage(1, 3), 33);
        assert_eq!(to_percentage(1, 2), 50);
        assert_eq!(to_percentage(12, 12), 100);
    }

    #[test]
    fn test_seed_summary() {
        let store = RecordStore::seed();
        let filtered = filter_records(&store, &FilterCriteria::all());
        let breakdown = disease_breakdown(&filtered);
        let summary = summarize(&store, &filtered, &breakdown);

        assert_eq!(summary.filtered_visits, 12);
        assert_eq!(summary.share_of_store, 100);
        assert_eq!(summary.male, 7);
        assert_eq!(summary.female, 5);
        assert_eq!(summary.clinic, 8);
        assert_eq!(summary.outside, 4);
        assert_eq!(summary.unique_diseases, 5);
        assert_eq!(summary.active_families, 8);
        assert_eq!(summary.family_coverage, 100);
        assert!((summary.average_recurrence - 1.75).abs() < 1e-9);
        assert_eq!(summary.male_share(), 58);
        assert_eq!(summary.clinic_share(), 67);

        let top = summary.top_disease.unwrap();
        assert_eq!(top.disease, "Fever");
        assert_eq!(top.total, 4);
        assert_eq!(top.clinic, 2);
        assert_eq!(top.outside, 2);
    }

    #[test]
    fn test_empty_summary() {
        let store = RecordStore::seed();
        let filtered = filter_records(&store, &FilterCriteria::all().with_search("nobody"));
        let breakdown = disease_breakdown(&filtered);
        let summary = summarize(&store, &filtered, &breakdown);

        assert_eq!(summary.filtered_visits, 0);
        assert_eq!(summary.share_of_store, 0);
        assert_eq!(summary.average_recurrence, 0.0);
        assert_eq!(summary.family_coverage, 0);
        assert_eq!(summary.clinic_share(), 0);
        assert!(summary.top_disease.is_none());
    }
}
