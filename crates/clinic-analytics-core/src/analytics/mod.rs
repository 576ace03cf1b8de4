//! Analytics aggregation pipeline.
//!
//! Pipeline: Record Store → Filter Predicate → Aggregators → Snapshot
//!
//! Every stage is a pure function of the store and the criteria. The store is
//! never mutated, so running the pipeline twice yields identical snapshots.

mod breakdown;
mod comparison;
mod filter;
mod summary;
mod trend;

pub use breakdown::*;
pub use comparison::*;
pub use filter::*;
pub use summary::*;
pub use trend::*;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::AnalyticsConfig;
use crate::models::FilterCriteria;
use crate::store::RecordStore;

/// Every derived view-model for one (store, criteria) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub filters: FilterCriteria,
    pub disease_breakdown: Vec<DiseaseBreakdownEntry>,
    pub monthly_trend: Vec<MonthlyTrendPoint>,
    pub comparison: ComparisonResult,
    pub summary: VisitSummary,
}

impl AnalyticsSnapshot {
    /// The highest-volume entry, or `None` when nothing matched.
    pub fn top_disease(&self) -> Option<&DiseaseBreakdownEntry> {
        self.disease_breakdown.first()
    }

    /// The first `n` breakdown entries.
    pub fn top_diseases(&self, n: usize) -> &[DiseaseBreakdownEntry] {
        &self.disease_breakdown[..n.min(self.disease_breakdown.len())]
    }

    /// Hex SHA-256 over the canonical JSON of the snapshot.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let canonical = serde_json::to_string(self)?;
        Ok(hex::encode(Sha256::digest(canonical.as_bytes())))
    }
}

/// Runs the full pipeline against a borrowed store.
pub struct Analytics<'a> {
    store: &'a RecordStore,
    config: &'a AnalyticsConfig,
}

impl<'a> Analytics<'a> {
    pub fn new(store: &'a RecordStore, config: &'a AnalyticsConfig) -> Self {
        Self { store, config }
    }

    /// Filter the store and derive every view-model.
    ///
    /// `compare_disease` falls back to the configured default.
    pub fn analyze(
        &self,
        criteria: &FilterCriteria,
        compare_disease: Option<&str>,
    ) -> AnalyticsSnapshot {
        let axis = self.store.months();
        let filtered = filter_records(self.store, criteria);

        let disease_breakdown = disease_breakdown(&filtered);
        let monthly_trend = monthly_trend(&axis, &filtered, &criteria.disease);
        let target = compare_disease.unwrap_or(&self.config.default_compare_disease);
        let comparison = compare_latest_months(&axis, &filtered, target);
        let summary = summarize(self.store, &filtered, &disease_breakdown);

        tracing::debug!(
            filtered = filtered.len(),
            diseases = disease_breakdown.len(),
            months = axis.len(),
            compare = target,
            "Analytics snapshot computed"
        );

        AnalyticsSnapshot {
            filters: criteria.clone(),
            disease_breakdown,
            monthly_trend,
            comparison,
            summary,
        }
    }

    pub fn store(&self) -> &RecordStore {
        self.store
    }

    pub fn config(&self) -> &AnalyticsConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    #[test]
    fn test_analyze_seed_defaults() {
        let store = RecordStore::seed();
        let config = AnalyticsConfig::default();
        let snapshot = Analytics::new(&store, &config).analyze(&FilterCriteria::all(), None);

        assert_eq!(snapshot.comparison.target_disease, "Fever");
        assert_eq!(snapshot.monthly_trend.len(), 5);
        assert_eq!(snapshot.top_disease().map(|e| e.total), Some(4));
        assert_eq!(snapshot.top_diseases(config.top_disease_count).len(), 4);
        assert_eq!(snapshot.top_diseases(99).len(), 5);
    }

    #[test]
    fn test_analyze_explicit_compare_disease() {
        let store = RecordStore::seed();
        let config = AnalyticsConfig::default();
        let snapshot =
            Analytics::new(&store, &config).analyze(&FilterCriteria::all(), Some("Hypertension"));

        assert_eq!(snapshot.comparison.target_disease, "Hypertension");
        assert_eq!(snapshot.comparison.latest_count, 1);
        assert_eq!(snapshot.comparison.previous_count, 0);
        assert_eq!(snapshot.comparison.percentage_change, 100);
    }

    #[test]
    fn test_fingerprint_stable_and_sensitive() {
        let store = RecordStore::seed();
        let config = AnalyticsConfig::default();
        let analytics = Analytics::new(&store, &config);

        let a = analytics.analyze(&FilterCriteria::all(), None).fingerprint().unwrap();
        let b = analytics.analyze(&FilterCriteria::all(), None).fingerprint().unwrap();
        let c = analytics
            .analyze(&FilterCriteria::all().with_gender(Gender::Female), None)
            .fingerprint()
            .unwrap();

        assert_eq!(a.len(), 64);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
