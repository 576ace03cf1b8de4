//! JSON report export.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::ExportResult;
use crate::analytics::{
    AnalyticsSnapshot, ComparisonResult, DiseaseBreakdownEntry, MonthlyTrendPoint,
};
use crate::models::FilterCriteria;

/// The downloadable analytics report: one flat JSON object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    /// ISO-8601 UTC timestamp
    pub generated_at: String,
    pub filters: FilterCriteria,
    pub disease_breakdown: Vec<DiseaseBreakdownEntry>,
    pub monthly_trend: Vec<MonthlyTrendPoint>,
    pub comparison: ComparisonResult,
}

impl AnalyticsReport {
    /// Build a report stamped with the current time.
    pub fn from_snapshot(snapshot: &AnalyticsSnapshot) -> Self {
        Self::from_snapshot_at(snapshot, Utc::now())
    }

    /// Build a report stamped with `generated_at`.
    pub fn from_snapshot_at(snapshot: &AnalyticsSnapshot, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            filters: snapshot.filters.clone(),
            disease_breakdown: snapshot.disease_breakdown.clone(),
            monthly_trend: snapshot.monthly_trend.clone(),
            comparison: snapshot.comparison.clone(),
        }
    }

    /// Export to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the JSON report to `path`, replacing any existing file.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> ExportResult<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        tracing::info!(
            path = %path.display(),
            diseases = self.disease_breakdown.len(),
            "Analytics report written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::Analytics;
    use crate::config::AnalyticsConfig;
    use crate::store::RecordStore;
    use chrono::TimeZone;

    fn make_snapshot() -> AnalyticsSnapshot {
        let store = RecordStore::seed();
        let config = AnalyticsConfig::default();
        Analytics::new(&store, &config).analyze(&FilterCriteria::all().with_family("Silva"), None)
    }

    #[test]
    fn test_report_fields() {
        let at = Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap();
        let report = AnalyticsReport::from_snapshot_at(&make_snapshot(), at);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 5);
        assert_eq!(json["generatedAt"], "2024-07-01T09:30:00.000Z");
        assert_eq!(json["filters"]["family"], "Silva");
        assert_eq!(json["filters"]["gender"], "all");
        assert_eq!(json["diseaseBreakdown"][0]["disease"], "Fever");
        assert_eq!(json["diseaseBreakdown"][0]["ages"][0], 29);
        assert_eq!(json["monthlyTrend"].as_array().unwrap().len(), 5);
        assert_eq!(json["comparison"]["latestMonth"], "2024-06");
    }

    #[test]
    fn test_report_round_trips() {
        let report = AnalyticsReport::from_snapshot(&make_snapshot());
        let parsed: AnalyticsReport = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(AnalyticsConfig::default().export_file_name);

        let report = AnalyticsReport::from_snapshot(&make_snapshot());
        report.write_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, report.to_json().unwrap());
    }

    #[test]
    fn test_write_to_missing_dir() {
        let report = AnalyticsReport::from_snapshot(&make_snapshot());
        assert!(report.write_to("/nonexistent/dir/report.json").is_err());
    }
}
