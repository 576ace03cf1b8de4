//! Clinic-Analytics Core Library
//!
//! Pure, in-memory analytics over clinic visit records.
//!
//! # Architecture
//!
//! ```text
//!   Record Store (immutable snapshot)
//!          │
//!          ▼
//!   Filter Predicate ◄── FilterCriteria (search, gender, month, family, disease)
//!          │
//!          ├──────────────┬───────────────┬──────────────┐
//!          ▼              ▼               ▼              ▼
//!     Per-disease     Monthly trend   Latest-vs-prev   Scalar
//!     breakdown       (full axis)     comparison       summary
//!          │              │               │              │
//!          └──────────────┴───────┬───────┴──────────────┘
//!                                 ▼
//!                        AnalyticsSnapshot ──► JSON report / sparkline
//! ```
//!
//! # Core Principle
//!
//! **The store is never mutated.** Adding a visit produces a new store; every
//! aggregation is a pure function of (store, criteria).
//!
//! # Modules
//!
//! - [`models`]: Domain types (VisitRecord, MonthKey, FilterCriteria)
//! - [`store`]: Validated immutable record store and seed data
//! - [`analytics`]: Filter predicate and aggregators
//! - [`chart`]: Sparkline geometry for the trend series
//! - [`export`]: JSON report export
//! - [`config`]: Pipeline configuration

pub mod analytics;
pub mod chart;
pub mod config;
pub mod export;
pub mod models;
mod seed;
pub mod store;

// Re-export commonly used types
pub use analytics::{
    Analytics, AnalyticsSnapshot, ComparisonResult, DiseaseBreakdownEntry, MonthlyTrendPoint,
    VisitSummary,
};
pub use chart::Sparkline;
pub use config::AnalyticsConfig;
pub use export::AnalyticsReport;
pub use models::{FilterCriteria, Gender, MonthKey, Selection, VisitRecord, VisitSource};
pub use store::RecordStore;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicAnalyticsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<models::ModelError> for ClinicAnalyticsError {
    fn from(e: models::ModelError) -> Self {
        match e {
            models::ModelError::Json(e) => ClinicAnalyticsError::SerializationError(e.to_string()),
            other => ClinicAnalyticsError::InvalidInput(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClinicAnalyticsError {
    fn from(e: serde_json::Error) -> Self {
        ClinicAnalyticsError::SerializationError(e.to_string())
    }
}

impl From<export::ExportError> for ClinicAnalyticsError {
    fn from(e: export::ExportError) -> Self {
        match e {
            export::ExportError::Json(e) => e.into(),
            export::ExportError::Io(e) => ClinicAnalyticsError::IoError(e.to_string()),
        }
    }
}

impl From<config::ConfigError> for ClinicAnalyticsError {
    fn from(e: config::ConfigError) -> Self {
        match e {
            config::ConfigError::Io(e) => ClinicAnalyticsError::IoError(e.to_string()),
            config::ConfigError::Json(e) => e.into(),
            config::ConfigError::Invalid(msg) => ClinicAnalyticsError::InvalidInput(msg),
        }
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Install the global `tracing` subscriber. Later calls are ignored.
///
/// `RUST_LOG` wins over `filter`, which wins over the default filter.
#[uniffi::export]
pub fn init_logging(filter: Option<String>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(filter.as_deref().unwrap_or(config::default_log_filter()))
    });
    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok() {
        tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    }
}

/// Open the built-in demo dataset with default configuration.
#[uniffi::export]
pub fn open_seed_store() -> Arc<ClinicAnalyticsCore> {
    Arc::new(ClinicAnalyticsCore {
        store: RecordStore::seed(),
        config: AnalyticsConfig::default(),
    })
}

/// Open a store from a JSON array of visit records.
///
/// `config_json` of `None` uses the default configuration.
#[uniffi::export]
pub fn open_store_from_json(
    records_json: String,
    config_json: Option<String>,
) -> Result<Arc<ClinicAnalyticsCore>, ClinicAnalyticsError> {
    let store = RecordStore::from_json(&records_json)?;
    let config = match config_json {
        Some(json) => AnalyticsConfig::from_json(&json)?,
        None => AnalyticsConfig::default(),
    };
    tracing::info!(records = store.len(), "Opened record store");
    Ok(Arc::new(ClinicAnalyticsCore { store, config }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// An immutable store plus configuration, shared with the host application.
#[derive(uniffi::Object)]
pub struct ClinicAnalyticsCore {
    store: RecordStore,
    config: AnalyticsConfig,
}

impl ClinicAnalyticsCore {
    fn snapshot(
        &self,
        filters: FfiFilterCriteria,
        compare_disease: Option<String>,
    ) -> Result<AnalyticsSnapshot, ClinicAnalyticsError> {
        let criteria = FilterCriteria::try_from(filters)?;
        let analytics = Analytics::new(&self.store, &self.config);
        Ok(analytics.analyze(&criteria, compare_disease.as_deref()))
    }
}

#[uniffi::export]
impl ClinicAnalyticsCore {
    // =========================================================================
    // Analytics Operations
    // =========================================================================

    /// Run the pipeline for the given filters.
    pub fn analyze(
        &self,
        filters: FfiFilterCriteria,
        compare_disease: Option<String>,
    ) -> Result<FfiAnalyticsSnapshot, ClinicAnalyticsError> {
        let snapshot = self.snapshot(filters, compare_disease)?;
        let sparkline = Sparkline::from_trend(&snapshot.monthly_trend, &self.config.sparkline);
        Ok(FfiAnalyticsSnapshot::new(snapshot, sparkline, self.config.top_disease_count))
    }

    /// Export the report for the given filters as pretty JSON.
    pub fn export_report_json(
        &self,
        filters: FfiFilterCriteria,
        compare_disease: Option<String>,
    ) -> Result<String, ClinicAnalyticsError> {
        let snapshot = self.snapshot(filters, compare_disease)?;
        Ok(AnalyticsReport::from_snapshot(&snapshot).to_json()?)
    }

    /// Write the report into `directory` under the configured file name.
    pub fn export_report_file(
        &self,
        filters: FfiFilterCriteria,
        compare_disease: Option<String>,
        directory: String,
    ) -> Result<String, ClinicAnalyticsError> {
        let snapshot = self.snapshot(filters, compare_disease)?;
        let path = std::path::Path::new(&directory).join(&self.config.export_file_name);
        AnalyticsReport::from_snapshot(&snapshot).write_to(&path)?;
        Ok(path.display().to_string())
    }

    // =========================================================================
    // Filter Options
    // =========================================================================

    /// Distinct months, ascending, as `YYYY-MM`.
    pub fn month_options(&self) -> Vec<FfiMonthOption> {
        self.store
            .months()
            .into_iter()
            .map(|month| FfiMonthOption {
                label: month.label(),
                key: month.into(),
            })
            .collect()
    }

    /// Distinct families in first-seen order.
    pub fn family_options(&self) -> Vec<String> {
        self.store.families()
    }

    /// Distinct diseases in first-seen order.
    pub fn disease_options(&self) -> Vec<String> {
        self.store.diseases()
    }

    pub fn record_count(&self) -> u32 {
        self.store.len() as u32
    }

    /// Configured `tracing` filter, for passing to [`init_logging`].
    pub fn log_filter(&self) -> String {
        self.config.log_filter.clone()
    }

    // =========================================================================
    // Snapshot Updates
    // =========================================================================

    /// Return a new core with the visit appended. `self` is unchanged.
    pub fn add_visit(
        &self,
        visit: FfiNewVisit,
    ) -> Result<Arc<ClinicAnalyticsCore>, ClinicAnalyticsError> {
        let record = VisitRecord::try_from(visit)?;
        let store = self.store.with_visit(record)?;
        tracing::info!(records = store.len(), "Visit added to new store snapshot");
        Ok(Arc::new(ClinicAnalyticsCore {
            store,
            config: self.config.clone(),
        }))
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe filter criteria. `"all"` (exact, lowercase) lifts a restriction.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFilterCriteria {
    pub search_text: String,
    pub gender: String,
    pub month: String,
    pub family: String,
    pub disease: String,
}

impl Default for FfiFilterCriteria {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            gender: models::ALL.into(),
            month: models::ALL.into(),
            family: models::ALL.into(),
            disease: models::ALL.into(),
        }
    }
}

fn parse_gender(raw: &str) -> Result<Gender, ClinicAnalyticsError> {
    match raw {
        "Male" => Ok(Gender::Male),
        "Female" => Ok(Gender::Female),
        other => Err(ClinicAnalyticsError::InvalidInput(format!(
            "Unknown gender: {other}"
        ))),
    }
}

impl TryFrom<FfiFilterCriteria> for FilterCriteria {
    type Error = ClinicAnalyticsError;

    fn try_from(filters: FfiFilterCriteria) -> Result<Self, Self::Error> {
        let gender = match Selection::parse(filters.gender) {
            Selection::All => Selection::All,
            Selection::Only(raw) => Selection::Only(parse_gender(&raw)?),
        };
        let month = match Selection::parse(filters.month) {
            Selection::All => Selection::All,
            Selection::Only(raw) => Selection::Only(MonthKey::parse(&raw)?),
        };
        Ok(FilterCriteria {
            search_text: filters.search_text,
            gender,
            month,
            family: Selection::parse(filters.family),
            disease: Selection::parse(filters.disease),
        })
    }
}

/// FFI-safe new visit. The id is generated.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewVisit {
    pub disease: String,
    pub patient: String,
    pub gender: String,
    pub age: u32,
    pub family: String,
    pub month: String,
    pub recurrence: u32,
    pub source: String,
}

impl TryFrom<FfiNewVisit> for VisitRecord {
    type Error = ClinicAnalyticsError;

    fn try_from(visit: FfiNewVisit) -> Result<Self, Self::Error> {
        let source = match visit.source.as_str() {
            "Clinic" => VisitSource::Clinic,
            "Outside" => VisitSource::Outside,
            other => {
                return Err(ClinicAnalyticsError::InvalidInput(format!(
                    "Unknown source: {other}"
                )))
            }
        };
        let mut record = VisitRecord::new(
            visit.disease,
            visit.patient,
            parse_gender(&visit.gender)?,
            visit.age,
            visit.family,
            MonthKey::parse(&visit.month)?,
            source,
        );
        record.recurrence = visit.recurrence;
        Ok(record)
    }
}

/// FFI-safe month option for selectors.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMonthOption {
    pub key: String,
    pub label: String,
}

/// FFI-safe breakdown entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBreakdownEntry {
    pub disease: String,
    pub total: u32,
    pub male: u32,
    pub female: u32,
    pub ages: Vec<u32>,
    pub average_age: u32,
}

impl From<DiseaseBreakdownEntry> for FfiBreakdownEntry {
    fn from(entry: DiseaseBreakdownEntry) -> Self {
        Self {
            average_age: entry.average_age(),
            disease: entry.disease,
            total: entry.total,
            male: entry.male,
            female: entry.female,
            ages: entry.ages,
        }
    }
}

/// FFI-safe trend point.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTrendPoint {
    pub month: String,
    pub label: String,
    pub count: u32,
}

impl From<MonthlyTrendPoint> for FfiTrendPoint {
    fn from(point: MonthlyTrendPoint) -> Self {
        Self {
            label: point.month.label(),
            month: point.month.into(),
            count: point.count,
        }
    }
}

/// FFI-safe comparison.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiComparison {
    pub target_disease: String,
    pub latest_month: Option<String>,
    pub previous_month: Option<String>,
    pub latest_count: u32,
    pub previous_count: u32,
    pub delta: i64,
    pub percentage_change: i64,
    /// True when `percentage_change` is the no-baseline sentinel
    pub no_baseline: bool,
}

impl From<ComparisonResult> for FfiComparison {
    fn from(result: ComparisonResult) -> Self {
        Self {
            no_baseline: result.is_sentinel(),
            target_disease: result.target_disease,
            latest_month: result.latest_month.map(String::from),
            previous_month: result.previous_month.map(String::from),
            latest_count: result.latest_count,
            previous_count: result.previous_count,
            delta: result.delta,
            percentage_change: result.percentage_change,
        }
    }
}

/// FFI-safe summary numbers.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVisitSummary {
    pub filtered_visits: u32,
    pub store_visits: u32,
    pub share_of_store: u32,
    pub male: u32,
    pub female: u32,
    pub male_share: u32,
    pub clinic: u32,
    pub outside: u32,
    pub clinic_share: u32,
    pub unique_diseases: u32,
    pub active_families: u32,
    pub all_families: u32,
    pub family_coverage: u32,
    pub average_recurrence: f64,
    pub top_disease: Option<String>,
    pub top_disease_clinic: u32,
    pub top_disease_outside: u32,
}

impl From<VisitSummary> for FfiVisitSummary {
    fn from(summary: VisitSummary) -> Self {
        let (top_disease, top_clinic, top_outside) = match &summary.top_disease {
            Some(top) => (Some(top.disease.clone()), top.clinic, top.outside),
            None => (None, 0, 0),
        };
        Self {
            filtered_visits: summary.filtered_visits as u32,
            store_visits: summary.store_visits as u32,
            share_of_store: summary.share_of_store,
            male: summary.male as u32,
            female: summary.female as u32,
            male_share: summary.male_share(),
            clinic: summary.clinic as u32,
            outside: summary.outside as u32,
            clinic_share: summary.clinic_share(),
            unique_diseases: summary.unique_diseases as u32,
            active_families: summary.active_families as u32,
            all_families: summary.all_families as u32,
            family_coverage: summary.family_coverage,
            average_recurrence: summary.average_recurrence,
            top_disease,
            top_disease_clinic: top_clinic as u32,
            top_disease_outside: top_outside as u32,
        }
    }
}

/// FFI-safe analytics snapshot, ready for display.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAnalyticsSnapshot {
    pub disease_breakdown: Vec<FfiBreakdownEntry>,
    pub top_diseases: Vec<FfiBreakdownEntry>,
    pub monthly_trend: Vec<FfiTrendPoint>,
    pub comparison: FfiComparison,
    pub summary: FfiVisitSummary,
    pub sparkline_path: String,
    pub sparkline_area: String,
}

impl FfiAnalyticsSnapshot {
    fn new(snapshot: AnalyticsSnapshot, sparkline: Sparkline, top_count: usize) -> Self {
        let top_diseases = snapshot
            .top_diseases(top_count)
            .iter()
            .cloned()
            .map(Into::into)
            .collect();
        Self {
            disease_breakdown: snapshot.disease_breakdown.into_iter().map(Into::into).collect(),
            top_diseases,
            monthly_trend: snapshot.monthly_trend.into_iter().map(Into::into).collect(),
            comparison: snapshot.comparison.into(),
            summary: snapshot.summary.into(),
            sparkline_path: sparkline.path,
            sparkline_area: sparkline.area,
        }
    }
}
