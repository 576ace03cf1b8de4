//! Visit records.

use serde::{Deserialize, Serialize};

use super::{ModelError, ModelResult, MonthKey};

/// Patient gender as recorded at the visit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

/// Where the condition was first treated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VisitSource {
    Clinic,
    Outside,
}

/// One logged clinical visit. Immutable once it is in a store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VisitRecord {
    /// Unique within a store
    pub id: String,
    /// Diagnosed condition
    pub disease: String,
    /// Patient display name
    pub patient: String,
    pub gender: Gender,
    pub age: u32,
    /// Family (surname) group
    pub family: String,
    /// Month bucket of the visit
    pub month: MonthKey,
    /// Number of visits for this condition, at least 1
    pub recurrence: u32,
    pub source: VisitSource,
}

impl VisitRecord {
    /// Create a record with a freshly generated id and a single occurrence.
    pub fn new(
        disease: String,
        patient: String,
        gender: Gender,
        age: u32,
        family: String,
        month: MonthKey,
        source: VisitSource,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            disease,
            patient,
            gender,
            age,
            family,
            month,
            recurrence: 1,
            source,
        }
    }

    /// Check field-level invariants.
    pub fn validate(&self) -> ModelResult<()> {
        if self.recurrence == 0 {
            return Err(ModelError::InvalidRecurrence(self.id.clone()));
        }
        Ok(())
    }

    /// Lowercased `"{disease} {patient} {family}"` used by free-text search.
    pub fn search_haystack(&self) -> String {
        format!("{} {} {}", self.disease, self.patient, self.family).to_lowercase()
    }
}
