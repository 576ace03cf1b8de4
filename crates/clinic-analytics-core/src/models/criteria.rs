//! Filter criteria chosen by the user.

use serde::de::{Deserializer, IntoDeserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::{Gender, MonthKey, VisitRecord};

/// Wire value meaning "no restriction". Matched exactly, lowercase only.
pub const ALL: &str = "all";

/// A selector value: either everything, or exactly one value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// Exact-equality match; `All` accepts anything.
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl<T> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }
}

impl Selection<String> {
    /// `"all"` lifts the restriction; any other value is an exact match.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw == ALL {
            Selection::All
        } else {
            Selection::Only(raw)
        }
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Selection::All, Selection::Only)
    }
}

impl<T: Serialize> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Selection::All => serializer.serialize_str(ALL),
            Selection::Only(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Selection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == ALL {
            return Ok(Selection::All);
        }
        let inner: serde::de::value::StringDeserializer<D::Error> = raw.into_deserializer();
        T::deserialize(inner).map(Selection::Only)
    }
}

/// The full set of narrowing conditions applied before aggregation.
///
/// Replaced wholesale on every interaction; `Default` is the reset state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Case-insensitive substring over disease, patient and family
    pub search_text: String,
    pub gender: Selection<Gender>,
    pub month: Selection<MonthKey>,
    pub family: Selection<String>,
    pub disease: Selection<String>,
}

impl FilterCriteria {
    /// Criteria with no restrictions.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Selection::Only(gender);
        self
    }

    pub fn with_month(mut self, month: MonthKey) -> Self {
        self.month = Selection::Only(month);
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Selection::parse(family);
        self
    }

    pub fn with_disease(mut self, disease: impl Into<String>) -> Self {
        self.disease = Selection::parse(disease);
        self
    }

    /// Whether a single record passes every criterion.
    pub fn matches(&self, record: &VisitRecord) -> bool {
        self.matches_search(record)
            && self.gender.accepts(&record.gender)
            && self.month.accepts(&record.month)
            && self.family.accepts(&record.family)
            && self.disease.accepts(&record.disease)
    }

    fn matches_search(&self, record: &VisitRecord) -> bool {
        self.search_text.is_empty()
            || record
                .search_haystack()
                .contains(&self.search_text.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_accepts() {
        assert!(Selection::<String>::All.accepts(&"Fever".to_string()));
        assert!(Selection::Only("Fever".to_string()).accepts(&"Fever".to_string()));
        assert!(!Selection::Only("Fever".to_string()).accepts(&"fever".to_string()));
    }

    #[test]
    fn test_selection_serde() {
        let all: Selection<Gender> = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(all, Selection::All);
        assert!(serde_json::from_str::<Selection<Gender>>("\"All\"").is_err());
        let male: Selection<Gender> = serde_json::from_str("\"Male\"").unwrap();
        assert_eq!(male, Selection::Only(Gender::Male));
        assert!(serde_json::from_str::<Selection<Gender>>("\"Other\"").is_err());
        assert_eq!(serde_json::to_string(&Selection::<Gender>::All).unwrap(), "\"all\"");

        let month: Selection<MonthKey> = serde_json::from_str("\"2024-05\"").unwrap();
        assert_eq!(month, Selection::Only(MonthKey::parse("2024-05").unwrap()));
        assert!(serde_json::from_str::<Selection<MonthKey>>("\"2024-5\"").is_err());
    }

    #[test]
    fn test_criteria_wire_format() {
        let criteria = FilterCriteria::all().with_search("silva").with_gender(Gender::Female);
        let json = serde_json::to_value(&criteria).unwrap();
        assert_eq!(json["searchText"], "silva");
        assert_eq!(json["gender"], "Female");
        assert_eq!(json["month"], "all");
        assert_eq!(json["family"], "all");
        assert_eq!(json["disease"], "all");
    }

    #[test]
    fn test_all_literal_is_exact_and_round_trips() {
        let criteria = FilterCriteria::all().with_disease("All").with_family("ALL");
        assert_eq!(criteria.disease, Selection::Only("All".to_string()));

        let json = serde_json::to_string(&criteria).unwrap();
        let parsed: FilterCriteria = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, criteria);

        let lowered = FilterCriteria::all().with_disease("all");
        assert!(lowered.disease.is_all());
        let parsed: FilterCriteria =
            serde_json::from_str(&serde_json::to_string(&lowered).unwrap()).unwrap();
        assert_eq!(parsed, lowered);
    }

    #[test]
    fn test_criteria_missing_fields_default() {
        let criteria: FilterCriteria = serde_json::from_str(r#"{"disease": "Fever"}"#).unwrap();
        assert_eq!(criteria.search_text, "");
        assert!(criteria.gender.is_all());
        assert_eq!(criteria.disease.as_option().map(String::as_str), Some("Fever"));
    }
}
