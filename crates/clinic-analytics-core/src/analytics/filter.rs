//! Filter predicate over the record store.

use crate::models::{FilterCriteria, VisitRecord};
use crate::store::RecordStore;

/// Records matching `criteria`, in store order.
pub fn filter_records<'a>(store: &'a RecordStore, criteria: &FilterCriteria) -> Vec<&'a VisitRecord> {
    store
        .records()
        .iter()
        .filter(|record| criteria.matches(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, MonthKey};

    fn ids(records: &[&VisitRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let store = RecordStore::seed();
        assert_eq!(filter_records(&store, &FilterCriteria::all()).len(), 12);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let store = RecordStore::seed();
        let hits = filter_records(&store, &FilterCriteria::all().with_search("SILVA"));
        assert_eq!(ids(&hits), vec!["d-11", "d-12"]);

        let hits = filter_records(&store, &FilterCriteria::all().with_search("fev"));
        assert_eq!(hits.len(), 4);

        let hits = filter_records(&store, &FilterCriteria::all().with_search("measles"));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_search_spans_fields() {
        // "hypertension premadasa" only exists across the disease/patient boundary
        let store = RecordStore::seed();
        let hits = filter_records(
            &store,
            &FilterCriteria::all().with_search("hypertension premadasa"),
        );
        assert_eq!(ids(&hits), vec!["d-05"]);
    }

    #[test]
    fn test_gender_filter() {
        let store = RecordStore::seed();
        let hits = filter_records(&store, &FilterCriteria::all().with_gender(Gender::Female));
        assert_eq!(hits.len(), 5);
        assert!(hits.iter().all(|r| r.gender == Gender::Female));
    }

    #[test]
    fn test_month_filter() {
        let store = RecordStore::seed();
        let may = MonthKey::parse("2024-05").unwrap();
        let hits = filter_records(&store, &FilterCriteria::all().with_month(may));
        assert_eq!(ids(&hits), vec!["d-01", "d-06", "d-09", "d-12"]);

        let jan = MonthKey::parse("2024-01").unwrap();
        assert!(filter_records(&store, &FilterCriteria::all().with_month(jan)).is_empty());
    }

    #[test]
    fn test_family_filter_is_exact() {
        let store = RecordStore::seed();
        let hits = filter_records(&store, &FilterCriteria::all().with_family("Perera"));
        assert_eq!(ids(&hits), vec!["d-09", "d-10"]);

        assert!(filter_records(&store, &FilterCriteria::all().with_family("Pere")).is_empty());
    }

    #[test]
    fn test_disease_filter_is_exact() {
        let store = RecordStore::seed();
        let hits = filter_records(&store, &FilterCriteria::all().with_disease("Asthma"));
        assert_eq!(ids(&hits), vec!["d-06", "d-10"]);

        assert!(filter_records(&store, &FilterCriteria::all().with_disease("asthma")).is_empty());
    }

    #[test]
    fn test_criteria_combine() {
        let store = RecordStore::seed();
        let criteria = FilterCriteria::all()
            .with_disease("Fever")
            .with_gender(Gender::Male)
            .with_search("silva");
        assert_eq!(ids(&filter_records(&store, &criteria)), vec!["d-11"]);
    }
}
