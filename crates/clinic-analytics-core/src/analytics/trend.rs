//! Monthly trend series.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{MonthKey, Selection, VisitRecord};

/// Visit count for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyTrendPoint {
    pub month: MonthKey,
    pub count: u32,
}

/// One point per month of `axis`, counting the filtered records.
///
/// `axis` is the full, ascending month list of the unfiltered store, so the
/// series never shrinks when filters narrow the data. `disease` narrows the
/// counted records further.
pub fn monthly_trend(
    axis: &[MonthKey],
    records: &[&VisitRecord],
    disease: &Selection<String>,
) -> Vec<MonthlyTrendPoint> {
    let mut counts: HashMap<&MonthKey, u32> = HashMap::new();
    for record in records.iter().filter(|r| disease.accepts(&r.disease)) {
        *counts.entry(&record.month).or_insert(0) += 1;
    }

    axis.iter()
        .map(|month| MonthlyTrendPoint {
            month: month.clone(),
            count: counts.get(month).copied().unwrap_or(0),
        })
        .collect()
}
