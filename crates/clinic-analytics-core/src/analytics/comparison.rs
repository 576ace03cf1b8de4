//! Latest-vs-previous month comparison for one disease.

use serde::{Deserialize, Serialize};

use crate::models::{MonthKey, VisitRecord};

/// Percentage reported when the previous month has no visits.
///
/// A display sentinel, not a growth ratio.
pub const NO_BASELINE_PERCENTAGE: i64 = 100;

/// Visit counts for one disease across the two most recent months.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub target_disease: String,
    pub latest_month: Option<MonthKey>,
    pub previous_month: Option<MonthKey>,
    pub latest_count: u32,
    pub previous_count: u32,
    pub delta: i64,
    pub percentage_change: i64,
}

impl ComparisonResult {
    /// True when `percentage_change` is the no-baseline sentinel rather than a ratio.
    pub fn is_sentinel(&self) -> bool {
        self.previous_count == 0
    }
}

/// Compare `target_disease` visits between the last two months of `axis`.
///
/// `axis` must be ascending. A missing month counts as zero visits.
pub fn compare_latest_months(
    axis: &[MonthKey],
    records: &[&VisitRecord],
    target_disease: &str,
) -> ComparisonResult {
    let mut recent = axis.iter().rev();
    let latest_month = recent.next().cloned();
    let previous_month = recent.next().cloned();

    let count_for = |month: &Option<MonthKey>| -> u32 {
        match month {
            Some(month) => records
                .iter()
                .filter(|r| r.disease == target_disease && &r.month == month)
                .count() as u32,
            None => 0,
        }
    };

    let latest_count = count_for(&latest_month);
    let previous_count = count_for(&previous_month);

    ComparisonResult {
        target_disease: target_disease.to_string(),
        latest_month,
        previous_month,
        latest_count,
        previous_count,
        delta: i64::from(latest_count) - i64::from(previous_count),
        percentage_change: percentage_change(latest_count, previous_count),
    }
}

/// `round(delta / previous * 100)` with half-up rounding, or the sentinel.
pub fn percentage_change(latest: u32, previous: u32) -> i64 {
    if previous == 0 {
        return NO_BASELINE_PERCENTAGE;
    }
    let delta = f64::from(latest) - f64::from(previous);
    round_half_up(delta / f64::from(previous) * 100.0)
}

pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
