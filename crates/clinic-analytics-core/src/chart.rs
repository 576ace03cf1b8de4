//! Chart geometry for the trend series.

use serde::{Deserialize, Serialize};

use crate::analytics::MonthlyTrendPoint;
use crate::config::SparklineConfig;

/// SVG path data for a trend sparkline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sparkline {
    /// Stroke path, `M x,y L x,y ...`
    pub path: String,
    /// Filled area under the stroke, closed along the bottom edge
    pub area: String,
}

impl Sparkline {
    /// Scale `points` into the configured box. Empty input yields empty paths.
    pub fn from_trend(points: &[MonthlyTrendPoint], config: &SparklineConfig) -> Self {
        if points.is_empty() {
            return Self::default();
        }

        let (width, height) = (config.width, config.height);
        let max_count = points.iter().map(|p| p.count).max().unwrap_or(0).max(1);
        let span = points.len().saturating_sub(1).max(1) as f64;

        let path = points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let x = index as f64 / span * width;
                let y = height - f64::from(point.count) / f64::from(max_count) * height;
                let command = if index == 0 { 'M' } else { 'L' };
                format!("{command}{x:.1},{y:.1}")
            })
            .collect::<Vec<_>>()
            .join(" ");
        let area = format!("{path} L {width} {height} L 0 {height} Z");

        Self { path, area }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthKey;

    fn points(counts: &[u32]) -> Vec<MonthlyTrendPoint> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| MonthlyTrendPoint {
                month: MonthKey::parse(&format!("2024-{:02}", i + 1)).unwrap(),
                count,
            })
            .collect()
    }

    #[test]
    fn test_empty_series() {
        let spark = Sparkline::from_trend(&[], &SparklineConfig::default());
        assert_eq!(spark, Sparkline::default());
    }

    #[test]
    fn test_scaling() {
        let config = SparklineConfig {
            width: 100.0,
            height: 50.0,
        };
        let spark = Sparkline::from_trend(&points(&[0, 2, 4]), &config);
        assert_eq!(spark.path, "M0.0,50.0 L50.0,25.0 L100.0,0.0");
        assert_eq!(spark.area, "M0.0,50.0 L50.0,25.0 L100.0,0.0 L 100 50 L 0 50 Z");
    }

    #[test]
    fn test_single_point_and_all_zero() {
        let config = SparklineConfig::default();
        let spark = Sparkline::from_trend(&points(&[0]), &config);
        assert_eq!(spark.path, "M0.0,82.0");

        let spark = Sparkline::from_trend(&points(&[0, 0]), &config);
        assert_eq!(spark.path, "M0.0,82.0 L260.0,82.0");
    }
}
