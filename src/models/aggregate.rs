use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Pollutant, RainCategory};

/// Mean of the non-missing values in one group, with the number of values used
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainEffectRow {
    pub category: RainCategory,
    /// Rows that fell in this category, whether or not they carried a value
    pub rows: usize,
    /// Pollutants with no value in this category are absent
    pub means: BTreeMap<Pollutant, GroupMean>,
}

impl RainEffectRow {
    pub fn mean(&self, pollutant: Pollutant) -> Option<f64> {
        self.means.get(&pollutant).map(|m| m.mean)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationMean {
    pub station: String,
    pub mean: f64,
    pub count: usize,
}

/// One calendar day's average at the selected stations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyMean {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub mean: f64,
    pub count: usize,
}

/// Five-number summary plus moments, enough to draw a box plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` below two observations
    pub std_dev: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl SampleSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std_dev = (count > 1).then(|| {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        });

        Some(Self {
            count,
            mean,
            std_dev,
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty and ascending
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Outcome of a pooled-variance two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTestResult {
    /// (mean of first sample - mean of second sample) / standard error
    pub statistic: f64,
    /// Two-tailed
    pub p_value: f64,
    pub degrees_of_freedom: f64,
}

impl TTestResult {
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_summary() {
        let summary = SampleSummary::from_values(&[4.0, 1.0, 3.0, 2.0, 5.0]).unwrap();

        assert_eq!(summary.count, 5);
        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q3, 4.0);
        assert_eq!(summary.max, 5.0);
        assert!((summary.std_dev.unwrap() - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_sample_summary_interpolates_quartiles() {
        let summary = SampleSummary::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(summary.q1, 1.75);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.q3, 3.25);
    }

    #[test]
    fn test_sample_summary_edge_cases() {
        assert!(SampleSummary::from_values(&[]).is_none());

        let single = SampleSummary::from_values(&[7.0]).unwrap();
        assert_eq!(single.median, 7.0);
        assert!(single.std_dev.is_none());
    }

    #[test]
    fn test_significance() {
        let result = TTestResult {
            statistic: -2.5,
            p_value: 0.03,
            degrees_of_freedom: 10.0,
        };
        assert!(result.is_significant(0.05));
        assert!(!result.is_significant(0.01));
    }
}
