use crate::error::{AnalyticsError, Result};
use crate::models::TTestResult;
use crate::utils::constants::MIN_SAMPLE_SIZE;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Independent two-sample Student's t-test with pooled variance, two-tailed.
///
/// The statistic is positive when `first` has the larger mean.
pub fn compare(first: &[f64], second: &[f64]) -> Result<TTestResult> {
    if first.len() < MIN_SAMPLE_SIZE || second.len() < MIN_SAMPLE_SIZE {
        return Err(AnalyticsError::InsufficientData(format!(
            "a two-sample test needs at least {} observations per sample (got {} and {})",
            MIN_SAMPLE_SIZE,
            first.len(),
            second.len()
        )));
    }

    let (n1, mean1, ss1) = moments(first);
    let (n2, mean2, ss2) = moments(second);

    let degrees_of_freedom = n1 + n2 - 2.0;
    let pooled_variance = (ss1 + ss2) / degrees_of_freedom;
    let standard_error = (pooled_variance * (1.0 / n1 + 1.0 / n2)).sqrt();

    if !(standard_error.is_finite() && standard_error > 0.0) {
        return Err(AnalyticsError::InsufficientData(
            "both samples have zero variance; the t-statistic is undefined".to_string(),
        ));
    }

    let statistic = (mean1 - mean2) / standard_error;
    let distribution = StudentsT::new(0.0, 1.0, degrees_of_freedom)
        .map_err(|e| AnalyticsError::Statistics(e.to_string()))?;
    let p_value = (2.0 * (1.0 - distribution.cdf(statistic.abs()))).clamp(0.0, 1.0);

    if !statistic.is_finite() || p_value.is_nan() {
        return Err(AnalyticsError::Statistics(format!(
            "t-test produced a non-finite result (t={}, p={})",
            statistic, p_value
        )));
    }

    Ok(TTestResult {
        statistic,
        p_value,
        degrees_of_freedom,
    })
}

/// (n, mean, sum of squared deviations)
fn moments(sample: &[f64]) -> (f64, f64, f64) {
    let n = sample.len() as f64;
    let mean = sample.iter().sum::<f64>() / n;
    let ss = sample.iter().map(|v| (v - mean).powi(2)).sum();
    (n, mean, ss)
}
