use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

/// Ordinal rainfall intensity bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RainCategory {
    NoRain,
    Light,
    Moderate,
    Heavy,
}

/// Inclusive upper bounds in millimetres, in ascending order. Anything above
/// the last bound is `Heavy`.
pub const RAIN_THRESHOLDS: [(f64, RainCategory); 3] = [
    (0.0, RainCategory::NoRain),
    (20.0, RainCategory::Light),
    (50.0, RainCategory::Moderate),
];

impl RainCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RainCategory::NoRain => "No Rain",
            RainCategory::Light => "Light",
            RainCategory::Moderate => "Moderate",
            RainCategory::Heavy => "Heavy",
        }
    }
}

impl std::fmt::Display for RainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Map a rainfall amount (mm) to its category.
///
/// Bounds are exclusive below and inclusive above, so 20.0 is `Light` and
/// 50.0 is `Moderate`. Negative or NaN rainfall is rejected.
pub fn categorize(rain: f64) -> Result<RainCategory> {
    if rain.is_nan() || rain < 0.0 {
        return Err(AnalyticsError::Domain(format!(
            "Rainfall {} mm is not a non-negative amount",
            rain
        )));
    }

    Ok(RAIN_THRESHOLDS
        .iter()
        .find(|(upper, _)| rain <= *upper)
        .map(|(_, category)| *category)
        .unwrap_or(RainCategory::Heavy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(categorize(0.0).unwrap(), RainCategory::NoRain);
        assert_eq!(categorize(0.1).unwrap(), RainCategory::Light);
        assert_eq!(categorize(20.0).unwrap(), RainCategory::Light);
        assert_eq!(categorize(20.0001).unwrap(), RainCategory::Moderate);
        assert_eq!(categorize(50.0).unwrap(), RainCategory::Moderate);
        assert_eq!(categorize(50.0001).unwrap(), RainCategory::Heavy);
        assert_eq!(categorize(f64::INFINITY).unwrap(), RainCategory::Heavy);
    }

    #[test]
    fn test_negative_rain_is_rejected() {
        assert!(matches!(categorize(-0.5), Err(AnalyticsError::Domain(_))));
        assert!(matches!(categorize(f64::NAN), Err(AnalyticsError::Domain(_))));
    }

    #[test]
    fn test_categorize_is_monotonic() {
        let mut previous = RainCategory::NoRain;
        for step in 0..1200 {
            let rain = step as f64 * 0.1;
            let category = categorize(rain).unwrap();
            assert!(
                category >= previous,
                "{} mm mapped to {} after {}",
                rain,
                category,
                previous
            );
            previous = category;
        }
        assert_eq!(previous, RainCategory::Heavy);
    }

    #[test]
    fn test_thresholds_are_ascending() {
        for pair in RAIN_THRESHOLDS.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[0].1 < pair[1].1);
        }
    }
}
