use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::Observation;

/// Immutable (year, station-set) selection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterCriteria {
    year: i32,
    stations: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new<I, S>(year: i32, stations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            year,
            stations: stations.into_iter().map(Into::into).collect(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn stations(&self) -> &BTreeSet<String> {
        &self.stations
    }

    pub fn has_stations(&self) -> bool {
        !self.stations.is_empty()
    }

    pub fn matches(&self, observation: &Observation) -> bool {
        observation.year() == self.year && self.stations.contains(observation.station())
    }

    pub fn describe(&self) -> String {
        if self.stations.is_empty() {
            format!("{} (no stations selected)", self.year)
        } else {
            let stations: Vec<&str> = self.stations.iter().map(String::as_str).collect();
            format!("{} at {}", self.year, stations.join(", "))
        }
    }
}

impl std::fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ObservationRecord, TemporalFeatures};

    fn observation(station: &str, year: i32) -> Observation {
        Observation {
            record: ObservationRecord::new(station, year, 1, 1, 0),
            features: TemporalFeatures::from_ymd(year, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_matches() {
        let criteria = FilterCriteria::new(2015, ["Dongsi", "Tiantan"]);

        assert!(criteria.matches(&observation("Dongsi", 2015)));
        assert!(criteria.matches(&observation("Tiantan", 2015)));
        assert!(!criteria.matches(&observation("Dongsi", 2016)));
        assert!(!criteria.matches(&observation("Gucheng", 2015)));
    }

    #[test]
    fn test_duplicate_stations_collapse() {
        let criteria = FilterCriteria::new(2015, ["Dongsi", "Dongsi"]);
        assert_eq!(criteria.stations().len(), 1);
        assert_eq!(criteria.describe(), "2015 at Dongsi");
    }

    #[test]
    fn test_empty_station_set() {
        let criteria = FilterCriteria::new(2015, Vec::<String>::new());
        assert!(!criteria.has_stations());
        assert_eq!(criteria.to_string(), "2015 (no stations selected)");
    }
}
