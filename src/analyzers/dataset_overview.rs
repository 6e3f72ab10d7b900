use crate::models::{FilterCriteria, ObservationTable};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// What a front end needs to offer a selection: years, stations and a default
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub total_records: usize,
    /// Ascending
    pub years: Vec<i32>,
    /// In order of first appearance
    pub stations: Vec<String>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl DatasetOverview {
    pub fn from_table(table: &ObservationTable) -> Self {
        let mut years = BTreeSet::new();
        let mut seen = HashSet::new();
        let mut stations = Vec::new();
        let mut date_range: Option<(NaiveDate, NaiveDate)> = None;

        for row in table {
            years.insert(row.year());
            if seen.insert(row.station()) {
                stations.push(row.station().to_string());
            }
            let date = row.date();
            date_range = Some(match date_range {
                Some((first, last)) => (first.min(date), last.max(date)),
                None => (date, date),
            });
        }

        Self {
            total_records: table.len(),
            years: years.into_iter().collect(),
            stations,
            date_range,
        }
    }

    /// First year and first station, if the table has any rows
    pub fn default_criteria(&self) -> Option<FilterCriteria> {
        let year = *self.years.first()?;
        let station = self.stations.first()?;
        Some(FilterCriteria::new(year, [station.clone()]))
    }

    pub fn summary(&self) -> String {
        let years: Vec<String> = self.years.iter().map(|y| y.to_string()).collect();
        let range = match self.date_range {
            Some((first, last)) => format!("{} to {}", first, last),
            None => "empty".to_string(),
        };

        format!(
            "Records: {}\n\
            Date Range: {}\n\
            Years: {}\n\
            Stations ({}): {}",
            self.total_records,
            range,
            years.join(", "),
            self.stations.len(),
            self.stations.join(", ")
        )
    }
}
