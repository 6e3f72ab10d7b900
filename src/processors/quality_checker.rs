use crate::models::{ObservationTable, Pollutant};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct DataQualityReport {
    pub total_records: usize,
    pub complete_records: usize,
    pub station_statistics: BTreeMap<String, StationQuality>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StationQuality {
    pub total_records: usize,
    pub complete_records: usize,
    pub missing_values: BTreeMap<Pollutant, usize>,
    pub missing_rain: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl StationQuality {
    pub fn missing(&self, pollutant: Pollutant) -> usize {
        self.missing_values.get(&pollutant).copied().unwrap_or(0)
    }
}

/// Counts gaps in a loaded table, per station and pollutant
pub struct QualityChecker;

impl QualityChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, table: &ObservationTable) -> DataQualityReport {
        let mut report = DataQualityReport {
            total_records: table.len(),
            complete_records: 0,
            station_statistics: BTreeMap::new(),
        };

        for row in table {
            let stats = report
                .station_statistics
                .entry(row.station().to_string())
                .or_default();

            stats.total_records += 1;

            let mut complete = true;
            for pollutant in Pollutant::ALL {
                if row.value(pollutant).is_none() {
                    *stats.missing_values.entry(pollutant).or_default() += 1;
                    complete = false;
                }
            }
            if row.rain().is_none() {
                stats.missing_rain += 1;
                complete = false;
            }
            if complete {
                stats.complete_records += 1;
                report.complete_records += 1;
            }

            let date = row.date();
            stats.first_date = Some(stats.first_date.map_or(date, |d| d.min(date)));
            stats.last_date = Some(stats.last_date.map_or(date, |d| d.max(date)));
        }

        report
    }

    pub fn generate_summary(&self, report: &DataQualityReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== Data Quality Report ===\n");
        summary.push_str(&format!("Total Records: {}\n", report.total_records));
        summary.push_str(&format!(
            "Complete Records: {} ({:.1}%)\n",
            report.complete_records,
            percentage(report.complete_records, report.total_records)
        ));

        for (station, stats) in &report.station_statistics {
            let span = match (stats.first_date, stats.last_date) {
                (Some(first), Some(last)) => format!("{} to {}", first, last),
                _ => "no dates".to_string(),
            };
            summary.push_str(&format!(
                "\n{} ({} records, {})\n",
                station, stats.total_records, span
            ));
            for pollutant in Pollutant::ALL {
                let missing = stats.missing(pollutant);
                summary.push_str(&format!(
                    "  {:<6} missing {:>6} ({:.1}%)\n",
                    pollutant.column_name(),
                    missing,
                    percentage(missing, stats.total_records)
                ));
            }
            summary.push_str(&format!(
                "  {:<6} missing {:>6} ({:.1}%)\n",
                "RAIN",
                stats.missing_rain,
                percentage(stats.missing_rain, stats.total_records)
            ));
        }

        summary
    }
}

impl Default for QualityChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}
