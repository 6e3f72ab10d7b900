//! Presentation-ready results. Each envelope carries the selection it was
//! computed for together with the headline scalars a dashboard shows next to
//! its chart.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{
    DailyMean, FilterCriteria, GroupMean, Pollutant, RainEffectRow, SampleSummary, StationMean,
    TTestResult,
};
use crate::utils::constants::DEFAULT_SIGNIFICANCE_LEVEL;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEnvelope {
    pub criteria: FilterCriteria,
    pub pollutant: Pollutant,
    pub by_hour: BTreeMap<u32, GroupMean>,
    pub peak_hour: u32,
    pub peak_value: f64,
}

impl HourlyEnvelope {
    pub fn mean_at(&self, hour: u32) -> Option<f64> {
        self.by_hour.get(&hour).map(|m| m.mean)
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Hourly mean {} ({})\n\
            Peak hour: {:02}:00 at {:.2} {}\n",
            self.pollutant,
            self.criteria,
            self.peak_hour,
            self.peak_value,
            self.pollutant.units()
        );
        for (hour, mean) in &self.by_hour {
            summary.push_str(&format!(
                "  {:02}:00  {:>8.2}  (n={})\n",
                hour, mean.mean, mean.count
            ));
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainEffectEnvelope {
    pub criteria: FilterCriteria,
    pub pollutants: Vec<Pollutant>,
    /// Ascending by category; categories without rows are absent
    pub rows: Vec<RainEffectRow>,
}

impl RainEffectEnvelope {
    pub fn row(&self, category: crate::models::RainCategory) -> Option<&RainEffectRow> {
        self.rows.iter().find(|row| row.category == category)
    }

    pub fn summary(&self) -> String {
        let mut summary = format!("Rainfall effect ({})\n", self.criteria);
        summary.push_str(&format!("  {:<10}{:>8}", "Category", "Rows"));
        for pollutant in &self.pollutants {
            summary.push_str(&format!("{:>10}", pollutant.column_name()));
        }
        summary.push('\n');

        for row in &self.rows {
            summary.push_str(&format!("  {:<10}{:>8}", row.category.label(), row.rows));
            for pollutant in &self.pollutants {
                match row.mean(*pollutant) {
                    Some(mean) => summary.push_str(&format!("{:>10.2}", mean)),
                    None => summary.push_str(&format!("{:>10}", "-")),
                }
            }
            summary.push('\n');
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRankingEnvelope {
    pub criteria: FilterCriteria,
    pub pollutant: Pollutant,
    /// Descending by mean
    pub ranking: Vec<StationMean>,
    pub top_station: String,
    pub top_value: f64,
}

impl StationRankingEnvelope {
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Station ranking by mean {} ({})\n\
            Highest: {} (mean {:.2} {})\n",
            self.pollutant,
            self.criteria,
            self.top_station,
            self.top_value,
            self.pollutant.units()
        );
        for (rank, station) in self.ranking.iter().enumerate() {
            summary.push_str(&format!(
                "  {}. {:<16}{:>8.2}  (n={})\n",
                rank + 1,
                station.station,
                station.mean,
                station.count
            ));
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayWeekendEnvelope {
    pub criteria: FilterCriteria,
    pub pollutant: Pollutant,
    /// One entry per calendar day, in date order
    pub daily_means: Vec<DailyMean>,
    pub weekday: SampleSummary,
    pub weekend: SampleSummary,
    pub test: TTestResult,
}

impl WeekdayWeekendEnvelope {
    pub fn weekday_sample(&self) -> Vec<f64> {
        self.sample(false)
    }

    pub fn weekend_sample(&self) -> Vec<f64> {
        self.sample(true)
    }

    fn sample(&self, is_weekend: bool) -> Vec<f64> {
        self.daily_means
            .iter()
            .filter(|day| day.is_weekend == is_weekend)
            .map(|day| day.mean)
            .collect()
    }

    pub fn summary(&self) -> String {
        self.summary_at(DEFAULT_SIGNIFICANCE_LEVEL)
    }

    pub fn summary_at(&self, alpha: f64) -> String {
        let verdict = if self.test.is_significant(alpha) {
            "significant"
        } else {
            "not significant"
        };

        format!(
            "Weekday vs weekend daily mean {} ({})\n\
            Weekdays: {} days, mean {:.2}, median {:.2}\n\
            Weekends: {} days, mean {:.2}, median {:.2}\n\
            t-statistic: {:.4}\n\
            p-value: {:.4} ({} at alpha={})",
            self.pollutant,
            self.criteria,
            self.weekday.count,
            self.weekday.mean,
            self.weekday.median,
            self.weekend.count,
            self.weekend.mean,
            self.weekend.median,
            self.test.statistic,
            self.test.p_value,
            verdict,
            alpha
        )
    }
}
