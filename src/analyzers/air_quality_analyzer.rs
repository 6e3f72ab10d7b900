use crate::analyzers::{
    hourly_profile, rain_effect, station_ranking, weekday_weekend, DatasetOverview,
};
use crate::error::Result;
use crate::models::{
    FilterCriteria, HourlyEnvelope, ObservationTable, Pollutant, RainEffectEnvelope,
    StationRankingEnvelope, WeekdayWeekendEnvelope,
};
use crate::processors::{filter, DataQualityReport, QualityChecker, Selection};
use crate::utils::constants::{
    DEFAULT_COMPARISON_POLLUTANT, DEFAULT_HOURLY_POLLUTANT, DEFAULT_RAIN_POLLUTANTS,
    DEFAULT_STATION_POLLUTANT,
};
use tracing::info;

/// Entry point for the four request shapes over one loaded table.
///
/// Holds only a shared borrow, so it is `Copy` and can be handed to as many
/// threads as needed.
#[derive(Debug, Clone, Copy)]
pub struct AirQualityAnalyzer<'a> {
    table: &'a ObservationTable,
}

/// All four views for one selection. Each keeps its own outcome so one
/// failing view does not hide the others.
#[derive(Debug)]
pub struct DashboardReport {
    pub criteria: FilterCriteria,
    pub hourly: Result<HourlyEnvelope>,
    pub rain_effect: Result<RainEffectEnvelope>,
    pub station_ranking: Result<StationRankingEnvelope>,
    pub weekday_weekend: Result<WeekdayWeekendEnvelope>,
}

impl<'a> AirQualityAnalyzer<'a> {
    pub fn new(table: &'a ObservationTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a ObservationTable {
        self.table
    }

    pub fn overview(&self) -> DatasetOverview {
        DatasetOverview::from_table(self.table)
    }

    pub fn quality_report(&self) -> DataQualityReport {
        QualityChecker::new().check(self.table)
    }

    pub fn select(&self, criteria: &FilterCriteria) -> Selection<'a> {
        filter(self.table, criteria)
    }

    /// Hourly profile; PM2.5 unless another pollutant is named
    pub fn hourly(&self, criteria: &FilterCriteria, pollutant: Option<&str>) -> Result<HourlyEnvelope> {
        let pollutant = resolve(pollutant, DEFAULT_HOURLY_POLLUTANT)?;
        info!(criteria = %criteria, %pollutant, "hourly profile requested");
        hourly_profile(&self.select(criteria), pollutant)
    }

    /// Rainfall effect; PM2.5 and SO2 when no pollutants are named
    pub fn rain_effect(&self, criteria: &FilterCriteria, pollutants: &[&str]) -> Result<RainEffectEnvelope> {
        let pollutants = if pollutants.is_empty() {
            DEFAULT_RAIN_POLLUTANTS.to_vec()
        } else {
            pollutants
                .iter()
                .map(|name| Pollutant::from_column(name))
                .collect::<Result<Vec<_>>>()?
        };
        info!(criteria = %criteria, ?pollutants, "rain effect requested");
        rain_effect(&self.select(criteria), &pollutants)
    }

    /// Station ranking; PM10 unless another pollutant is named
    pub fn station_ranking(
        &self,
        criteria: &FilterCriteria,
        pollutant: Option<&str>,
    ) -> Result<StationRankingEnvelope> {
        let pollutant = resolve(pollutant, DEFAULT_STATION_POLLUTANT)?;
        info!(criteria = %criteria, %pollutant, "station ranking requested");
        station_ranking(&self.select(criteria), pollutant)
    }

    /// Weekday/weekend comparison; PM2.5 unless another pollutant is named
    pub fn weekday_weekend(
        &self,
        criteria: &FilterCriteria,
        pollutant: Option<&str>,
    ) -> Result<WeekdayWeekendEnvelope> {
        let pollutant = resolve(pollutant, DEFAULT_COMPARISON_POLLUTANT)?;
        info!(criteria = %criteria, %pollutant, "weekday/weekend comparison requested");
        weekday_weekend(&self.select(criteria), pollutant)
    }

    /// Every view for one selection, computed in parallel. `comparison` picks
    /// the pollutant for the weekday/weekend view; the others use their
    /// defaults.
    pub fn report(&self, criteria: &FilterCriteria, comparison: Option<&str>) -> DashboardReport {
        let ((hourly, rain_effect), (station_ranking, weekday_weekend)) = rayon::join(
            || {
                rayon::join(
                    || self.hourly(criteria, None),
                    || self.rain_effect(criteria, &[]),
                )
            },
            || {
                rayon::join(
                    || self.station_ranking(criteria, None),
                    || self.weekday_weekend(criteria, comparison),
                )
            },
        );

        DashboardReport {
            criteria: criteria.clone(),
            hourly,
            rain_effect,
            station_ranking,
            weekday_weekend,
        }
    }
}

fn resolve(pollutant: Option<&str>, default: Pollutant) -> Result<Pollutant> {
    pollutant.map_or(Ok(default), Pollutant::from_column)
}
