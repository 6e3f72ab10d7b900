use crate::error::{AnalyticsError, Result};
use crate::models::{Observation, ObservationRecord, ObservationTable, TemporalFeatures};
use tracing::debug;
use validator::Validate;

/// Validates raw rows and attaches their calendar features
pub struct FeatureDeriver;

impl FeatureDeriver {
    pub fn new() -> Self {
        Self
    }

    /// Derive features for a single row
    pub fn derive(&self, record: ObservationRecord) -> Result<Observation> {
        let features = TemporalFeatures::from_ymd(record.year, record.month, record.day)
            .ok_or_else(|| {
                AnalyticsError::Schema(format!(
                    "{}-{:02}-{:02} at station '{}' is not a valid calendar date",
                    record.year, record.month, record.day, record.station
                ))
            })?;

        record.validate().map_err(|e| {
            AnalyticsError::Domain(format!(
                "station '{}' at {} {:02}:00: {}",
                record.station, features.date, record.hour, e
            ))
        })?;

        if let Some(column) = record.non_finite_column() {
            return Err(AnalyticsError::Domain(format!(
                "station '{}' at {} {:02}:00: {} is not a finite number",
                record.station, features.date, record.hour, column
            )));
        }

        Ok(Observation { record, features })
    }

    /// Derive features for every row, failing on the first invalid one
    pub fn derive_table<I>(&self, records: I) -> Result<ObservationTable>
    where
        I: IntoIterator<Item = ObservationRecord>,
    {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                self.derive(record).map_err(|e| match e {
                    AnalyticsError::Schema(msg) => {
                        AnalyticsError::Schema(format!("row {}: {}", index + 1, msg))
                    }
                    AnalyticsError::Domain(msg) => {
                        AnalyticsError::Domain(format!("row {}: {}", index + 1, msg))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(rows = rows.len(), "derived temporal features");
        Ok(ObservationTable::from_rows(rows))
    }

    /// Recompute the derived columns of an existing table from its base columns
    pub fn rederive(&self, table: &ObservationTable) -> Result<ObservationTable> {
        self.derive_table(table.records().cloned())
    }
}

impl Default for FeatureDeriver {
    fn default() -> Self {
        Self::new()
    }
}
