use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::models::schema::RAIN_COLUMN;
use crate::models::Pollutant;
use crate::utils::constants::{MISSING_VALUE_MARKERS, WEEKEND_DAYS};

/// One row of the source table as it appears on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ObservationRecord {
    pub year: i32,
    pub month: u32,
    pub day: u32,

    #[validate(range(max = 23))]
    pub hour: u32,

    #[validate(length(min = 1))]
    pub station: String,

    #[serde(rename = "PM2.5", deserialize_with = "deserialize_measurement")]
    #[validate(range(min = 0.0))]
    pub pm25: Option<f64>,

    #[serde(rename = "PM10", deserialize_with = "deserialize_measurement")]
    #[validate(range(min = 0.0))]
    pub pm10: Option<f64>,

    #[serde(rename = "SO2", deserialize_with = "deserialize_measurement")]
    #[validate(range(min = 0.0))]
    pub so2: Option<f64>,

    #[serde(rename = "NO2", deserialize_with = "deserialize_measurement")]
    #[validate(range(min = 0.0))]
    pub no2: Option<f64>,

    #[serde(rename = "CO", deserialize_with = "deserialize_measurement")]
    #[validate(range(min = 0.0))]
    pub co: Option<f64>,

    #[serde(rename = "O3", deserialize_with = "deserialize_measurement")]
    #[validate(range(min = 0.0))]
    pub o3: Option<f64>,

    #[serde(rename = "RAIN", deserialize_with = "deserialize_measurement")]
    #[validate(range(min = 0.0))]
    pub rain: Option<f64>,
}

/// Treat empty cells and the usual NA spellings as missing; anything else must parse.
fn deserialize_measurement<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None => Ok(None),
        Some(value) if MISSING_VALUE_MARKERS.contains(&value) => Ok(None),
        Some(value) => value.parse::<f64>().map(Some).map_err(|_| {
            serde::de::Error::custom(format!("invalid measurement '{}'", value))
        }),
    }
}

impl ObservationRecord {
    /// A record with every measurement missing
    pub fn new(station: impl Into<String>, year: i32, month: u32, day: u32, hour: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            station: station.into(),
            pm25: None,
            pm10: None,
            so2: None,
            no2: None,
            co: None,
            o3: None,
            rain: None,
        }
    }

    pub fn with_value(mut self, pollutant: Pollutant, value: f64) -> Self {
        *self.value_mut(pollutant) = Some(value);
        self
    }

    pub fn with_rain(mut self, rain: f64) -> Self {
        self.rain = Some(rain);
        self
    }

    pub fn value(&self, pollutant: Pollutant) -> Option<f64> {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::So2 => self.so2,
            Pollutant::No2 => self.no2,
            Pollutant::Co => self.co,
            Pollutant::O3 => self.o3,
        }
    }

    /// First measurement column holding NaN or an infinity. Range checks
    /// cannot catch NaN, so this runs alongside them.
    pub fn non_finite_column(&self) -> Option<&'static str> {
        Pollutant::ALL
            .iter()
            .map(|p| (p.column_name(), self.value(*p)))
            .chain(std::iter::once((RAIN_COLUMN, self.rain)))
            .find(|(_, value)| value.map_or(false, |v| !v.is_finite()))
            .map(|(column, _)| column)
    }

    fn value_mut(&mut self, pollutant: Pollutant) -> &mut Option<f64> {
        match pollutant {
            Pollutant::Pm25 => &mut self.pm25,
            Pollutant::Pm10 => &mut self.pm10,
            Pollutant::So2 => &mut self.so2,
            Pollutant::No2 => &mut self.no2,
            Pollutant::Co => &mut self.co,
            Pollutant::O3 => &mut self.o3,
        }
    }
}

/// Calendar features derived from (year, month, day)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalFeatures {
    pub date: NaiveDate,
    /// Monday = 0 ... Sunday = 6
    pub day_of_week: u8,
    pub is_weekend: bool,
}

impl TemporalFeatures {
    /// Returns `None` when the triple is not a calendar date
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let day_of_week = date.weekday().num_days_from_monday() as u8;

        Some(Self {
            date,
            day_of_week,
            is_weekend: is_weekend_day(day_of_week),
        })
    }
}

pub fn is_weekend_day(day_of_week: u8) -> bool {
    WEEKEND_DAYS.contains(&day_of_week)
}

/// A validated row together with its derived calendar features
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub record: ObservationRecord,
    pub features: TemporalFeatures,
}

impl Observation {
    pub fn station(&self) -> &str {
        &self.record.station
    }

    pub fn year(&self) -> i32 {
        self.record.year
    }

    pub fn hour(&self) -> u32 {
        self.record.hour
    }

    pub fn date(&self) -> NaiveDate {
        self.features.date
    }

    pub fn is_weekend(&self) -> bool {
        self.features.is_weekend
    }

    pub fn value(&self, pollutant: Pollutant) -> Option<f64> {
        self.record.value(pollutant)
    }

    pub fn rain(&self) -> Option<f64> {
        self.record.rain
    }
}

/// The in-memory dataset snapshot. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObservationTable {
    rows: Vec<Observation>,
}

impl ObservationTable {
    pub(crate) fn from_rows(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &ObservationRecord> {
        self.rows.iter().map(|row| &row.record)
    }
}

impl<'a> IntoIterator for &'a ObservationTable {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
