use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{AnalyticsError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "O3")]
    O3,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::So2,
        Pollutant::No2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    /// Column header used by the source dataset
    pub fn column_name(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::So2 => "SO2",
            Pollutant::No2 => "NO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
        }
    }

    pub fn units(&self) -> &'static str {
        "µg/m³"
    }

    /// Resolve a column name, accepting `PM2.5`, `pm2.5` and `pm25` style spellings
    pub fn from_column(name: &str) -> Result<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| *c != '.' && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "PM25" => Ok(Pollutant::Pm25),
            "PM10" => Ok(Pollutant::Pm10),
            "SO2" => Ok(Pollutant::So2),
            "NO2" => Ok(Pollutant::No2),
            "CO" => Ok(Pollutant::Co),
            "O3" => Ok(Pollutant::O3),
            _ => Err(AnalyticsError::UnknownColumn(name.to_string())),
        }
    }
}

impl FromStr for Pollutant {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        Pollutant::from_column(s)
    }
}

impl std::fmt::Display for Pollutant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}
