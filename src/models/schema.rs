use crate::error::{AnalyticsError, Result};
use crate::models::Pollutant;

/// Columns needed to build calendar features and to filter
pub const TIME_COLUMNS: [&str; 4] = ["year", "month", "day", "hour"];
pub const STATION_COLUMN: &str = "station";
pub const RAIN_COLUMN: &str = "RAIN";

pub fn required_columns() -> Vec<&'static str> {
    let mut columns: Vec<&'static str> = TIME_COLUMNS.to_vec();
    columns.push(STATION_COLUMN);
    columns.extend(Pollutant::ALL.iter().map(|p| p.column_name()));
    columns.push(RAIN_COLUMN);
    columns
}

/// Check a header row for every required column. Extra columns are allowed.
pub fn validate_headers<'a, I>(headers: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().map(str::trim).collect();
    let missing: Vec<&str> = required_columns()
        .into_iter()
        .filter(|column| !present.contains(column))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AnalyticsError::Schema(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )))
    }
}
