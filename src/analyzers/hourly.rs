use crate::analyzers::grouped_mean::grouped_mean;
use crate::error::{AnalyticsError, Result};
use crate::models::{HourlyEnvelope, Pollutant};
use crate::processors::Selection;

/// Mean concentration per hour of day, with the peak hour.
///
/// Ties for the peak go to the earliest hour.
pub fn hourly_profile(selection: &Selection<'_>, pollutant: Pollutant) -> Result<HourlyEnvelope> {
    selection.require_rows()?;

    let by_hour = grouped_mean(selection.iter(), |row| row.hour(), |row| row.value(pollutant));

    let mut peak: Option<(u32, f64)> = None;
    for (hour, mean) in &by_hour {
        if peak.map_or(true, |(_, best)| mean.mean > best) {
            peak = Some((*hour, mean.mean));
        }
    }

    let (peak_hour, peak_value) = peak.ok_or_else(|| {
        AnalyticsError::InsufficientData(format!(
            "no {} values for {}",
            pollutant,
            selection.criteria()
        ))
    })?;

    Ok(HourlyEnvelope {
        criteria: selection.criteria().clone(),
        pollutant,
        by_hour,
        peak_hour,
        peak_value,
    })
}
