use crate::analyzers::grouped_mean::grouped_mean;
use crate::error::{AnalyticsError, Result};
use crate::models::{Pollutant, StationMean, StationRankingEnvelope};
use crate::processors::Selection;

/// Stations ranked by mean concentration, highest first.
///
/// Equal means keep alphabetical station order.
pub fn station_ranking(selection: &Selection<'_>, pollutant: Pollutant) -> Result<StationRankingEnvelope> {
    selection.require_rows()?;

    let means = grouped_mean(selection.iter(), |row| row.station(), |row| row.value(pollutant));

    // BTreeMap iteration is alphabetical and the sort is stable
    let mut ranking: Vec<StationMean> = means
        .into_iter()
        .map(|(station, mean)| StationMean {
            station: station.to_string(),
            mean: mean.mean,
            count: mean.count,
        })
        .collect();
    ranking.sort_by(|a, b| b.mean.total_cmp(&a.mean));

    let top = ranking.first().ok_or_else(|| {
        AnalyticsError::InsufficientData(format!(
            "no {} values for {}",
            pollutant,
            selection.criteria()
        ))
    })?;
    let (top_station, top_value) = (top.station.clone(), top.mean);

    Ok(StationRankingEnvelope {
        criteria: selection.criteria().clone(),
        pollutant,
        ranking,
        top_station,
        top_value,
    })
}
