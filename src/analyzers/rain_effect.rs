use crate::analyzers::grouped_mean::MeanAccumulator;
use crate::error::{AnalyticsError, Result};
use crate::models::{categorize, Pollutant, RainCategory, RainEffectEnvelope, RainEffectRow};
use crate::processors::Selection;
use std::collections::BTreeMap;
use tracing::debug;

/// Mean concentration of each pollutant per rainfall category.
///
/// Rows without a rainfall reading are skipped. Negative rainfall fails the
/// whole request.
pub fn rain_effect(selection: &Selection<'_>, pollutants: &[Pollutant]) -> Result<RainEffectEnvelope> {
    selection.require_rows()?;

    let mut pollutants: Vec<Pollutant> = pollutants.to_vec();
    pollutants.sort();
    pollutants.dedup();
    if pollutants.is_empty() {
        return Err(AnalyticsError::UnknownColumn(
            "no pollutant selected for the rainfall comparison".to_string(),
        ));
    }

    let mut groups: BTreeMap<RainCategory, (usize, Vec<MeanAccumulator>)> = BTreeMap::new();
    let mut skipped = 0usize;

    for row in selection.iter() {
        let Some(rain) = row.rain() else {
            skipped += 1;
            continue;
        };
        let category = categorize(rain).map_err(|e| {
            AnalyticsError::Domain(format!(
                "station '{}' on {} at {:02}:00: {}",
                row.station(),
                row.date(),
                row.hour(),
                e
            ))
        })?;

        let (rows, accumulators) = groups
            .entry(category)
            .or_insert_with(|| (0, vec![MeanAccumulator::default(); pollutants.len()]));
        *rows += 1;
        for (acc, pollutant) in accumulators.iter_mut().zip(&pollutants) {
            acc.push(row.value(*pollutant));
        }
    }

    if groups.is_empty() {
        return Err(AnalyticsError::InsufficientData(format!(
            "no rainfall readings for {}",
            selection.criteria()
        )));
    }
    if skipped > 0 {
        debug!(skipped, "rows without rainfall left out of the rain effect");
    }

    let rows = groups
        .into_iter()
        .map(|(category, (rows, accumulators))| RainEffectRow {
            category,
            rows,
            means: pollutants
                .iter()
                .zip(accumulators)
                .filter_map(|(pollutant, acc)| acc.finish().map(|mean| (*pollutant, mean)))
                .collect(),
        })
        .collect();

    Ok(RainEffectEnvelope {
        criteria: selection.criteria().clone(),
        pollutants,
        rows,
    })
}
