use crate::analyzers::comparator::compare;
use crate::analyzers::grouped_mean::grouped_mean;
use crate::error::{AnalyticsError, Result};
use crate::models::{DailyMean, Pollutant, SampleSummary, WeekdayWeekendEnvelope};
use crate::processors::Selection;

/// One mean per calendar day, so each day counts once however many hourly
/// rows it has. Days without any value are left out.
pub fn daily_means(selection: &Selection<'_>, pollutant: Pollutant) -> Vec<DailyMean> {
    grouped_mean(
        selection.iter(),
        |row| (row.date(), row.is_weekend()),
        |row| row.value(pollutant),
    )
    .into_iter()
    .map(|((date, is_weekend), mean)| DailyMean {
        date,
        is_weekend,
        mean: mean.mean,
        count: mean.count,
    })
    .collect()
}

/// Compare weekday and weekend daily means with a pooled two-sample t-test
pub fn weekday_weekend(selection: &Selection<'_>, pollutant: Pollutant) -> Result<WeekdayWeekendEnvelope> {
    selection.require_rows()?;

    let daily_means = daily_means(selection, pollutant);
    let (weekend, weekday): (Vec<f64>, Vec<f64>) = {
        let (weekend, weekday): (Vec<&DailyMean>, Vec<&DailyMean>) =
            daily_means.iter().partition(|day| day.is_weekend);
        (
            weekend.iter().map(|day| day.mean).collect(),
            weekday.iter().map(|day| day.mean).collect(),
        )
    };

    let test = compare(&weekday, &weekend)?;

    let summarize = |sample: &[f64], label: &str| {
        SampleSummary::from_values(sample).ok_or_else(|| {
            AnalyticsError::InsufficientData(format!("no {} days for {}", label, selection.criteria()))
        })
    };

    Ok(WeekdayWeekendEnvelope {
        criteria: selection.criteria().clone(),
        pollutant,
        weekday: summarize(&weekday, "weekday")?,
        weekend: summarize(&weekend, "weekend")?,
        daily_means,
        test,
    })
}
