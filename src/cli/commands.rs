use crate::analyzers::{AirQualityAnalyzer, DatasetOverview};
use crate::cli::args::{Cli, Commands, OutputFormat, SelectionArgs};
use crate::config::AnalyticsConfig;
use crate::error::{self, AnalyticsError};
use crate::models::{FilterCriteria, Pollutant};
use crate::processors::QualityChecker;
use crate::readers::{DataSource, DatasetLoader};
use crate::utils::progress::ProgressReporter;
use anyhow::{anyhow, Context};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AnalyticsConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let data_path = cli
        .data
        .clone()
        .or_else(|| config.data_path.clone())
        .ok_or_else(|| anyhow!("No dataset given; pass --data or set data_path in the configuration"))?;

    let progress = ProgressReporter::new_spinner("Loading dataset...", cli.format == OutputFormat::Json);
    let table = DatasetLoader::new(config.max_workers).load(&DataSource::from(data_path), Some(&progress))?;
    progress.finish_and_clear();

    let analyzer = AirQualityAnalyzer::new(&table);
    let overview = analyzer.overview();
    let format = cli.format;

    match cli.command {
        Commands::Info => {
            let quality = analyzer.quality_report();
            match format {
                OutputFormat::Text => {
                    println!("{}", overview.summary());
                    println!("\n{}", QualityChecker::new().generate_summary(&quality));
                }
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({
                            "overview": overview,
                            "quality": quality,
                        }))?
                    );
                }
            }
        }

        Commands::Hourly {
            selection,
            pollutant,
        } => {
            let criteria = resolve_criteria(&selection, &config, &overview)?;
            let envelope = analyzer
                .hourly(&criteria, Some(&pollutant))
                .map_err(explain)?;
            emit(format, &envelope, || envelope.summary())?;
        }

        Commands::Rain {
            selection,
            pollutants,
        } => {
            let criteria = resolve_criteria(&selection, &config, &overview)?;
            let names: Vec<&str> = pollutants.iter().map(String::as_str).collect();
            let envelope = analyzer
                .rain_effect(&criteria, &names)
                .map_err(explain)?;
            emit(format, &envelope, || envelope.summary())?;
        }

        Commands::Stations {
            selection,
            pollutant,
        } => {
            let criteria = resolve_criteria(&selection, &config, &overview)?;
            let envelope = analyzer
                .station_ranking(&criteria, Some(&pollutant))
                .map_err(explain)?;
            emit(format, &envelope, || envelope.summary())?;
        }

        Commands::Compare {
            selection,
            pollutant,
        } => {
            let criteria = resolve_criteria(&selection, &config, &overview)?;
            let envelope = analyzer
                .weekday_weekend(&criteria, Some(&pollutant))
                .map_err(explain)?;
            emit(format, &envelope, || {
                envelope.summary_at(config.significance_level)
            })?;
        }

        Commands::Report {
            selection,
            pollutant,
        } => {
            let criteria = resolve_criteria(&selection, &config, &overview)?;
            // Validate the selector up front so a typo is not reported as a failed view
            Pollutant::from_column(&pollutant)?;
            let report = analyzer.report(&criteria, Some(&pollutant));

            match format {
                OutputFormat::Text => {
                    println!("=== Report for {} ===", report.criteria);
                    print_section(report.hourly.as_ref().map(|e| e.summary()));
                    print_section(report.rain_effect.as_ref().map(|e| e.summary()));
                    print_section(report.station_ranking.as_ref().map(|e| e.summary()));
                    print_section(
                        report
                            .weekday_weekend
                            .as_ref()
                            .map(|e| e.summary_at(config.significance_level)),
                    );
                }
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({
                            "criteria": report.criteria,
                            "hourly": outcome_json(&report.hourly)?,
                            "rain_effect": outcome_json(&report.rain_effect)?,
                            "station_ranking": outcome_json(&report.station_ranking)?,
                            "weekday_weekend": outcome_json(&report.weekday_weekend)?,
                        }))?
                    );
                }
            }
        }
    }

    Ok(())
}

/// Flags first, then configuration defaults, then the first year and station
/// in the dataset
fn resolve_criteria(
    selection: &SelectionArgs,
    config: &AnalyticsConfig,
    overview: &DatasetOverview,
) -> anyhow::Result<FilterCriteria> {
    let fallback = overview.default_criteria();

    let year = selection
        .year
        .or(config.default_year)
        .or_else(|| fallback.as_ref().map(FilterCriteria::year))
        .ok_or_else(|| anyhow!("Dataset has no years to select from"))?;

    let stations: Vec<String> = if !selection.stations.is_empty() {
        selection.stations.clone()
    } else if !config.default_stations.is_empty() {
        config.default_stations.clone()
    } else {
        fallback
            .map(|c| c.stations().iter().cloned().collect())
            .unwrap_or_default()
    };

    for station in &stations {
        if !overview.stations.contains(station) {
            warn!(%station, "station does not appear in the dataset");
        }
    }

    Ok(FilterCriteria::new(year, stations))
}

fn explain(err: AnalyticsError) -> anyhow::Error {
    if err.is_recoverable() {
        anyhow::Error::new(err).context("Nothing to analyse; choose a different year or station")
    } else {
        err.into()
    }
}

fn emit<T, F>(format: OutputFormat, envelope: &T, summary: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    match format {
        OutputFormat::Text => println!("{}", summary()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(envelope)?),
    }
    Ok(())
}

fn print_section(section: Result<String, &AnalyticsError>) {
    match section {
        Ok(summary) => println!("\n{}", summary),
        Err(e) => println!("\nUnavailable: {}", e),
    }
}

fn outcome_json<T: Serialize>(outcome: &error::Result<T>) -> anyhow::Result<serde_json::Value> {
    Ok(match outcome {
        Ok(envelope) => serde_json::to_value(envelope)?,
        Err(e) => json!({ "error": e.to_string() }),
    })
}
