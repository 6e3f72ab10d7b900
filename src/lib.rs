//! Descriptive statistics over multi-station air-quality time series.
//!
//! A dataset is loaded once into an [`ObservationTable`], then each request
//! filters it by year and stations and computes one view: the hourly profile,
//! the effect of rainfall, a station ranking, or a weekday/weekend t-test.
//!
//! ```no_run
//! use airq_analytics::{load, AirQualityAnalyzer, DataSource, FilterCriteria};
//! use std::path::PathBuf;
//!
//! let table = load(&DataSource::from(PathBuf::from("PRSA_Data.zip")))?;
//! let analyzer = AirQualityAnalyzer::new(&table);
//! let criteria = FilterCriteria::new(2016, ["Dongsi", "Tiantan"]);
//!
//! let hourly = analyzer.hourly(&criteria, None)?;
//! println!("Peak at {:02}:00", hourly.peak_hour);
//! # Ok::<(), airq_analytics::AnalyticsError>(())
//! ```

pub mod analyzers;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;

pub use analyzers::{AirQualityAnalyzer, DashboardReport, DatasetOverview};
pub use config::AnalyticsConfig;
pub use error::{AnalyticsError, Result};
pub use models::{FilterCriteria, ObservationTable, Pollutant, RainCategory};
pub use readers::{load, DataSource, DatasetLoader};
