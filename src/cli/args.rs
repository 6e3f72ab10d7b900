use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "airq")]
#[command(about = "Air-quality statistics for multi-station pollutant time series")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "CSV file, directory of CSV files, or zip archive")]
    pub data: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Configuration file [default: airq.toml]")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Year and station selection shared by every analysis
#[derive(Debug, Clone, Args)]
pub struct SelectionArgs {
    #[arg(short, long, help = "Year to analyse [default: first year in the dataset]")]
    pub year: Option<i32>,

    #[arg(
        short,
        long = "station",
        help = "Station to include; repeat for several [default: first station]"
    )]
    pub stations: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show years, stations and data quality of the dataset
    Info,

    /// Mean concentration per hour of day and the peak hour
    Hourly {
        #[command(flatten)]
        selection: SelectionArgs,

        #[arg(short, long, default_value = "PM2.5")]
        pollutant: String,
    },

    /// Mean concentrations per rainfall category
    Rain {
        #[command(flatten)]
        selection: SelectionArgs,

        #[arg(short, long = "pollutant", help = "Pollutant to include; repeat for several [default: PM2.5 and SO2]")]
        pollutants: Vec<String>,
    },

    /// Rank stations by mean concentration
    Stations {
        #[command(flatten)]
        selection: SelectionArgs,

        #[arg(short, long, default_value = "PM10")]
        pollutant: String,
    },

    /// Compare weekday and weekend daily means with a t-test
    Compare {
        #[command(flatten)]
        selection: SelectionArgs,

        #[arg(short, long, default_value = "PM2.5")]
        pollutant: String,
    },

    /// Run every analysis for one selection
    Report {
        #[command(flatten)]
        selection: SelectionArgs,

        #[arg(
            short,
            long,
            default_value = "PM2.5",
            help = "Pollutant for the weekday/weekend comparison"
        )]
        pollutant: String,
    },
}
