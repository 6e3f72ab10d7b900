use crate::models::Pollutant;

/// Cell contents treated as a missing measurement
pub const MISSING_VALUE_MARKERS: [&str; 5] = ["", "NA", "N/A", "NaN", "nan"];

/// Day-of-week indices (Monday = 0) that count as weekend
pub const WEEKEND_DAYS: [u8; 2] = [5, 6];

/// Default pollutant per request shape
pub const DEFAULT_HOURLY_POLLUTANT: Pollutant = Pollutant::Pm25;
pub const DEFAULT_STATION_POLLUTANT: Pollutant = Pollutant::Pm10;
pub const DEFAULT_COMPARISON_POLLUTANT: Pollutant = Pollutant::Pm25;
pub const DEFAULT_RAIN_POLLUTANTS: [Pollutant; 2] =
    [Pollutant::Pm25, Pollutant::So2];

/// Two-sample tests need a variance on each side
pub const MIN_SAMPLE_SIZE: usize = 2;

pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

/// File names
pub const CONFIG_FILE: &str = "airq.toml";
pub const CSV_EXTENSION: &str = "csv";
pub const ZIP_EXTENSION: &str = "zip";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "AIRQ";

/// Files at least this large are memory-mapped instead of read into memory
pub const MMAP_THRESHOLD_BYTES: u64 = 64 * 1024 * 1024;
