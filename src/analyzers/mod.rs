pub mod air_quality_analyzer;
pub mod comparator;
pub mod dataset_overview;
mod grouped_mean;
pub mod hourly;
pub mod rain_effect;
pub mod station_ranking;
pub mod weekday_weekend;

pub use air_quality_analyzer::{AirQualityAnalyzer, DashboardReport};
pub use comparator::compare;
pub use dataset_overview::DatasetOverview;
pub use hourly::hourly_profile;
pub use rain_effect::rain_effect;
pub use station_ranking::station_ranking;
pub use weekday_weekend::{daily_means, weekday_weekend};
