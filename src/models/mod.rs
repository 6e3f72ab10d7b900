pub mod aggregate;
pub mod criteria;
pub mod envelope;
pub mod observation;
pub mod pollutant;
pub mod rain;
pub mod schema;

pub use aggregate::{DailyMean, GroupMean, RainEffectRow, SampleSummary, StationMean, TTestResult};
pub use criteria::FilterCriteria;
pub use envelope::{
    HourlyEnvelope, RainEffectEnvelope, StationRankingEnvelope, WeekdayWeekendEnvelope,
};
pub use observation::{Observation, ObservationRecord, ObservationTable, TemporalFeatures};
pub use pollutant::Pollutant;
pub use rain::{categorize, RainCategory, RAIN_THRESHOLDS};
