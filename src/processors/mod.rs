pub mod feature_deriver;
pub mod filter_stage;
pub mod quality_checker;

pub use feature_deriver::FeatureDeriver;
pub use filter_stage::{filter, Selection};
pub use quality_checker::{DataQualityReport, QualityChecker, StationQuality};
