pub mod dataset_loader;
pub mod observation_reader;

pub use dataset_loader::{load, DataSource, DatasetLoader};
pub use observation_reader::ObservationReader;
