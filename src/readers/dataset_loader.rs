use crate::error::{AnalyticsError, Result};
use crate::models::{ObservationRecord, ObservationTable};
use crate::processors::FeatureDeriver;
use crate::readers::ObservationReader;
use crate::utils::constants::{CSV_EXTENSION, MMAP_THRESHOLD_BYTES, ZIP_EXTENSION};
use crate::utils::progress::ProgressReporter;
use rayon::prelude::*;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::ZipArchive;

/// Where a dataset comes from
#[derive(Debug, Clone)]
pub enum DataSource {
    /// A CSV file, a directory of CSV files, or a `.zip` archive of CSV files
    Path(PathBuf),
    /// CSV content already in memory
    Buffer { name: String, bytes: Vec<u8> },
}

impl DataSource {
    pub fn name(&self) -> String {
        match self {
            DataSource::Path(path) => path.display().to_string(),
            DataSource::Buffer { name, .. } => name.clone(),
        }
    }
}

impl From<PathBuf> for DataSource {
    fn from(path: PathBuf) -> Self {
        DataSource::Path(path)
    }
}

impl From<&Path> for DataSource {
    fn from(path: &Path) -> Self {
        DataSource::Path(path.to_path_buf())
    }
}

/// Loads a dataset and derives its calendar features
pub struct DatasetLoader {
    max_workers: usize,
}

impl DatasetLoader {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
        }
    }

    pub fn load(
        &self,
        source: &DataSource,
        progress: Option<&ProgressReporter>,
    ) -> Result<ObservationTable> {
        let origin = source.name();
        if let Some(p) = progress {
            p.set_message(&format!("Reading {}...", origin));
        }

        let records = match source {
            DataSource::Path(path) => self.read_path(path)?,
            DataSource::Buffer { name, bytes } => ObservationReader::new()
                .read_bytes(bytes)
                .map_err(|e| as_load_error(name, e))?,
        };

        if records.is_empty() {
            return Err(AnalyticsError::load(&origin, "dataset contains no observations"));
        }

        if let Some(p) = progress {
            p.set_message("Deriving calendar features...");
        }
        let table = FeatureDeriver::new().derive_table(records)?;

        info!(source = %origin, rows = table.len(), "dataset loaded");
        if let Some(p) = progress {
            p.finish_with_message(&format!("Loaded {} observations", table.len()));
        }

        Ok(table)
    }

    fn read_path(&self, path: &Path) -> Result<Vec<ObservationRecord>> {
        if !path.exists() {
            return Err(AnalyticsError::load(path.display(), "no such file or directory"));
        }

        if path.is_dir() {
            self.read_directory(path)
        } else if has_extension(path, ZIP_EXTENSION) {
            self.read_archive(path)
        } else {
            read_file(path)
        }
    }

    /// Read every CSV file in a directory in parallel, concatenated in file-name order
    fn read_directory(&self, dir: &Path) -> Result<Vec<ObservationRecord>> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| as_load_error(dir.display(), e.into()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && has_extension(path, CSV_EXTENSION))
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(AnalyticsError::load(dir.display(), "directory contains no CSV files"));
        }
        debug!(dir = %dir.display(), files = files.len(), "reading CSV directory");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| AnalyticsError::load(dir.display(), e))?;

        let per_file: Vec<Vec<ObservationRecord>> =
            pool.install(|| files.par_iter().map(|path| read_file(path)).collect::<Result<_>>())?;

        Ok(per_file.into_iter().flatten().collect())
    }

    /// Read every CSV entry of a zip archive, in entry-name order
    fn read_archive(&self, path: &Path) -> Result<Vec<ObservationRecord>> {
        let file = File::open(path).map_err(|e| as_load_error(path.display(), e.into()))?;
        let mut archive = ZipArchive::new(file).map_err(|e| as_load_error(path.display(), e.into()))?;

        let mut names: Vec<String> = archive
            .file_names()
            .filter(|name| !name.starts_with("__MACOSX/"))
            .filter(|name| has_extension(Path::new(name), CSV_EXTENSION))
            .map(str::to_string)
            .collect();
        names.sort();

        if names.is_empty() {
            return Err(AnalyticsError::load(path.display(), "archive contains no CSV files"));
        }
        debug!(archive = %path.display(), entries = names.len(), "reading CSV archive");

        let reader = ObservationReader::new();
        let mut records = Vec::new();
        for name in names {
            let origin = format!("{}:{}", path.display(), name);
            let mut bytes = Vec::new();
            archive
                .by_name(&name)
                .map_err(|e| as_load_error(&origin, e.into()))?
                .read_to_end(&mut bytes)
                .map_err(|e| as_load_error(&origin, e.into()))?;

            records.extend(reader.read_bytes(&bytes).map_err(|e| as_load_error(&origin, e))?);
        }

        Ok(records)
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

/// Load a dataset with default settings
pub fn load(source: &DataSource) -> Result<ObservationTable> {
    DatasetLoader::default().load(source, None)
}

fn read_file(path: &Path) -> Result<Vec<ObservationRecord>> {
    let use_mmap = std::fs::metadata(path)
        .map(|m| m.len() >= MMAP_THRESHOLD_BYTES)
        .unwrap_or(false);

    ObservationReader::with_mmap(use_mmap)
        .read_path(path)
        .map_err(|e| as_load_error(path.display(), e))
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case(extension))
}

/// I/O, CSV and archive failures become load failures; schema and range
/// errors keep their own kind.
fn as_load_error(origin: impl std::fmt::Display, err: AnalyticsError) -> AnalyticsError {
    match err {
        AnalyticsError::Io(e) => AnalyticsError::load(origin, e),
        AnalyticsError::Csv(e) => AnalyticsError::load(origin, e),
        AnalyticsError::Archive(e) => AnalyticsError::load(origin, e),
        other => other,
    }
}
