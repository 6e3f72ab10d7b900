use crate::error::{AnalyticsError, Result};
use crate::models::schema::validate_headers;
use crate::models::ObservationRecord;
use encoding_rs::{UTF_8, WINDOWS_1252};
use memmap2::Mmap;
use std::borrow::Cow;
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};

/// Parses air-quality CSV into raw records, checking the header first
pub struct ObservationReader {
    use_mmap: bool,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Read every record of a CSV file
    pub fn read_path(&self, path: &Path) -> Result<Vec<ObservationRecord>> {
        let file = File::open(path)?;
        let records = if self.use_mmap {
            let mmap = unsafe { Mmap::map(&file)? };
            self.read_bytes(&mmap)?
        } else {
            let bytes = std::fs::read(path)?;
            self.read_bytes(&bytes)?
        };

        debug!(path = %path.display(), records = records.len(), "read observations");
        Ok(records)
    }

    /// Read records from raw CSV bytes, UTF-8 (with or without BOM) or Windows-1252
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<Vec<ObservationRecord>> {
        let text = decode(bytes);
        self.read_str(&text)
    }

    pub fn read_str(&self, text: &str) -> Result<Vec<ObservationRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        validate_headers(headers.iter())?;

        reader
            .deserialize::<ObservationRecord>()
            .map(|row| row.map_err(AnalyticsError::from))
            .collect()
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return text;
    }

    warn!("input is not valid UTF-8, decoding as Windows-1252");
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text
}
