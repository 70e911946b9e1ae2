mod mapping;
mod normalizer;
mod parser;

use crate::workflows::recruiting::{DataError, RecordStore};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug)]
pub enum CandidateImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Data(DataError),
}

impl std::fmt::Display for CandidateImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateImportError::Io(err) => write!(f, "failed to read candidate export: {}", err),
            CandidateImportError::Csv(err) => write!(f, "invalid candidate CSV data: {}", err),
            CandidateImportError::Data(err) => {
                write!(f, "candidate export does not fit the pipeline schema: {}", err)
            }
        }
    }
}

impl std::error::Error for CandidateImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CandidateImportError::Io(err) => Some(err),
            CandidateImportError::Csv(err) => Some(err),
            CandidateImportError::Data(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CandidateImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CandidateImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<DataError> for CandidateImportError {
    fn from(err: DataError) -> Self {
        Self::Data(err)
    }
}

/// Loads an ATS pipeline export (English or Spanish headers) into a [`RecordStore`].
pub struct CandidateImporter;

impl CandidateImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RecordStore, CandidateImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<RecordStore, CandidateImportError> {
        let parsed = parser::parse_records(reader)?;
        if parsed.coerced_cells > 0 {
            warn!(
                coerced_cells = parsed.coerced_cells,
                "unreadable cells in candidate export treated as missing"
            );
        }

        let store = RecordStore::new(parsed.records)?;
        debug!(records = store.len(), "loaded candidate export");
        Ok(store)
    }
}
