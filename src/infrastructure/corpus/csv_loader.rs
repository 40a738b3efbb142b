use std::path::Path;

use crate::domain::ReferenceCorpus;

/// Reads the reference medicine catalogue from a CSV file at process start.
///
/// The header row must contain a `name` column; rows are taken in file order
/// (verification tie-breaking depends on it). Blank names are skipped. Every
/// failure here is fatal: the process must not serve requests without a
/// usable corpus.
pub fn load_reference_corpus(path: &Path) -> Result<ReferenceCorpus, CorpusError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| CorpusError::Unreadable(path.display().to_string(), e))?;

    let headers = reader
        .headers()
        .map_err(|e| CorpusError::Unreadable(path.display().to_string(), e))?;
    let name_index = headers
        .iter()
        .position(|h| h.trim() == "name")
        .ok_or_else(|| CorpusError::MissingNameColumn(path.display().to_string()))?;

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CorpusError::Unreadable(path.display().to_string(), e))?;
        if let Some(name) = record.get(name_index) {
            let name = name.trim();
            if !name.is_empty() {
                names.push(name.to_string());
            }
        }
    }

    if names.is_empty() {
        return Err(CorpusError::Empty(path.display().to_string()));
    }

    Ok(ReferenceCorpus::new(names))
}

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("corpus file {0} unreadable: {1}")]
    Unreadable(String, #[source] csv::Error),
    #[error("corpus file {0} has no 'name' column")]
    MissingNameColumn(String),
    #[error("corpus file {0} contains no usable medicine names")]
    Empty(String),
}
