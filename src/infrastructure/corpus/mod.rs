mod csv_loader;

pub use csv_loader::{load_reference_corpus, CorpusError};
