use std::path::PathBuf;
use std::str::Utf8Error;

use thiserror::Error;

/// Everything that can go wrong while extracting a record. None of these
/// are recovered from; the binary reports them and exits.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot open {} as HDF5", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: hdf5::Error,
    },

    #[error("required dataset '{name}' is missing")]
    MissingDataset { name: String },

    #[error("dataset '{dataset}' has unsupported element type {descriptor}")]
    UnsupportedIdentifierType { dataset: String, descriptor: String },

    #[error("dataset '{dataset}': {detail}")]
    ShapeMismatch { dataset: String, detail: String },

    #[error("dataset '{dataset}' element {index} is not valid UTF-8")]
    Encoding {
        dataset: String,
        index: usize,
        #[source]
        source: Utf8Error,
    },

    #[error("failed to read dataset '{dataset}'")]
    Hdf5 {
        dataset: String,
        #[source]
        source: hdf5::Error,
    },
}

impl ExtractError {
    pub(crate) fn shape(dataset: &str, detail: impl Into<String>) -> Self {
        ExtractError::ShapeMismatch {
            dataset: dataset.to_string(),
            detail: detail.into(),
        }
    }
}
