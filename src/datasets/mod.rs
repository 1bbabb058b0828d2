use std::path::PathBuf;

use async_trait::async_trait;

/// The SemEval Twitter sentiment dataset
pub mod semeval;

/// The IMDB labelled movie review dataset
pub mod imdb;

/// A dataset which can be loaded
#[async_trait]
pub trait LoadableDataset<I>: burn::data::dataset::Dataset<I> {
    /// Load the dataset for a mode (either "train" or "test")
    async fn load(data_dir: &str, mode: &str) -> Result<Self, DatasetError>
    where
        Self: std::marker::Sized;
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The corpus file could not be read
    #[error("unable to read dataset file {path}: {source}")]
    Read {
        /// The corpus file
        path: PathBuf,

        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The corpus file could not be parsed
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A row is missing its label or text column
    #[error("row {row} of {path} has no column {column}")]
    MissingColumn {
        /// The corpus file
        path: PathBuf,

        /// The 1-based row number
        row: usize,

        /// The 1-based column number
        column: usize,
    },

    /// The requested split does not exist
    #[error("unknown dataset mode {0}, expected train or test")]
    UnknownMode(String),

    /// The corpus contained no rows
    #[error("dataset file {0} contains no rows")]
    Empty(PathBuf),
}

/// Read a corpus file, mapping I/O failures to [`DatasetError::Read`]
pub(crate) async fn read_corpus(path: PathBuf) -> Result<(PathBuf, String), DatasetError> {
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Ok((path, content)),
        Err(source) => Err(DatasetError::Read { path, source }),
    }
}
