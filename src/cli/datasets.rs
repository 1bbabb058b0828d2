use std::fmt::Display;

use crate::datasets::{imdb, semeval};

/// The Dataset enum
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Dataset {
    /// SemEval Twitter sentiment
    SemEval,

    /// IMDB labelled movie reviews
    Imdb,
}

impl TryFrom<&str> for Dataset {
    type Error = DatasetError;

    /// Try to convert a string to a Dataset
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            name if name == semeval::DATASET => Ok(Dataset::SemEval),
            name if name == imdb::DATASET => Ok(Dataset::Imdb),
            _ => Err(Self::Error::Unknown(value.to_string())),
        }
    }
}

impl Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Dataset::SemEval => semeval::DATASET,
            Dataset::Imdb => imdb::DATASET,
        };

        write!(f, "{}", name)
    }
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// No dataset found for the given string
    #[error("no dataset found for {0}")]
    Unknown(String),
}
