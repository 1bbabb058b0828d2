use std::path::PathBuf;

/// Bing Liu's opinion lexicon (positive and negative word lists)
pub mod opinion;

/// Sentence-level sentiment scoring
pub mod scorer;

/// Valence lexicon and the rule-based valence scorer
pub mod valence;

pub use opinion::{OpinionLexicon, Polarity};
pub use scorer::{PolarityScores, SentimentScorer};
pub use valence::{ValenceLexicon, ValenceScorer};

/// Lexicon Error
#[derive(thiserror::Error, Debug)]
pub enum LexiconError {
    /// The lexicon resource could not be read
    #[error("unable to load lexicon resource {path}: {source}")]
    ResourceLoad {
        /// The path that failed to load
        path: PathBuf,

        /// The underlying I/O error
        source: std::io::Error,
    },

    /// A line of the lexicon resource could not be parsed
    #[error("malformed entry in {path} at line {line}: {content:?}")]
    Malformed {
        /// The resource being parsed
        path: PathBuf,

        /// The 1-based line number
        line: usize,

        /// The offending line
        content: String,
    },

    /// The lexicon resource contained no entries
    #[error("lexicon resource {0} contains no entries")]
    Empty(PathBuf),
}
