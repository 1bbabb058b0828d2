use crate::lexicons::LexiconError;

/// Sparse feature matrices
pub mod matrix;

/// Opinion lexicon polarity counts
pub mod polarity;

/// Compound sentiment scores
pub mod compound;

/// Negation-aware n-gram counts
pub mod ngram;

/// Column-wise composition of extractors
pub mod union;

pub use compound::CompoundSentimentExtractor;
pub use matrix::FeatureMatrix;
pub use ngram::NgramCountExtractor;
pub use polarity::LexiconPolarityExtractor;
pub use union::FeatureUnion;

/// Maps raw documents to a fixed-width numeric feature matrix, one row per document
///
/// `fit` is called once on the training documents before any `transform` (it is a no-op for
/// stateless extractors, and refits from scratch if called again). `transform` never mutates
/// fitted state, so a fitted extractor can be shared across threads.
pub trait FeatureExtractor: Send + Sync {
    /// Learn any feature space state from the training documents
    fn fit(&mut self, documents: &[String]) -> Result<(), FeatureError>;

    /// Map each document to a feature row, preserving document order
    fn transform(&self, documents: &[String]) -> Result<FeatureMatrix, FeatureError>;

    /// The number of feature columns produced by `transform`
    fn width(&self) -> Result<usize, FeatureError>;

    /// One name per feature column, in column order
    fn feature_names(&self) -> Result<Vec<String>, FeatureError>;

    /// Fit on the documents, then transform them
    fn fit_transform(&mut self, documents: &[String]) -> Result<FeatureMatrix, FeatureError> {
        self.fit(documents)?;
        self.transform(documents)
    }
}

/// The available feature extractors
pub enum Extractor {
    /// Positive and negative opinion word counts
    Polarity(LexiconPolarityExtractor),

    /// Negative, neutral, positive and compound sentiment scores
    Compound(CompoundSentimentExtractor),

    /// N-gram counts over a fitted vocabulary
    Ngram(NgramCountExtractor),
}

impl Extractor {
    fn as_dyn(&self) -> &dyn FeatureExtractor {
        match self {
            Extractor::Polarity(extractor) => extractor,
            Extractor::Compound(extractor) => extractor,
            Extractor::Ngram(extractor) => extractor,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn FeatureExtractor {
        match self {
            Extractor::Polarity(extractor) => extractor,
            Extractor::Compound(extractor) => extractor,
            Extractor::Ngram(extractor) => extractor,
        }
    }
}

impl FeatureExtractor for Extractor {
    fn fit(&mut self, documents: &[String]) -> Result<(), FeatureError> {
        self.as_dyn_mut().fit(documents)
    }

    fn transform(&self, documents: &[String]) -> Result<FeatureMatrix, FeatureError> {
        self.as_dyn().transform(documents)
    }

    fn width(&self) -> Result<usize, FeatureError> {
        self.as_dyn().width()
    }

    fn feature_names(&self) -> Result<Vec<String>, FeatureError> {
        self.as_dyn().feature_names()
    }
}

impl From<LexiconPolarityExtractor> for Extractor {
    fn from(extractor: LexiconPolarityExtractor) -> Self {
        Extractor::Polarity(extractor)
    }
}

impl From<CompoundSentimentExtractor> for Extractor {
    fn from(extractor: CompoundSentimentExtractor) -> Self {
        Extractor::Compound(extractor)
    }
}

impl From<NgramCountExtractor> for Extractor {
    fn from(extractor: NgramCountExtractor) -> Self {
        Extractor::Ngram(extractor)
    }
}

/// Feature Error
#[derive(thiserror::Error, Debug)]
pub enum FeatureError {
    /// A stateful extractor was used before `fit`
    #[error("{0} must be fit before calling transform")]
    Unfitted(&'static str),

    /// An extractor produced output inconsistent with its declared shape
    #[error("internal consistency error: {0}")]
    InternalConsistency(String),

    /// The extractor configuration is invalid
    #[error("invalid extractor configuration: {0}")]
    InvalidConfig(String),

    /// A lexicon resource could not be loaded
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
}
