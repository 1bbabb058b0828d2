use crate::features::FeatureMatrix;

/// A classifier trained on a feature matrix and its labels
pub trait Classifier {
    /// Train on one labelled row per document
    fn fit(&mut self, features: &FeatureMatrix, labels: &[String]) -> Result<(), ClassifierError>;

    /// Predict one label per row, in row order
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<String>, ClassifierError>;
}

/// Classifier Error
#[derive(thiserror::Error, Debug)]
pub enum ClassifierError {
    /// `predict` was called before `fit`
    #[error("the classifier must be fit before calling predict")]
    NotFitted,

    /// Training needs at least two distinct labels
    #[error("at least two distinct labels are needed for training, found {0}")]
    TooFewClasses(usize),

    /// Training needs at least one feature column
    #[error("the feature matrix has no columns")]
    NoFeatures,

    /// The feature matrix and labels disagree on the number of documents
    #[error("{rows} feature rows were given with {labels} labels")]
    LabelCount {
        /// Rows in the feature matrix
        rows: usize,

        /// Number of labels
        labels: usize,
    },

    /// The feature matrix width differs from the width seen during training
    #[error("expected {expected} feature columns, found {actual}")]
    WidthMismatch {
        /// The width seen during training
        expected: usize,

        /// The width given to predict
        actual: usize,
    },
}
