use crate::features::FeatureError;

/// Text Classification
pub mod text_classification;

pub use text_classification::{ClassificationPipeline, Classifier, ClassifierError, Item};

/// Pipeline Error
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// `predict` was called before `fit`
    #[error("the pipeline must be fit before calling predict")]
    NotFitted,

    /// The extractor stage failed
    #[error(transparent)]
    Feature(#[from] FeatureError),

    /// The classifier failed
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}
