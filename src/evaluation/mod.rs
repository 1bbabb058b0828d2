/// Label-level classification metrics
pub mod metrics;

/// The printable, serializable evaluation report
pub mod report;

pub use metrics::{ClassScores, ConfusionMatrix};
pub use report::Report;

/// Evaluation Error
#[derive(thiserror::Error, Debug)]
pub enum EvaluationError {
    /// Gold and predicted labels differ in length
    #[error("{gold} gold labels were given with {predicted} predictions")]
    LengthMismatch {
        /// Number of gold labels
        gold: usize,

        /// Number of predicted labels
        predicted: usize,
    },

    /// There is nothing to evaluate
    #[error("no labels to evaluate")]
    Empty,
}
