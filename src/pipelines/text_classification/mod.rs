/// Text Classification Items
pub mod item;

/// The classifier capability
pub mod classifier;

/// Extractor + classifier composition
pub mod pipeline;

pub use classifier::{Classifier, ClassifierError};
pub use item::{documents_and_labels, Item};
pub use pipeline::ClassificationPipeline;
