/// Linear model over feature columns
pub mod model;

/// The training and model configuration
pub mod config;

/// Sparse row batching
pub mod batcher;

/// Training and prediction behind the classifier capability
pub mod classifier;

pub use batcher::{Batcher, Input, Train};
pub use classifier::LogisticRegression;
pub use config::{Config, ModelConfig};
pub use model::{Model, ModelRecord};
