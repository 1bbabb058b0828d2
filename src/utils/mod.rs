/// File utilities
pub mod files;

/// Hugging Face utilities
pub mod hugging_face;

/// Utilities for classification tasks
pub mod classes;
