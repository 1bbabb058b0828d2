//! # Burn Sentiment
#![forbid(unsafe_code)]

/// Tokenization and negation marking
pub mod text;

/// Sentiment lexicons and scorers
pub mod lexicons;

/// Feature extraction
pub mod features;

/// Models
pub mod models;

/// Pipelines
pub mod pipelines;

/// Datasets
pub mod datasets;

/// Evaluation metrics and reports
pub mod evaluation;

/// Utilities
pub mod utils;

/// CLI indexes and utilities
pub mod cli;

/// Error macros
#[macro_use]
extern crate anyhow;
