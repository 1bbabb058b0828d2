/// CLI Indexes: Datasets
pub mod datasets;

/// CLI Indexes: Feature sets
pub mod features;

/// Benchmark configuration
pub mod benchmark;
