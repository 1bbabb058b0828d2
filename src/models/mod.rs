use burn::backend::{Autodiff, NdArray};

/// Multinomial logistic regression
pub mod logistic;

/// The CPU backend used by the binaries and tests
pub type DefaultBackend = Autodiff<NdArray>;
