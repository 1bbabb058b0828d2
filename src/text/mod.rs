/// Tokenizers
pub mod tokenizer;

/// Negation marking
pub mod negation;

pub use negation::{mark_negation, NEGATION_SUFFIX};
pub use tokenizer::{Tokenize, TweetTokenizer};
