use serde::{Deserialize, Serialize};

/// The names of the polarity score dimensions, in canonical order
pub static DIMENSIONS: [&str; 4] = ["neg", "neu", "pos", "compound"];

/// Sentence-level polarity scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    /// Proportion of negative sentiment, in [0, 1]
    pub neg: f64,

    /// Proportion of neutral tokens, in [0, 1]
    pub neu: f64,

    /// Proportion of positive sentiment, in [0, 1]
    pub pos: f64,

    /// Normalized overall sentiment, in [-1, 1]
    pub compound: f64,
}

impl PolarityScores {
    /// The scores in canonical [`DIMENSIONS`] order
    pub fn to_array(&self) -> [f64; 4] {
        [self.neg, self.neu, self.pos, self.compound]
    }
}

/// The compound sentiment scorer collaborator
pub trait SentimentScorer: Send + Sync {
    /// Score a raw sentence
    fn polarity_scores(&self, text: &str) -> PolarityScores;
}
