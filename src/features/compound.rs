use std::{path::Path, sync::Arc};

use crate::lexicons::{scorer::DIMENSIONS, SentimentScorer, ValenceLexicon, ValenceScorer};

use super::{FeatureError, FeatureExtractor, FeatureMatrix};

/// Emits the negative, neutral, positive and compound scores of a sentence-level sentiment scorer
pub struct CompoundSentimentExtractor {
    scorer: Arc<dyn SentimentScorer>,
}

impl CompoundSentimentExtractor {
    /// Create an extractor around any sentiment scorer
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    /// Load a valence lexicon and create an extractor around a [`ValenceScorer`] for it
    pub async fn load<P: AsRef<Path>>(lexicon_path: P) -> Result<Self, FeatureError> {
        let lexicon = ValenceLexicon::load(lexicon_path).await?;

        Ok(Self::new(Arc::new(ValenceScorer::new(lexicon))))
    }
}

impl FeatureExtractor for CompoundSentimentExtractor {
    fn fit(&mut self, _documents: &[String]) -> Result<(), FeatureError> {
        Ok(())
    }

    fn transform(&self, documents: &[String]) -> Result<FeatureMatrix, FeatureError> {
        FeatureMatrix::from_dense_rows(
            DIMENSIONS.len(),
            documents.iter().map(|document| {
                self.scorer
                    .polarity_scores(document)
                    .to_array()
                    .map(|score| score as f32)
            }),
        )
    }

    fn width(&self) -> Result<usize, FeatureError> {
        Ok(DIMENSIONS.len())
    }

    fn feature_names(&self) -> Result<Vec<String>, FeatureError> {
        Ok(DIMENSIONS.iter().map(|name| name.to_string()).collect())
    }
}
