use std::{path::Path, sync::Arc};

use crate::{
    lexicons::{OpinionLexicon, Polarity},
    text::Tokenize,
};

use super::{FeatureError, FeatureExtractor, FeatureMatrix};

/// Counts the tokens of each document found in the positive and negative opinion word lists
pub struct LexiconPolarityExtractor {
    lexicon: OpinionLexicon,
    tokenizer: Arc<dyn Tokenize>,
}

impl LexiconPolarityExtractor {
    /// Create an extractor over an already loaded lexicon
    pub fn new(lexicon: OpinionLexicon, tokenizer: Arc<dyn Tokenize>) -> Self {
        Self { lexicon, tokenizer }
    }

    /// Load the opinion lexicon from a directory and create an extractor over it
    pub async fn load<P: AsRef<Path>>(
        lexicon_dir: P,
        tokenizer: Arc<dyn Tokenize>,
    ) -> Result<Self, FeatureError> {
        let lexicon = OpinionLexicon::load(lexicon_dir).await?;

        Ok(Self::new(lexicon, tokenizer))
    }

    /// Returns `[positive_count, negative_count]` for a single document
    pub fn score(&self, document: &str) -> [usize; 2] {
        let mut counts = [0, 0];

        for token in self.tokenizer.tokenize(document) {
            match self.lexicon.polarity(&token) {
                Some(Polarity::Positive) => counts[0] += 1,
                Some(Polarity::Negative) => counts[1] += 1,
                None => {}
            }
        }

        counts
    }
}

impl FeatureExtractor for LexiconPolarityExtractor {
    fn fit(&mut self, _documents: &[String]) -> Result<(), FeatureError> {
        Ok(())
    }

    fn transform(&self, documents: &[String]) -> Result<FeatureMatrix, FeatureError> {
        FeatureMatrix::from_dense_rows(
            2,
            documents
                .iter()
                .map(|document| self.score(document).map(|count| count as f32)),
        )
    }

    fn width(&self) -> Result<usize, FeatureError> {
        Ok(2)
    }

    fn feature_names(&self) -> Result<Vec<String>, FeatureError> {
        Ok(vec!["posCount".to_string(), "negCount".to_string()])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::text::TweetTokenizer;

    use super::*;

    fn extractor() -> LexiconPolarityExtractor {
        LexiconPolarityExtractor::new(
            OpinionLexicon::new(["great", "love"], ["bad", "limited"]),
            Arc::new(TweetTokenizer::default()),
        )
    }

    #[test]
    fn test_counts_positive_and_negative_tokens() {
        assert_eq!(
            extractor().score("Great place... seating was limited."),
            [1, 1]
        );
        assert_eq!(extractor().score("LOVE it, love it, bad timing"), [2, 1]);
    }

    #[test]
    fn test_shared_word_counts_as_positive() {
        let extractor = LexiconPolarityExtractor::new(
            OpinionLexicon::new(["super"], ["super"]),
            Arc::new(TweetTokenizer::default()),
        );

        assert_eq!(extractor.score("super super"), [2, 0]);
    }

    #[test]
    fn test_transform_keeps_document_order() {
        let mut extractor = extractor();
        let documents = vec![
            "bad bad bad".to_string(),
            String::new(),
            "great".to_string(),
        ];

        let matrix = extractor.fit_transform(&documents).unwrap();

        assert_eq!(matrix.rows(), 3);
        assert_eq!(
            matrix.to_dense(),
            vec![vec![0.0, 3.0], vec![0.0, 0.0], vec![1.0, 0.0]]
        );
    }
}
