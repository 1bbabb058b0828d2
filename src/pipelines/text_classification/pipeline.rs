use log::info;

use crate::{features::FeatureExtractor, pipelines::PipelineError};

use super::{documents_and_labels, Classifier, Item};

/// Text Classification Pipeline
///
/// Chains an extractor stage (a single extractor or a [`crate::features::FeatureUnion`]) with a
/// classifier. The feature space is fitted on the training corpus only and frozen afterwards:
/// `predict` transforms with the fitted extractor and never refits it.
pub struct ClassificationPipeline<E, C> {
    extractor: E,
    classifier: C,
    fitted: bool,
}

impl<E: FeatureExtractor, C: Classifier> ClassificationPipeline<E, C> {
    /// Create an unfitted pipeline
    pub fn new(extractor: E, classifier: C) -> Self {
        Self {
            extractor,
            classifier,
            fitted: false,
        }
    }

    /// Fit the extractor stage, then the classifier, on a labelled corpus
    pub fn fit<I: Item>(&mut self, items: &[I]) -> Result<(), PipelineError> {
        let (documents, labels) = documents_and_labels(items);

        self.fitted = false;

        let features = self.extractor.fit_transform(&documents)?;

        info!(
            "Extracted {} features for {} training documents",
            features.width(),
            features.rows()
        );

        self.classifier.fit(&features, &labels)?;
        self.fitted = true;

        Ok(())
    }

    /// Predict one label per document, in document order
    pub fn predict(&self, documents: &[String]) -> Result<Vec<String>, PipelineError> {
        if !self.fitted {
            return Err(PipelineError::NotFitted);
        }

        let features = self.extractor.transform(documents)?;

        Ok(self.classifier.predict(&features)?)
    }

    /// Predict the labels of a corpus of items, in corpus order
    pub fn predict_items<I: Item>(&self, items: &[I]) -> Result<Vec<String>, PipelineError> {
        let documents: Vec<String> = items.iter().map(|item| item.input().to_string()).collect();

        self.predict(&documents)
    }

    /// The extractor stage
    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// The classifier
    pub fn classifier(&self) -> &C {
        &self.classifier
    }
}
