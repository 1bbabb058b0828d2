use std::collections::{BTreeSet, HashMap};

use burn::{
    data::dataloader::batcher::Batcher as _,
    module::AutodiffModule,
    optim::{AdamWConfig, GradientsParams, Optimizer},
    tensor::{
        backend::{AutodiffBackend, Backend},
        ElementConversion,
    },
};
use log::{debug, info};
use sprs::CsVecView;

use crate::{
    features::FeatureMatrix,
    pipelines::{Classifier, ClassifierError},
    utils::classes::invert_map,
};

use super::{
    batcher::{Batcher, Input, Train},
    config::{Config, ModelConfig},
    model::Model,
};

/// The state learned by `fit`
struct Fitted<B: Backend> {
    model: Model<B>,
    config: ModelConfig,
}

/// A multinomial logistic regression classifier trained with AdamW on a Burn autodiff backend
pub struct LogisticRegression<B: AutodiffBackend> {
    config: Config,
    device: B::Device,
    fitted: Option<Fitted<B::InnerBackend>>,
}

impl<B: AutodiffBackend> LogisticRegression<B> {
    /// Create an unfitted classifier
    pub fn new(config: Config, device: B::Device) -> Self {
        Self {
            config,
            device,
            fitted: None,
        }
    }

    /// The training configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The class labels in class id order, once fitted
    pub fn labels(&self) -> Option<Vec<String>> {
        self.fitted.as_ref().map(|fitted| {
            (0..fitted.config.id2label.len())
                .filter_map(|id| fitted.config.id2label.get(&id).cloned())
                .collect()
        })
    }

    /// Class probabilities per row, columns in class id order
    pub fn probabilities(&self, features: &FeatureMatrix) -> Result<Vec<Vec<f32>>, ClassifierError> {
        let fitted = self.fitted.as_ref().ok_or(ClassifierError::NotFitted)?;

        if features.width() != fitted.config.width {
            return Err(ClassifierError::WidthMismatch {
                expected: fitted.config.width,
                actual: features.width(),
            });
        }

        let n_classes = fitted.model.n_classes;
        let batcher = Batcher::<B::InnerBackend>::new(self.device.clone());
        let rows = sparse_rows(features);

        let mut probabilities = Vec::with_capacity(rows.len());

        for chunk in rows.chunks(self.config.batch_size.max(1)) {
            let input: Input<B::InnerBackend> = batcher.batch(chunk.to_vec());

            let values = fitted.model.infer(input).into_data().convert::<f32>().value;

            probabilities.extend(values.chunks(n_classes).map(<[f32]>::to_vec));
        }

        Ok(probabilities)
    }
}

impl<B: AutodiffBackend> Classifier for LogisticRegression<B> {
    fn fit(&mut self, features: &FeatureMatrix, labels: &[String]) -> Result<(), ClassifierError> {
        if features.rows() != labels.len() {
            return Err(ClassifierError::LabelCount {
                rows: features.rows(),
                labels: labels.len(),
            });
        }

        let classes: BTreeSet<&String> = labels.iter().collect();

        if classes.len() < 2 {
            return Err(ClassifierError::TooFewClasses(classes.len()));
        }

        if features.width() == 0 {
            return Err(ClassifierError::NoFeatures);
        }

        let id2label: HashMap<usize, String> = classes
            .into_iter()
            .cloned()
            .enumerate()
            .collect();
        let label2id: HashMap<String, usize> = invert_map(id2label.clone());

        let model_config = ModelConfig::new(features.width(), id2label);

        let batcher = Batcher::<B>::new(self.device.clone());

        let items: Vec<(CsVecView<'_, f32>, usize)> = sparse_rows(features)
            .into_iter()
            .zip(labels.iter().map(|label| label2id[label]))
            .collect();

        let mut model: Model<B> = model_config.init(&self.device);
        let mut optimizer = AdamWConfig::new()
            .with_epsilon(self.config.adam_epsilon)
            .with_weight_decay(self.config.weight_decay)
            .init();

        info!(
            "Training logistic regression on {} rows, {} features, {} classes",
            items.len(),
            model_config.width,
            model.n_classes
        );

        for epoch in 1..=self.config.num_epochs {
            let mut total_loss = 0.0;
            let mut batches = 0;

            for chunk in items.chunks(self.config.batch_size.max(1)) {
                let Train { input, targets } = batcher.batch(chunk.to_vec());

                let output = model.forward(input, targets);
                let loss = output.loss;

                total_loss += loss.clone().into_scalar().elem::<f64>();
                batches += 1;

                let grads = GradientsParams::from_grads(loss.backward(), &model);

                model = optimizer.step(self.config.learning_rate, model, grads);
            }

            info!(
                "Epoch {}/{}: mean loss {:.5}",
                epoch,
                self.config.num_epochs,
                total_loss / batches as f64
            );
        }

        debug!("Fitted classes: {:?}", model_config.id2label);

        self.fitted = Some(Fitted {
            model: model.valid(),
            config: model_config,
        });

        Ok(())
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<String>, ClassifierError> {
        let probabilities = self.probabilities(features)?;
        let fitted = self.fitted.as_ref().ok_or(ClassifierError::NotFitted)?;

        probabilities
            .iter()
            .map(|row| {
                // first maximum wins, so ties resolve to the lowest class id
                let class_id = row
                    .iter()
                    .enumerate()
                    .fold(0, |best, (id, p)| if *p > row[best] { id } else { best });

                fitted
                    .config
                    .id2label
                    .get(&class_id)
                    .cloned()
                    .ok_or(ClassifierError::NotFitted)
            })
            .collect()
    }
}

fn sparse_rows(features: &FeatureMatrix) -> Vec<CsVecView<'_, f32>> {
    (0..features.rows())
        .filter_map(|row| features.row(row))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::models::DefaultBackend;

    use super::*;

    fn corpus() -> (FeatureMatrix, Vec<String>) {
        let rows = vec![
            [3.0, 0.0],
            [0.0, 3.0],
            [2.0, 0.0],
            [0.0, 2.0],
            [4.0, 1.0],
            [1.0, 4.0],
            [1.0, 0.0],
            [0.0, 1.0],
        ];
        let labels = ["pos", "neg", "pos", "neg", "pos", "neg", "pos", "neg"]
            .iter()
            .map(|label| label.to_string())
            .collect();

        (FeatureMatrix::from_dense_rows(2, rows).unwrap(), labels)
    }

    fn classifier() -> LogisticRegression<DefaultBackend> {
        LogisticRegression::new(
            Config::new()
                .with_batch_size(4)
                .with_num_epochs(60)
                .with_learning_rate(0.1),
            Default::default(),
        )
    }

    #[test]
    fn test_learns_a_separable_corpus() {
        let (features, labels) = corpus();
        let mut classifier = classifier();

        classifier.fit(&features, &labels).unwrap();

        assert_eq!(classifier.predict(&features).unwrap(), labels);
        assert_eq!(
            classifier.labels().unwrap(),
            vec!["neg".to_string(), "pos".to_string()]
        );

        let unseen = FeatureMatrix::from_dense_rows(2, vec![[5.0, 0.0], [0.0, 5.0]]).unwrap();

        assert_eq!(classifier.predict(&unseen).unwrap(), vec!["pos", "neg"]);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (features, labels) = corpus();
        let mut classifier = classifier();

        classifier.fit(&features, &labels).unwrap();

        for row in classifier.probabilities(&features).unwrap() {
            assert_eq!(row.len(), 2);
            assert!((row.iter().sum::<f32>() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (features, labels) = corpus();

        let mut first = classifier();
        let mut second = classifier();
        first.fit(&features, &labels).unwrap();
        second.fit(&features, &labels).unwrap();

        assert_eq!(
            first.probabilities(&features).unwrap(),
            second.probabilities(&features).unwrap()
        );
        assert_eq!(
            first.predict(&features).unwrap(),
            first.predict(&features).unwrap()
        );
    }

    #[test]
    fn test_trains_on_wide_sparse_features() {
        let width = 100_000;
        let rows: Vec<Vec<(usize, f32)>> = (0..8)
            .map(|i| {
                if i % 2 == 0 {
                    vec![(3, 1.0), (10_000 + i, 1.0)]
                } else {
                    vec![(width - 1, 1.0), (10_000 + i, 1.0)]
                }
            })
            .collect();
        let labels: Vec<String> = (0..8)
            .map(|i| if i % 2 == 0 { "pos" } else { "neg" }.to_string())
            .collect();
        let features = FeatureMatrix::from_sparse_rows(width, rows).unwrap();

        let mut classifier = classifier();
        classifier.fit(&features, &labels).unwrap();

        let unseen =
            FeatureMatrix::from_sparse_rows(width, vec![vec![(3, 1.0)], vec![(width - 1, 1.0)]])
                .unwrap();

        assert_eq!(classifier.predict(&unseen).unwrap(), vec!["pos", "neg"]);
    }

    #[test]
    fn test_empty_rows_get_a_prediction() {
        let (features, labels) = corpus();
        let mut classifier = classifier();
        classifier.fit(&features, &labels).unwrap();

        let empty = FeatureMatrix::from_sparse_rows(2, vec![vec![], vec![]]).unwrap();
        let probabilities = classifier.probabilities(&empty).unwrap();

        assert_eq!(probabilities.len(), 2);
        assert!((probabilities[0].iter().sum::<f32>() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let (features, _) = corpus();

        let result = classifier().predict(&features);

        assert!(matches!(result, Err(ClassifierError::NotFitted)));
    }

    #[test]
    fn test_single_class_is_rejected() {
        let features = FeatureMatrix::from_dense_rows(1, vec![[1.0], [2.0]]).unwrap();
        let labels = vec!["pos".to_string(), "pos".to_string()];

        let result = classifier().fit(&features, &labels);

        assert!(matches!(result, Err(ClassifierError::TooFewClasses(1))));
    }

    #[test]
    fn test_label_count_must_match_rows() {
        let (features, mut labels) = corpus();
        labels.pop();

        let result = classifier().fit(&features, &labels);

        assert!(matches!(result, Err(ClassifierError::LabelCount { .. })));
    }

    #[test]
    fn test_width_mismatch_is_rejected() {
        let (features, labels) = corpus();
        let mut classifier = classifier();
        classifier.fit(&features, &labels).unwrap();

        let wider = FeatureMatrix::from_dense_rows(3, vec![[1.0, 0.0, 0.0]]).unwrap();

        assert!(matches!(
            classifier.predict(&wider),
            Err(ClassifierError::WidthMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }
}
