use std::{path::Path, sync::Arc};

use burn::tensor::backend::AutodiffBackend;
use log::info;
use serde::Serialize;
use serde_json::Value;

use crate::{
    datasets::DatasetError,
    evaluation::{EvaluationError, Report},
    features::{ngram, FeatureError, FeatureExtractor},
    models::logistic::{self, LogisticRegression},
    pipelines::{ClassificationPipeline, Item, PipelineError},
    text::Tokenize,
};

use super::features::{FeatureSet, FeatureSetError};

/// Benchmark Configuration
#[derive(burn::config::Config)]
pub struct Config {
    /// The top-level data directory holding datasets and lexicons
    #[config(default = "String::from(\"data\")")]
    pub data_dir: String,

    /// The comma separated feature set to benchmark
    #[config(default = "String::from(\"ngram\")")]
    pub features: String,

    /// N-gram extractor settings
    #[config(default = "ngram::Config::new()")]
    pub ngram: ngram::Config,

    /// Classifier training settings
    #[config(default = "logistic::Config::new()")]
    pub classifier: logistic::Config,

    /// Seed for dataset splits
    #[config(default = 42)]
    pub seed: u64,
}

impl Config {
    /// Load a configuration file, as YAML for `.yaml`/`.yml` files and JSON otherwise
    pub async fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, BenchmarkError> {
        let path = path.as_ref();

        let content = tokio::fs::read_to_string(path).await?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "yaml" || ext == "yml");

        let overrides: Value = if is_yaml {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        // Fields missing from the file keep their defaults, nested configs included
        let mut merged = serde_json::to_value(Config::new())?;
        if !overrides.is_null() {
            merge(&mut merged, overrides);
        }

        Ok(serde_json::from_value(merged)?)
    }

    /// The configured feature set
    pub fn feature_set(&self) -> Result<FeatureSet, FeatureSetError> {
        self.features.parse()
    }
}

/// Deep-merge `overrides` into `base`, replacing everything but objects
fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}

/// The result of benchmarking one feature set
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// The feature set, e.g. `ngram,liu`
    pub features: String,

    /// The number of feature columns after fitting
    pub width: usize,

    /// Evaluation of the test predictions
    pub report: Report,
}

/// Fit a feature set and a logistic regression classifier on the training items, then evaluate
/// the predictions for the test items
pub async fn run<B, I>(
    config: &Config,
    feature_set: &FeatureSet,
    tokenizer: Arc<dyn Tokenize>,
    train: &[I],
    test: &[I],
    device: B::Device,
) -> Result<Outcome, BenchmarkError>
where
    B: AutodiffBackend,
    I: Item,
{
    info!("Benchmarking feature set {}", feature_set);

    let union = feature_set
        .build(&config.data_dir, &config.ngram, tokenizer)
        .await?;

    let classifier = LogisticRegression::<B>::new(config.classifier.clone(), device);

    let mut pipeline = ClassificationPipeline::new(union, classifier);
    pipeline.fit(train)?;

    let predicted = pipeline.predict_items(test)?;
    let gold: Vec<String> = test.iter().map(|item| item.class_label().to_string()).collect();

    Ok(Outcome {
        features: feature_set.to_string(),
        width: pipeline.extractor().width()?,
        report: Report::new(&gold, &predicted)?,
    })
}

/// Benchmark Error
#[derive(thiserror::Error, Debug)]
pub enum BenchmarkError {
    /// A configuration file could not be read
    #[error("unable to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON configuration file could not be parsed
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML configuration file could not be parsed
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The feature set could not be parsed
    #[error(transparent)]
    FeatureSet(#[from] FeatureSetError),

    /// Feature extraction failed
    #[error(transparent)]
    Feature(#[from] FeatureError),

    /// Fitting or prediction failed
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A dataset could not be loaded
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// The predictions could not be evaluated
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();

        assert_eq!(config.data_dir, "data");
        assert_eq!(config.features, "ngram");
        assert_eq!(config.seed, 42);
        assert_eq!(config.ngram.max_n, 4);
        assert_eq!(config.classifier.num_epochs, 20);
    }

    #[tokio::test]
    async fn test_loads_partial_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(
            file,
            "features: ngram,liu\nngram:\n  min_n: 1\n  max_n: 2\n  min_df: 2\n  negate_tokens: false\n"
        )
        .unwrap();

        let config = Config::load_file(file.path()).await.unwrap();

        assert_eq!(config.features, "ngram,liu");
        assert_eq!(config.ngram.max_n, 2);
        assert_eq!(config.ngram.min_df, 2);
        assert!(!config.ngram.negate_tokens);
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.feature_set().unwrap().to_string(), "ngram,liu");
    }

    #[tokio::test]
    async fn test_nested_overrides_keep_sibling_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        write!(file, "classifier:\n  num_epochs: 3\n").unwrap();

        let config = Config::load_file(file.path()).await.unwrap();

        assert_eq!(config.classifier.num_epochs, 3);
        assert_eq!(config.classifier.batch_size, 256);
        assert_eq!(config.ngram.min_n, 1);
        assert_eq!(config.features, "ngram");
    }

    #[test]
    fn test_merge_replaces_leaves_and_recurses_into_objects() {
        let mut base = serde_json::json!({"a": 1, "b": {"c": 2, "d": 3}});

        merge(&mut base, serde_json::json!({"b": {"d": 4}, "e": [5]}));

        assert_eq!(base, serde_json::json!({"a": 1, "b": {"c": 2, "d": 4}, "e": [5]}));
    }

    #[tokio::test]
    async fn test_loads_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"data_dir": "/tmp/corpora", "seed": 7}}"#).unwrap();

        let config = Config::load_file(file.path()).await.unwrap();

        assert_eq!(config.data_dir, "/tmp/corpora");
        assert_eq!(config.seed, 7);
        assert_eq!(config.features, "ngram");
    }
}
