use std::path::{Path, PathBuf};

use async_trait::async_trait;
use burn::data::dataset::{self, InMemDataset};
use derive_new::new;
use log::info;
use serde::{Deserialize, Serialize};

use crate::pipelines::text_classification;

use super::{read_corpus, DatasetError, LoadableDataset};

/// The name of the SemEval dataset
pub static DATASET: &str = "semeval";

/// Labels merged into `neutral`
pub static NEUTRAL_SYNONYMS: [&str; 2] = ["objective-OR-neutral", "objective"];

const LABEL_COLUMN: usize = 2;
const TEXT_COLUMN: usize = 3;

/// A labelled tweet
#[derive(Clone, Debug, Serialize, Deserialize, new)]
pub struct Item {
    /// The tweet text
    pub tweet: String,

    /// The normalized sentiment label
    pub sentiment: String,
}

impl text_classification::Item for Item {
    fn input(&self) -> &str {
        &self.tweet
    }

    fn class_label(&self) -> &str {
        &self.sentiment
    }
}

/// Merge synonym labels into their canonical label
pub fn normalize_label(label: &str) -> String {
    let label = label.trim();

    if NEUTRAL_SYNONYMS.contains(&label) {
        "neutral".to_string()
    } else {
        label.to_string()
    }
}

/// Struct for the SemEval dataset
pub struct Dataset {
    /// Underlying In-Memory dataset
    dataset: InMemDataset<Item>,
}

/// Implement the Dataset trait for the SemEval dataset
impl dataset::Dataset<Item> for Dataset {
    /// Returns a specific item from the dataset
    fn get(&self, index: usize) -> Option<Item> {
        self.dataset.get(index)
    }

    /// Returns the length of the dataset
    fn len(&self) -> usize {
        self.dataset.len()
    }
}

impl Dataset {
    /// The corpus file for a mode
    pub fn path(data_dir: &str, mode: &str) -> PathBuf {
        Path::new(data_dir)
            .join("datasets")
            .join(DATASET)
            .join(format!("{mode}.tsv"))
    }

    /// Parse tab separated rows with the label in the third column and the text in the fourth
    pub fn parse(path: &Path, content: &str) -> Result<Vec<Item>, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut items = Vec::new();

        for (index, record) in reader.records().enumerate() {
            let record = record?;

            let column = |column: usize| {
                record.get(column).ok_or_else(|| DatasetError::MissingColumn {
                    path: path.to_path_buf(),
                    row: index + 1,
                    column: column + 1,
                })
            };

            let sentiment = normalize_label(column(LABEL_COLUMN)?);
            let tweet = column(TEXT_COLUMN)?.to_string();

            items.push(Item::new(tweet, sentiment));
        }

        Ok(items)
    }
}

#[async_trait]
impl LoadableDataset<Item> for Dataset {
    /// Constructs the dataset for a mode (either "train" or "test")
    async fn load(data_dir: &str, mode: &str) -> Result<Self, DatasetError> {
        let (path, content) = read_corpus(Self::path(data_dir, mode)).await?;

        let items = Self::parse(&path, &content)?;

        if items.is_empty() {
            return Err(DatasetError::Empty(path));
        }

        info!("Loaded {} SemEval {} tweets", items.len(), mode);

        Ok(Self {
            dataset: InMemDataset::new(items),
        })
    }
}
