use std::path::{Path, PathBuf};

use async_trait::async_trait;
use burn::data::dataset::{self, InMemDataset};
use derive_new::new;
use log::info;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::pipelines::text_classification;

use super::{read_corpus, DatasetError, LoadableDataset};

/// The name of the IMDB dataset
pub static DATASET: &str = "imdb";

/// The labelled review file inside the dataset directory
pub static FILE_NAME: &str = "labeledTrainData.tsv";

/// The seed used by [`LoadableDataset::load`] for the train/test split
pub const DEFAULT_SEED: u64 = 42;

/// The share of reviews assigned to the train split
pub const TRAIN_FRACTION: f64 = 0.8;

/// A labelled movie review
#[derive(Clone, Debug, Serialize, Deserialize, new)]
pub struct Item {
    /// The review id
    pub id: String,

    /// The sentiment label (`1` positive, `0` negative)
    pub sentiment: String,

    /// The review text
    pub review: String,
}

impl text_classification::Item for Item {
    fn input(&self) -> &str {
        &self.review
    }

    fn class_label(&self) -> &str {
        &self.sentiment
    }
}

/// Struct for the IMDB dataset
pub struct Dataset {
    /// Underlying In-Memory dataset
    dataset: InMemDataset<Item>,
}

/// Implement the Dataset trait for the IMDB dataset
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
    /// The labelled review file
    pub fn path(data_dir: &str) -> PathBuf {
        Path::new(data_dir)
            .join("datasets")
            .join(DATASET)
            .join(FILE_NAME)
    }

    /// Parse the tab separated file with its `id`, `sentiment` and `review` header
    pub fn parse(content: &str) -> Result<Vec<Item>, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .from_reader(content.as_bytes());

        let mut items = Vec::new();

        for item in reader.deserialize() {
            let mut item: Item = item?;

            if let Some(unquoted) = item
                .review
                .strip_prefix('"')
                .and_then(|review| review.strip_suffix('"'))
            {
                item.review = unquoted.replace("\\\"", "\"");
            }

            items.push(item);
        }

        Ok(items)
    }

    /// Shuffle with a seeded generator and keep the train or test share
    pub fn split(mut items: Vec<Item>, mode: &str, seed: u64) -> Result<Vec<Item>, DatasetError> {
        let mut rng = StdRng::seed_from_u64(seed);
        items.shuffle(&mut rng);

        let boundary = (items.len() as f64 * TRAIN_FRACTION).round() as usize;

        match mode {
            "train" => {
                items.truncate(boundary);
                Ok(items)
            }
            "test" => Ok(items.split_off(boundary)),
            _ => Err(DatasetError::UnknownMode(mode.to_string())),
        }
    }

    /// Constructs the dataset for a mode with an explicit split seed
    pub async fn load_with_seed(data_dir: &str, mode: &str, seed: u64) -> Result<Self, DatasetError> {
        let (path, content) = read_corpus(Self::path(data_dir)).await?;

        let items = Self::parse(&content)?;

        if items.is_empty() {
            return Err(DatasetError::Empty(path));
        }

        let items = Self::split(items, mode, seed)?;

        info!("Loaded {} IMDB {} reviews", items.len(), mode);

        Ok(Self {
            dataset: InMemDataset::new(items),
        })
    }
}

#[async_trait]
impl LoadableDataset<Item> for Dataset {
    /// Constructs the dataset for a mode (either "train" or "test")
    async fn load(data_dir: &str, mode: &str) -> Result<Self, DatasetError> {
        Self::load_with_seed(data_dir, mode, DEFAULT_SEED).await
    }
}
