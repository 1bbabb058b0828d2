use std::{collections::HashMap, sync::Arc};

use log::info;

use crate::text::{mark_negation, Tokenize};

use super::{FeatureError, FeatureExtractor, FeatureMatrix};

/// N-gram Count Configuration
#[derive(burn::config::Config)]
pub struct Config {
    /// The smallest n-gram order to count
    #[config(default = 1)]
    pub min_n: usize,

    /// The largest n-gram order to count
    #[config(default = 4)]
    pub max_n: usize,

    /// The minimum number of training documents an n-gram must appear in
    #[config(default = 1)]
    pub min_df: usize,

    /// Keep only the most frequent n-grams, if set
    pub max_features: Option<usize>,

    /// Apply negation marking to the tokens before counting
    #[config(default = true)]
    pub negate_tokens: bool,

    /// Also count character n-grams of the raw document in this order range, e.g. `(3, 5)`
    pub char_ngrams: Option<(usize, usize)>,

    /// Record presence (1) instead of counts
    #[config(default = false)]
    pub binary: bool,
}

/// The prefix of character n-gram feature names
pub static CHAR_PREFIX: &str = "char:";

/// The fitted feature space
#[derive(Debug, Clone)]
struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    fn new(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        Self { terms, index }
    }
}

/// Counts negation-marked n-grams over a vocabulary fitted on the training documents
pub struct NgramCountExtractor {
    config: Config,
    tokenizer: Arc<dyn Tokenize>,
    vocabulary: Option<Vocabulary>,
}

impl NgramCountExtractor {
    /// Create an unfitted extractor, validating the n-gram range
    pub fn new(config: Config, tokenizer: Arc<dyn Tokenize>) -> Result<Self, FeatureError> {
        if config.min_n == 0 || config.min_n > config.max_n {
            return Err(FeatureError::InvalidConfig(format!(
                "n-gram range [{}, {}] must satisfy 1 <= min_n <= max_n",
                config.min_n, config.max_n
            )));
        }

        if let Some((min, max)) = config.char_ngrams {
            if min == 0 || min > max {
                return Err(FeatureError::InvalidConfig(format!(
                    "character n-gram range [{min}, {max}] must satisfy 1 <= min <= max"
                )));
            }
        }

        Ok(Self {
            config,
            tokenizer,
            vocabulary: None,
        })
    }

    /// The n-grams of a single document, in order of appearance, grouped by order. Character
    /// n-grams, when enabled, follow the token n-grams and carry [`CHAR_PREFIX`].
    pub fn ngrams(&self, document: &str) -> Vec<String> {
        let mut tokens = self.tokenizer.tokenize(document);

        if self.config.negate_tokens {
            tokens = mark_negation(&tokens);
        }

        let mut ngrams: Vec<String> = (self.config.min_n..=self.config.max_n)
            .flat_map(|n| tokens.windows(n).map(|window| window.join(" ")))
            .collect();

        if let Some((min, max)) = self.config.char_ngrams {
            let chars: Vec<char> = document.chars().collect();

            ngrams.extend((min..=max).flat_map(|n| {
                chars
                    .windows(n)
                    .map(|window| format!("{CHAR_PREFIX}{}", window.iter().collect::<String>()))
            }));
        }

        ngrams
    }

    /// The fitted vocabulary in column order, if `fit` has been called
    pub fn vocabulary(&self) -> Option<&[String]> {
        self.vocabulary.as_ref().map(|v| v.terms.as_slice())
    }

    fn fitted(&self) -> Result<&Vocabulary, FeatureError> {
        self.vocabulary
            .as_ref()
            .ok_or(FeatureError::Unfitted("NgramCountExtractor"))
    }
}

impl FeatureExtractor for NgramCountExtractor {
    fn fit(&mut self, documents: &[String]) -> Result<(), FeatureError> {
        // term -> (total count, document frequency)
        let mut stats: HashMap<String, (usize, usize)> = HashMap::new();

        for document in documents {
            let mut seen = HashMap::new();

            for ngram in self.ngrams(document) {
                *seen.entry(ngram).or_insert(0) += 1;
            }

            for (ngram, count) in seen {
                let entry = stats.entry(ngram).or_insert((0, 0));
                entry.0 += count;
                entry.1 += 1;
            }
        }

        let mut terms: Vec<(String, usize)> = stats
            .into_iter()
            .filter(|(_, (_, df))| *df >= self.config.min_df)
            .map(|(term, (total, _))| (term, total))
            .collect();

        if let Some(max_features) = self.config.max_features {
            terms.sort_by(|(a, a_total), (b, b_total)| b_total.cmp(a_total).then_with(|| a.cmp(b)));
            terms.truncate(max_features);
        }

        let mut terms: Vec<String> = terms.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        info!(
            "Fitted n-gram vocabulary with {} terms from {} documents",
            terms.len(),
            documents.len()
        );

        self.vocabulary = Some(Vocabulary::new(terms));

        Ok(())
    }

    fn transform(&self, documents: &[String]) -> Result<FeatureMatrix, FeatureError> {
        let vocabulary = self.fitted()?;

        FeatureMatrix::from_sparse_rows(
            vocabulary.terms.len(),
            documents.iter().map(|document| {
                let mut columns: Vec<usize> = self
                    .ngrams(document)
                    .into_iter()
                    .filter_map(|ngram| vocabulary.index.get(&ngram).copied())
                    .collect();

                if self.config.binary {
                    columns.sort_unstable();
                    columns.dedup();
                }

                columns.into_iter().map(|column| (column, 1.0)).collect()
            }),
        )
    }

    fn width(&self) -> Result<usize, FeatureError> {
        Ok(self.fitted()?.terms.len())
    }

    fn feature_names(&self) -> Result<Vec<String>, FeatureError> {
        Ok(self.fitted()?.terms.clone())
    }
}
