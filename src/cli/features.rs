use std::{
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use crate::{
    features::{
        ngram, CompoundSentimentExtractor, FeatureError, FeatureUnion, LexiconPolarityExtractor,
        NgramCountExtractor,
    },
    text::Tokenize,
};

/// The unique string token for n-gram counts
pub static NGRAM: &str = "ngram";

/// The unique string token for opinion lexicon polarity counts
pub static LIU: &str = "liu";

/// The unique string token for valence scores
pub static VADER: &str = "vader";

/// The feature sets compared by `benchmark --compare`
pub static STANDARD_SETS: [&str; 4] = ["ngram", "liu,vader", "ngram,liu", "ngram,liu,vader"];

/// Opinion lexicon directory, relative to the data directory
pub static OPINION_LEXICON_DIR: &str = "lexicons/opinion";

/// Valence lexicon file, relative to the data directory
pub static VALENCE_LEXICON_FILE: &str = "lexicons/vader_lexicon.txt";

/// The location of the opinion lexicon word lists
pub fn opinion_lexicon_dir(data_dir: &str) -> PathBuf {
    Path::new(data_dir).join(OPINION_LEXICON_DIR)
}

/// The location of the valence lexicon
pub fn valence_lexicon_path(data_dir: &str) -> PathBuf {
    Path::new(data_dir).join(VALENCE_LEXICON_FILE)
}

/// Available feature extractors
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FeatureKind {
    /// Negation-aware n-gram counts
    Ngram,

    /// Opinion lexicon polarity counts
    Liu,

    /// Valence scores
    Vader,
}

impl FeatureKind {
    /// Get the unique string token that identifies this extractor
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Ngram => NGRAM,
            FeatureKind::Liu => LIU,
            FeatureKind::Vader => VADER,
        }
    }
}

impl TryFrom<&str> for FeatureKind {
    type Error = FeatureSetError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            name if name == NGRAM => Ok(FeatureKind::Ngram),
            name if name == LIU => Ok(FeatureKind::Liu),
            name if name == VADER => Ok(FeatureKind::Vader),
            _ => Err(FeatureSetError::Unknown(value.to_string())),
        }
    }
}

impl Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ordered selection of extractors, written as a comma separated list like `ngram,liu`
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FeatureSet(Vec<FeatureKind>);

impl FeatureSet {
    /// The extractors in column order
    pub fn kinds(&self) -> &[FeatureKind] {
        &self.0
    }

    /// The feature sets compared by default
    pub fn standard() -> Vec<FeatureSet> {
        STANDARD_SETS
            .iter()
            .filter_map(|set| set.parse().ok())
            .collect()
    }

    /// Load the lexicons this set needs and assemble its feature union
    pub async fn build(
        &self,
        data_dir: &str,
        ngram_config: &ngram::Config,
        tokenizer: Arc<dyn Tokenize>,
    ) -> Result<FeatureUnion, FeatureError> {
        let mut union = FeatureUnion::new();

        for kind in self.kinds() {
            match kind {
                FeatureKind::Ngram => union.push(
                    NGRAM,
                    NgramCountExtractor::new(ngram_config.clone(), tokenizer.clone())?,
                )?,
                FeatureKind::Liu => union.push(
                    LIU,
                    LexiconPolarityExtractor::load(opinion_lexicon_dir(data_dir), tokenizer.clone())
                        .await?,
                )?,
                FeatureKind::Vader => union.push(
                    VADER,
                    CompoundSentimentExtractor::load(valence_lexicon_path(data_dir)).await?,
                )?,
            }
        }

        Ok(union)
    }
}

impl FromStr for FeatureSet {
    type Err = FeatureSetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut kinds = Vec::new();

        for name in value.split(',').filter(|name| !name.trim().is_empty()) {
            let kind = FeatureKind::try_from(name)?;

            if kinds.contains(&kind) {
                return Err(FeatureSetError::Duplicate(kind.to_string()));
            }

            kinds.push(kind);
        }

        if kinds.is_empty() {
            return Err(FeatureSetError::Empty);
        }

        Ok(FeatureSet(kinds))
    }
}

impl Display for FeatureSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.0.iter().map(FeatureKind::as_str).collect();

        write!(f, "{}", names.join(","))
    }
}

/// Feature Set Error
#[derive(thiserror::Error, Debug)]
pub enum FeatureSetError {
    /// No extractor found for the given string
    #[error("no feature extractor found for {0}, expected ngram, liu or vader")]
    Unknown(String),

    /// The same extractor was listed twice
    #[error("feature extractor {0} is listed more than once")]
    Duplicate(String),

    /// No extractors were listed
    #[error("a feature set needs at least one extractor")]
    Empty,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{features::FeatureExtractor, text::TweetTokenizer};

    use super::*;

    #[test]
    fn test_parses_comma_lists_in_order() {
        let set: FeatureSet = "Liu, ngram".parse().unwrap();

        assert_eq!(set.kinds(), &[FeatureKind::Liu, FeatureKind::Ngram]);
        assert_eq!(set.to_string(), "liu,ngram");
    }

    #[test]
    fn test_rejects_bad_lists() {
        assert!(matches!(
            "ngram,bert".parse::<FeatureSet>(),
            Err(FeatureSetError::Unknown(_))
        ));
        assert!(matches!(
            "ngram,ngram".parse::<FeatureSet>(),
            Err(FeatureSetError::Duplicate(_))
        ));
        assert!(matches!(
            " , ".parse::<FeatureSet>(),
            Err(FeatureSetError::Empty)
        ));
    }

    #[test]
    fn test_standard_sets() {
        let names: Vec<String> = FeatureSet::standard()
            .iter()
            .map(FeatureSet::to_string)
            .collect();

        assert_eq!(names, STANDARD_SETS.to_vec());
    }

    #[tokio::test]
    async fn test_builds_union_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_str().unwrap();

        let opinion = opinion_lexicon_dir(data_dir);
        std::fs::create_dir_all(&opinion).unwrap();
        std::fs::write(opinion.join("positive-words.txt"), ";; header\ngood\n").unwrap();
        std::fs::write(opinion.join("negative-words.txt"), "bad\n").unwrap();
        std::fs::write(valence_lexicon_path(data_dir), "good\t1.9\t0.9\t[2]\n").unwrap();

        let set: FeatureSet = "ngram,liu,vader".parse().unwrap();
        let mut union = set
            .build(
                data_dir,
                &ngram::Config::new().with_max_n(1),
                Arc::new(TweetTokenizer::default()),
            )
            .await
            .unwrap();

        let matrix = union
            .fit_transform(&["good not bad".to_string()])
            .unwrap();

        assert_eq!(union.member_names(), vec!["ngram", "liu", "vader"]);
        assert_eq!(matrix.width(), 3 + 2 + 4);
        assert_eq!(matrix.get(0, 3), 1.0);
        assert_eq!(matrix.get(0, 4), 1.0);
    }

    #[tokio::test]
    async fn test_missing_lexicon_fails_to_build() {
        let dir = tempfile::tempdir().unwrap();

        let set: FeatureSet = "liu".parse().unwrap();
        let result = set
            .build(
                dir.path().to_str().unwrap(),
                &ngram::Config::new(),
                Arc::new(TweetTokenizer::default()),
            )
            .await;

        assert!(matches!(result, Err(FeatureError::Lexicon(_))));
    }
}
