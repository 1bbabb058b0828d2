use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use log::info;

use crate::utils::files::read_file;

use super::LexiconError;

/// The file name of the positive word list
pub static POSITIVE_WORDS: &str = "positive-words.txt";

/// The file name of the negative word list
pub static NEGATIVE_WORDS: &str = "negative-words.txt";

/// The polarity of an opinion word
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Polarity {
    /// Found in the positive list
    Positive,

    /// Found in the negative list
    Negative,
}

/// Sets of positive and negative opinion words
#[derive(Debug, Clone, Default)]
pub struct OpinionLexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
}

impl OpinionLexicon {
    /// Build a lexicon from in-memory word lists
    pub fn new<P, N, S>(positive: P, negative: N) -> Self
    where
        P: IntoIterator<Item = S>,
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            positive: positive.into_iter().map(Into::into).collect(),
            negative: negative.into_iter().map(Into::into).collect(),
        }
    }

    /// Load `positive-words.txt` and `negative-words.txt` from the given directory
    pub async fn load<P: AsRef<Path>>(lexicon_dir: P) -> Result<Self, LexiconError> {
        let dir = lexicon_dir.as_ref();

        let positive = read_word_list(dir.join(POSITIVE_WORDS)).await?;
        let negative = read_word_list(dir.join(NEGATIVE_WORDS)).await?;

        info!(
            "Loaded opinion lexicon with {} positive and {} negative words",
            positive.len(),
            negative.len()
        );

        Ok(Self { positive, negative })
    }

    /// Look up the polarity of a token. A token listed as both positive and negative is positive.
    pub fn polarity(&self, token: &str) -> Option<Polarity> {
        if self.positive.contains(token) {
            Some(Polarity::Positive)
        } else if self.negative.contains(token) {
            Some(Polarity::Negative)
        } else {
            None
        }
    }

    /// The number of positive words
    pub fn positive_len(&self) -> usize {
        self.positive.len()
    }

    /// The number of negative words
    pub fn negative_len(&self) -> usize {
        self.negative.len()
    }
}

/// Read one word per line, skipping blank lines and `;` comments
async fn read_word_list(path: PathBuf) -> Result<HashSet<String>, LexiconError> {
    let lines = read_file(&path)
        .await
        .map_err(|source| LexiconError::ResourceLoad {
            path: path.clone(),
            source,
        })?;

    let words = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with(';'))
        .map(|line| line.to_string())
        .collect::<HashSet<_>>();

    if words.is_empty() {
        return Err(LexiconError::Empty(path));
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_positive_wins_ties() {
        let lexicon = OpinionLexicon::new(["great", "super"], ["bad", "super"]);

        assert_eq!(lexicon.polarity("great"), Some(Polarity::Positive));
        assert_eq!(lexicon.polarity("bad"), Some(Polarity::Negative));
        assert_eq!(lexicon.polarity("super"), Some(Polarity::Positive));
        assert_eq!(lexicon.polarity("table"), None);
    }

    #[tokio::test]
    async fn test_load_skips_comments_and_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(POSITIVE_WORDS),
            ";; Opinion Lexicon: Positive\n;\n\na+\nlove\ngreat\n",
        )
        .unwrap();
        fs::write(dir.path().join(NEGATIVE_WORDS), "; header\nbad\nlimited\n").unwrap();

        let lexicon = OpinionLexicon::load(dir.path()).await.unwrap();

        assert_eq!(lexicon.positive_len(), 3);
        assert_eq!(lexicon.negative_len(), 2);
        assert_eq!(lexicon.polarity("a+"), Some(Polarity::Positive));
        assert_eq!(lexicon.polarity("limited"), Some(Polarity::Negative));
    }

    #[tokio::test]
    async fn test_load_latin1_word_lists() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(POSITIVE_WORDS),
            b";; compiled by Bing Liu, caf\xe9 edition\ngood\n".as_slice(),
        )
        .unwrap();
        fs::write(dir.path().join(NEGATIVE_WORDS), b"bad\nd\xe9class\xe9\n".as_slice()).unwrap();

        let lexicon = OpinionLexicon::load(dir.path()).await.unwrap();

        assert_eq!(lexicon.positive_len(), 1);
        assert_eq!(lexicon.polarity("good"), Some(Polarity::Positive));
        assert_eq!(lexicon.polarity("déclassé"), Some(Polarity::Negative));
    }

    #[tokio::test]
    async fn test_load_missing_resource() {
        let dir = tempfile::tempdir().unwrap();

        let err = OpinionLexicon::load(dir.path()).await.unwrap_err();

        assert!(matches!(err, LexiconError::ResourceLoad { .. }));
    }

    #[tokio::test]
    async fn test_load_empty_resource() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(POSITIVE_WORDS), ";; nothing here\n").unwrap();
        fs::write(dir.path().join(NEGATIVE_WORDS), "bad\n").unwrap();

        let err = OpinionLexicon::load(dir.path()).await.unwrap_err();

        assert!(matches!(err, LexiconError::Empty(_)));
    }
}
