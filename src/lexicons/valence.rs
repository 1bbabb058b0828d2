use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use log::{info, warn};

use crate::{text::negation::is_negation_cue, utils::files::read_file};

use super::{LexiconError, PolarityScores, SentimentScorer};

/// Valence increment for booster words
const B_INCR: f64 = 0.293;

/// Valence decrement for dampener words
const B_DECR: f64 = -0.293;

/// Valence increment for ALL-CAPS emphasis in mixed-case text
const C_INCR: f64 = 0.733;

/// Scalar applied to negated valence
const N_SCALAR: f64 = -0.74;

/// Normalization constant for the compound score
const ALPHA: f64 = 15.0;

/// Emphasis added per exclamation mark, up to four of them
const EXCLAMATION_INCR: f64 = 0.292;

/// Emphasis added per question mark when there are two or three of them
const QUESTION_INCR: f64 = 0.18;

/// Emphasis for four or more question marks
const QUESTION_MAX: f64 = 0.96;

/// How far back a booster or negation cue may sit from the sentiment word
const WINDOW: usize = 3;

static BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", B_INCR),
    ("amazingly", B_INCR),
    ("awfully", B_INCR),
    ("completely", B_INCR),
    ("considerably", B_INCR),
    ("decidedly", B_INCR),
    ("deeply", B_INCR),
    ("enormously", B_INCR),
    ("entirely", B_INCR),
    ("especially", B_INCR),
    ("exceptionally", B_INCR),
    ("extremely", B_INCR),
    ("fabulously", B_INCR),
    ("greatly", B_INCR),
    ("highly", B_INCR),
    ("hugely", B_INCR),
    ("incredibly", B_INCR),
    ("intensely", B_INCR),
    ("majorly", B_INCR),
    ("more", B_INCR),
    ("most", B_INCR),
    ("particularly", B_INCR),
    ("purely", B_INCR),
    ("quite", B_INCR),
    ("really", B_INCR),
    ("remarkably", B_INCR),
    ("so", B_INCR),
    ("substantially", B_INCR),
    ("thoroughly", B_INCR),
    ("totally", B_INCR),
    ("tremendously", B_INCR),
    ("uber", B_INCR),
    ("unbelievably", B_INCR),
    ("unusually", B_INCR),
    ("utterly", B_INCR),
    ("very", B_INCR),
    ("almost", B_DECR),
    ("barely", B_DECR),
    ("hardly", B_DECR),
    ("less", B_DECR),
    ("little", B_DECR),
    ("marginally", B_DECR),
    ("occasionally", B_DECR),
    ("partly", B_DECR),
    ("scarcely", B_DECR),
    ("slightly", B_DECR),
    ("somewhat", B_DECR),
];

fn booster(word: &str) -> Option<f64> {
    BOOSTERS
        .iter()
        .find(|(booster, _)| *booster == word)
        .map(|(_, value)| *value)
}

/// A mapping from lowercase tokens to their mean sentiment valence
#[derive(Debug, Clone, Default)]
pub struct ValenceLexicon {
    valences: HashMap<String, f64>,
}

impl ValenceLexicon {
    /// Build a lexicon from in-memory entries
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            valences: entries
                .into_iter()
                .map(|(token, valence)| (token.into(), valence))
                .collect(),
        }
    }

    /// Load a tab separated `token<TAB>mean[<TAB>...]` lexicon file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let path: PathBuf = path.as_ref().to_path_buf();

        let lines = read_file(&path)
            .await
            .map_err(|source| LexiconError::ResourceLoad {
                path: path.clone(),
                source,
            })?;

        let mut valences = HashMap::with_capacity(lines.len());

        for (i, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split('\t');
            let token = fields.next().map(str::trim).unwrap_or_default();
            let valence = fields
                .next()
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite());

            let valence = match valence {
                Some(valence) if !token.is_empty() => valence,
                _ => {
                    return Err(LexiconError::Malformed {
                        path,
                        line: i + 1,
                        content: line.clone(),
                    })
                }
            };

            if valences.insert(token.to_string(), valence).is_some() {
                warn!("Duplicate valence entry for {:?} in {}", token, path.display());
            }
        }

        if valences.is_empty() {
            return Err(LexiconError::Empty(path));
        }

        info!("Loaded valence lexicon with {} entries", valences.len());

        Ok(Self { valences })
    }

    /// The valence of a lowercase token, if present
    pub fn get(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }

    /// The number of entries
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    /// Returns true if the lexicon has no entries
    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

/// A lexicon and rule based scorer producing negative/neutral/positive proportions and a
/// normalized compound score
///
/// The rules cover booster words, negation within the three preceding words, ALL-CAPS emphasis,
/// contrastive "but" and exclamation/question emphasis.
#[derive(Debug, Clone)]
pub struct ValenceScorer {
    lexicon: ValenceLexicon,
}

impl ValenceScorer {
    /// Create a scorer over the given lexicon
    pub fn new(lexicon: ValenceLexicon) -> Self {
        Self { lexicon }
    }

    /// Per-word valences, zero for words outside the lexicon
    fn word_valences(&self, words: &[&str]) -> Vec<f64> {
        let cap_differential = is_cap_differential(words);
        let lowered: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();

        let mut valences = Vec::with_capacity(words.len());

        for (i, word) in lowered.iter().enumerate() {
            if booster(word).is_some() {
                valences.push(0.0);
                continue;
            }

            let Some(mut valence) = self.lexicon.get(word) else {
                valences.push(0.0);
                continue;
            };

            if cap_differential && is_all_caps(words[i]) {
                valence += C_INCR.copysign(valence);
            }

            for distance in 1..=WINDOW.min(i) {
                let previous = &lowered[i - distance];

                if self.lexicon.get(previous).is_some() {
                    continue;
                }

                if let Some(mut scalar) = booster(previous) {
                    // Boosters push away from zero, dampeners pull towards it
                    if valence < 0.0 {
                        scalar = -scalar;
                    }
                    if cap_differential && is_all_caps(words[i - distance]) {
                        scalar += C_INCR.copysign(valence);
                    }

                    valence += match distance {
                        1 => scalar,
                        2 => scalar * 0.95,
                        _ => scalar * 0.9,
                    };
                }
            }

            if (1..=WINDOW.min(i)).any(|distance| is_negation_cue(&lowered[i - distance])) {
                valence *= N_SCALAR;
            }

            valences.push(valence);
        }

        if let Some(but) = lowered.iter().position(|w| w == "but") {
            for (i, valence) in valences.iter_mut().enumerate() {
                if i < but {
                    *valence *= 0.5;
                } else if i > but {
                    *valence *= 1.5;
                }
            }
        }

        valences
    }
}

impl SentimentScorer for ValenceScorer {
    fn polarity_scores(&self, text: &str) -> PolarityScores {
        let words: Vec<&str> = text
            .split_whitespace()
            .map(strip_punctuation)
            .filter(|w| !w.is_empty())
            .collect();

        let valences = self.word_valences(&words);

        if valences.is_empty() {
            return PolarityScores::default();
        }

        let emphasis = punctuation_emphasis(text);

        let mut sum: f64 = valences.iter().sum();
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }

        let mut pos_sum: f64 = valences.iter().filter(|v| **v > 0.0).map(|v| v + 1.0).sum();
        let mut neg_sum: f64 = valences.iter().filter(|v| **v < 0.0).map(|v| v - 1.0).sum();
        let neu_count = valences.iter().filter(|v| **v == 0.0).count() as f64;

        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;

        PolarityScores {
            neg: round3((neg_sum / total).abs()),
            neu: round3((neu_count / total).abs()),
            pos: round3((pos_sum / total).abs()),
            compound: round4(normalize(sum)),
        }
    }
}

/// Map an unbounded valence sum into [-1, 1]
fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * EXCLAMATION_INCR;

    let questions = match text.matches('?').count() {
        0 | 1 => 0.0,
        n @ 2..=3 => n as f64 * QUESTION_INCR,
        _ => QUESTION_MAX,
    };

    exclamations + questions
}

/// Strip surrounding punctuation, keeping tokens such as emoticons that are all punctuation
fn strip_punctuation(word: &str) -> &str {
    let stripped = word.trim_matches(|c: char| !c.is_alphanumeric());

    if stripped.is_empty() {
        word
    } else {
        stripped
    }
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

/// True if some, but not all, words are ALL-CAPS
fn is_cap_differential(words: &[&str]) -> bool {
    let caps = words.iter().filter(|w| is_all_caps(w)).count();

    caps > 0 && caps < words.len()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn round4(value: f64) -> f64 {
    (value * 10000.0).round() / 10000.0
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn scorer() -> ValenceScorer {
        ValenceScorer::new(ValenceLexicon::new([
            ("great", 3.1),
            ("good", 1.9),
            ("bad", -2.5),
            ("limited", -0.5),
            (":)", 2.0),
        ]))
    }

    #[test]
    fn test_single_positive_word() {
        let scores = scorer().polarity_scores("great");

        assert_eq!(scores.compound, 0.6249);
        assert_eq!(scores.pos, 1.0);
        assert_eq!(scores.neg, 0.0);
        assert_eq!(scores.neu, 0.0);
    }

    #[test]
    fn test_proportions_sum_to_one() {
        let scores = scorer().polarity_scores("The food was good but the seating was limited");

        let total = scores.neg + scores.neu + scores.pos;
        assert!((total - 1.0).abs() < 0.01, "total was {total}");
        assert!(scores.neg > 0.0);
        assert!(scores.pos > 0.0);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let scorer = scorer();

        assert!(scorer.polarity_scores("the movie was good").compound > 0.0);
        assert!(scorer.polarity_scores("the movie was not good").compound < 0.0);
        assert!(scorer.polarity_scores("the movie wasn't very good").compound < 0.0);
    }

    #[test]
    fn test_boosters_and_emphasis_increase_intensity() {
        let scorer = scorer();

        let plain = scorer.polarity_scores("the movie was good").compound;
        let boosted = scorer.polarity_scores("the movie was very good").compound;
        let dampened = scorer.polarity_scores("the movie was slightly good").compound;
        let shouted = scorer.polarity_scores("the movie was GOOD").compound;
        let exclaimed = scorer.polarity_scores("the movie was good!!").compound;

        assert!(boosted > plain);
        assert!(dampened < plain);
        assert!(shouted > plain);
        assert!(exclaimed > plain);
    }

    #[test]
    fn test_but_shifts_weight_to_the_second_clause() {
        let scores = scorer().polarity_scores("good but bad");

        assert!(scores.compound < 0.0);
    }

    #[test]
    fn test_emoticons_are_looked_up() {
        assert!(scorer().polarity_scores("see you :)").compound > 0.0);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        assert_eq!(scorer().polarity_scores("  "), PolarityScores::default());
    }

    #[tokio::test]
    async fn test_load_lexicon() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "good\t1.9\t0.9\t[2, 2]\n\n:(\t-1.9\t0.8\t[-2]\n").unwrap();

        let lexicon = ValenceLexicon::load(file.path()).await.unwrap();

        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.get("good"), Some(1.9));
        assert_eq!(lexicon.get(":("), Some(-1.9));
    }

    #[tokio::test]
    async fn test_load_malformed_lexicon() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "good\t1.9\nbad\tnope\n").unwrap();

        let err = ValenceLexicon::load(file.path()).await.unwrap_err();

        assert!(matches!(err, LexiconError::Malformed { line: 2, .. }));
    }

    #[tokio::test]
    async fn test_non_finite_valence_is_malformed() {
        for value in ["nan", "inf", "-infinity"] {
            let file = tempfile::NamedTempFile::new().unwrap();
            fs::write(file.path(), format!("good\t1.9\nodd\t{value}\t0.5\n")).unwrap();

            let err = ValenceLexicon::load(file.path()).await.unwrap_err();

            assert!(matches!(err, LexiconError::Malformed { line: 2, .. }));
        }
    }

    #[tokio::test]
    async fn test_load_latin1_lexicon() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), b"good\t1.9\nna\xefve\t-0.4\t0.5\t[0]\n".as_slice()).unwrap();

        let lexicon = ValenceLexicon::load(file.path()).await.unwrap();

        assert_eq!(lexicon.get("naïve"), Some(-0.4));
    }
}
