use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

/// Emoticons, kept intact and never case-folded
const EMOTICONS: &str = r"(?:[<>]?[:;=8][\-o\*']?[\)\]\(\[dDpP/:\}\{@\|\\]|[\)\]\(\[dDpP/:\}\{@\|\\][\-o\*']?[:;=8][<>]?|</?3)";

lazy_static! {
    /// Token patterns in priority order
    static ref TOKEN: Regex = Regex::new(&format!(
        r"(?x)
          https?://\S+
        | {EMOTICONS}
        | @\w+
        | \#+\w+(?:['\-]\w+)*
        | [+\-]?\d+(?:[,/.:\-]\d+)+
        | [\p{{L}}\p{{N}}_]+(?:['’\-][\p{{L}}\p{{N}}_]+)*
        | \.(?:\s*\.)+
        | \S
        "
    ))
    .expect("token pattern is valid");

    static ref EMOTICON: Regex =
        Regex::new(&format!("^{EMOTICONS}$")).expect("emoticon pattern is valid");
}

/// The tokenizer collaborator: splits a raw document into an ordered sequence of tokens
pub trait Tokenize: Send + Sync {
    /// Split the text into tokens
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// A Twitter-aware tokenizer
///
/// Keeps URLs, @mentions, #hashtags, emoticons and contractions such as `don't` as single tokens,
/// folds case (except for emoticons) and reduces runs of three or more repeated characters to
/// exactly three (`coooool` => `coool`).
#[derive(Clone, Debug)]
pub struct TweetTokenizer {
    /// Keep the original casing of each token
    pub preserve_case: bool,

    /// Reduce character runs longer than three
    pub reduce_len: bool,
}

impl Default for TweetTokenizer {
    fn default() -> Self {
        Self {
            preserve_case: false,
            reduce_len: true,
        }
    }
}

impl TweetTokenizer {
    /// Create a tokenizer with explicit casing and lengthening policies
    pub fn new(preserve_case: bool, reduce_len: bool) -> Self {
        Self {
            preserve_case,
            reduce_len,
        }
    }
}

impl Tokenize for TweetTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.reduce_len {
            reduce_lengthening(text)
        } else {
            text.to_string()
        };

        TOKEN
            .find_iter(&text)
            .map(|m| m.as_str())
            .map(|token| {
                if self.preserve_case || EMOTICON.is_match(token) {
                    token.to_string()
                } else {
                    token.to_lowercase()
                }
            })
            .collect()
    }
}

/// Replace any run of 3 or more identical characters with exactly 3 of them
pub fn reduce_lengthening(text: &str) -> String {
    let mut reduced = String::with_capacity(text.len());
    let mut previous = None;
    let mut run = 0;

    for c in text.chars() {
        if Some(c) == previous {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }

        if run <= 3 {
            reduced.push(c);
        }
    }

    reduced
}

/// Use a Hugging Face tokenizer as the tokenizer collaborator, yielding the string form of each
/// token in its encoding (special tokens are not added)
impl Tokenize for tokenizers::Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        match self.encode(text, false) {
            Ok(encoding) => encoding.get_tokens().to_vec(),
            Err(e) => {
                warn!("Unable to encode document, treating it as empty: {}", e);

                Vec::new()
            }
        }
    }
}
