/// The marker appended to tokens that occur in a negated context
pub static NEGATION_SUFFIX: &str = "_NEG";

/// Whole-token negation cues (compared case-insensitively). Any token containing `n't` is a cue as
/// well.
static NEGATION_CUES: &[&str] = &[
    "never", "no", "nothing", "nowhere", "noone", "none", "not", "havent", "hasnt", "hadnt",
    "cant", "couldnt", "shouldnt", "wont", "wouldnt", "dont", "doesnt", "didnt", "isnt", "arent",
    "aint",
];

/// Returns true if the token opens a negation scope
pub fn is_negation_cue(token: &str) -> bool {
    let lower = token.to_lowercase();

    lower.contains("n't") || NEGATION_CUES.contains(&lower.as_str())
}

fn is_clause_mark(c: char) -> bool {
    matches!(c, '.' | ':' | ';' | '!' | '?')
}

/// Returns true if the token is made only of clause punctuation, which ends a negation scope.
/// Whitespace between the marks is allowed, as in a spaced ellipsis `. . .`.
pub fn is_clause_punctuation(token: &str) -> bool {
    token.chars().any(is_clause_mark)
        && token.chars().all(|c| is_clause_mark(c) || c.is_whitespace())
}

/// Append [`NEGATION_SUFFIX`] to every token that follows a negation cue, up to (but not
/// including) the next clause punctuation token
///
/// Cues themselves are left unmarked and each cue restarts the scope. Tokens that already carry
/// the suffix are never marked again, so marking is idempotent.
///
/// ```
/// use burn_sentiment::text::mark_negation;
///
/// let tokens: Vec<String> = ["I", "don't", "like", "the", "movie", "."]
///     .iter()
///     .map(|t| t.to_string())
///     .collect();
///
/// assert_eq!(
///     mark_negation(&tokens),
///     vec!["I", "don't", "like_NEG", "the_NEG", "movie_NEG", "."]
/// );
/// ```
pub fn mark_negation<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut in_scope = false;

    tokens
        .iter()
        .map(|token| {
            let token = token.as_ref();

            if is_negation_cue(token) && !token.ends_with(NEGATION_SUFFIX) {
                in_scope = true;

                token.to_string()
            } else if is_clause_punctuation(token) {
                in_scope = false;

                token.to_string()
            } else if in_scope && !token.ends_with(NEGATION_SUFFIX) {
                format!("{token}{NEGATION_SUFFIX}")
            } else {
                token.to_string()
            }
        })
        .collect()
}
