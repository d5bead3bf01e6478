//! Text normalization for symptom descriptions
//!
//! Turns free text into a space-joined sequence of lowercase alphabetic
//! tokens, with stop-words and tokens of two characters or fewer removed.
//! The output of [`normalize`] is itself a fixed point of [`normalize`].

/// Common English function words dropped during normalization
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "is", "in", "it", "to", "of", "for",
    "with", "on", "at", "by", "an", "a", "this", "that", "are", "was",
    "has", "have", "had", "be", "been", "being",
];

/// Tokens this short or shorter are dropped
pub const MIN_TOKEN_LEN: usize = 2;

/// Normalize text into a space-joined token sequence
///
/// # Example
///
/// ```
/// use symptomatch_core::normalize::normalize;
///
/// assert_eq!(normalize("The Fever!!"), "fever");
/// assert_eq!(normalize("high-fever, dry cough"), "high fever dry cough");
/// ```
pub fn normalize(text: &str) -> String {
    tokenize(text).join(" ")
}

/// Normalize an optional value; a missing value normalizes to `""`
#[inline]
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Tokenize text the same way [`normalize`] does, without joining
///
/// Every character outside `[a-z]` after lowercasing acts as a separator,
/// so digits and punctuation split tokens rather than vanishing inside them.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphabetic() { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| token.len() > MIN_TOKEN_LEN && !is_stop_word(token))
        .map(String::from)
        .collect()
}

#[inline]
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}
