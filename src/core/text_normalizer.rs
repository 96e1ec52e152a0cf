//! Text Normalization
//!
//! Turns spoken or typed answers and track metadata into comparable token
//! sequences: case folded, accent stripped and split on punctuation.

use std::collections::HashMap;
use std::fmt;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Characters that separate tokens. Any other whitespace is treated as a space.
const DELIMITERS: &[char] = &[
    ' ', '-', ',', ';', '?', '!', '.', '(', ')', '/', '_', '+', '=', '&', '@', ':',
];

/// An ordered sequence of normalized tokens.
///
/// Empty tokens (from adjacent delimiters) are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NormalizedText {
    tokens: Vec<String>,
}

impl NormalizedText {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Render the tokens for UI feedback: space separated, no brackets or commas.
    pub fn join_for_display(&self) -> String {
        join_for_display(&self.tokens)
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join_for_display())
    }
}

impl From<Vec<String>> for NormalizedText {
    fn from(tokens: Vec<String>) -> Self {
        Self {
            tokens: tokens.into_iter().filter(|t| !t.is_empty()).collect(),
        }
    }
}

/// Normalize text without any voice corrections.
pub fn normalize(text: &str) -> NormalizedText {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    folded
        .split(|c: char| DELIMITERS.contains(&c) || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>()
        .into()
}

/// Join tokens back into a human-readable string.
pub fn join_for_display<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|t| t.as_ref())
        .filter(|t| !t.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Normalizes spoken answers, fixing known recognition errors token by token
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    /// Manual corrections from config, keyed by normalized token
    corrections: HashMap<String, String>,
}

impl TextNormalizer {
    /// Create a normalizer with whole-token corrections (e.g. "beatle" -> "beatles")
    pub fn new(corrections: HashMap<String, String>) -> Self {
        let corrections = corrections
            .into_iter()
            .filter_map(|(from, to)| {
                let from = normalize(&from).join_for_display();
                let to = normalize(&to).join_for_display();
                (!from.is_empty() && !from.contains(' ')).then_some((from, to))
            })
            .collect();
        Self { corrections }
    }

    /// Normalize text and apply corrections
    pub fn normalize(&self, text: &str) -> NormalizedText {
        let base = normalize(text);
        if self.corrections.is_empty() {
            return base;
        }

        let mut tokens = Vec::with_capacity(base.len());
        for token in base.tokens {
            match self.corrections.get(&token) {
                // A correction may expand into several tokens ("rn" -> "r n")
                Some(fixed) => tokens.extend(fixed.split(' ').map(str::to_string)),
                None => tokens.push(token),
            }
        }
        tokens.into()
    }
}
