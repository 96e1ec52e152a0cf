//! Fuzzy matching utilities
//!
//! Spelling-tolerant comparison of single tokens and lookup of names
//! (quiz types, playlists) from loosely typed input.

use strsim::normalized_levenshtein;

use crate::core::normalize;

/// Tokens shorter than this must match exactly
pub const MIN_FUZZY_TOKEN_LEN: usize = 4;

/// Result of a fuzzy match with the matched value and score
#[derive(Debug, Clone)]
pub struct FuzzyMatch {
    pub value: String,
    pub score: f64,
}

/// Whether two already-normalized tokens are close enough to count as the same word
pub fn tokens_similar(a: &str, b: &str, threshold: f64) -> bool {
    if a == b {
        return true;
    }
    if a.chars().count() < MIN_FUZZY_TOKEN_LEN || b.chars().count() < MIN_FUZZY_TOKEN_LEN {
        return false;
    }
    normalized_levenshtein(a, b) >= threshold
}

/// Find matches in a list of candidates
///
/// Returns up to `n` matches with scores above `cutoff`, best first.
/// Candidates are compared in normalized form so "Classic-Rock" finds "classic rock".
pub fn find_matches(
    search_term: &str,
    candidates: &[String],
    n: usize,
    cutoff: f64,
) -> Vec<FuzzyMatch> {
    let search = normalize(search_term).join_for_display();

    let mut matches: Vec<FuzzyMatch> = candidates
        .iter()
        .filter_map(|candidate| {
            let score = normalized_levenshtein(&search, &normalize(candidate).join_for_display());
            (score >= cutoff).then(|| FuzzyMatch {
                value: candidate.clone(),
                score,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(n);

    matches
}

/// Find the best match above a minimum score
///
/// Returns None if no match meets the cutoff
pub fn find_best_match(
    search_term: &str,
    candidates: &[String],
    cutoff: f64,
) -> Option<FuzzyMatch> {
    find_matches(search_term, candidates, 1, cutoff)
        .into_iter()
        .next()
}
