//! Answer Matching
//!
//! Decides how well a normalized answer hits a normalized track attribute.
//! Both sides must have gone through the same normalizer first.

use serde::{Deserialize, Serialize};

use crate::core::NormalizedText;
use crate::utils::tokens_similar;

/// Default similarity a token pair needs to be forgiven as a misspelling
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// How well a candidate answer hits a target attribute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchVerdict {
    /// Normalized tokens are equal
    Exact,
    /// Some overlap; the value is the fraction of target tokens covered (0, 1]
    Partial(f64),
    /// Nothing in common (also the verdict for an empty answer)
    Miss,
}

impl MatchVerdict {
    pub fn is_hit(&self) -> bool {
        !matches!(self, Self::Miss)
    }

    /// Fraction of the attribute's points this verdict earns
    pub fn fraction(&self) -> f64 {
        match self {
            Self::Exact => 1.0,
            Self::Partial(f) => *f,
            Self::Miss => 0.0,
        }
    }

    /// Pick the stronger of two verdicts (used when several attempts are made)
    pub fn best(self, other: Self) -> Self {
        match (self, other) {
            (Self::Exact, _) | (_, Self::Exact) => Self::Exact,
            (Self::Partial(a), Self::Partial(b)) => Self::Partial(a.max(b)),
            (Self::Partial(f), Self::Miss) | (Self::Miss, Self::Partial(f)) => Self::Partial(f),
            (Self::Miss, Self::Miss) => Self::Miss,
        }
    }
}

/// How token order is treated when comparing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Single-value attributes (title, album): order matters for Exact
    Ordered,
    /// Multi-valued attributes: tokens compared as a multiset
    Unordered,
}

/// Spelling-tolerant comparison of token sequences
#[derive(Debug, Clone, Copy)]
pub struct AnswerMatcher {
    fuzzy_threshold: f64,
}

impl Default for AnswerMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_THRESHOLD)
    }
}

impl AnswerMatcher {
    pub fn new(fuzzy_threshold: f64) -> Self {
        Self {
            fuzzy_threshold: fuzzy_threshold.clamp(0.0, 1.0),
        }
    }

    /// Compare a candidate against a single target
    pub fn compare(
        &self,
        candidate: &NormalizedText,
        target: &NormalizedText,
        mode: MatchMode,
    ) -> MatchVerdict {
        if candidate.is_empty() || target.is_empty() {
            return MatchVerdict::Miss;
        }

        let exact = match mode {
            MatchMode::Ordered => candidate == target,
            MatchMode::Unordered => sorted(candidate) == sorted(target),
        };
        if exact {
            return MatchVerdict::Exact;
        }

        let mut unused = vec![true; candidate.len()];
        let pairing = self.pair_tokens(candidate.tokens(), target.tokens(), &mut unused);
        verdict_for(pairing.total(), target.len())
    }

    /// Compare a candidate against a multi-valued attribute, one name at a time.
    ///
    /// Each name's overlap is measured on its own tokens and the fractions are
    /// averaged, so naming one of two artists earns 0.5. A spoken token is
    /// consumed by the first name that uses it and cannot credit a second one.
    ///
    /// Unlike [`compare`](Self::compare), extra spoken words do not spoil
    /// `Exact`: every name fully covered by identical tokens is enough, so
    /// "halo beyonce" names the artist exactly while covering the title only
    /// as `Partial(1.0)`.
    pub fn compare_names(
        &self,
        candidate: &NormalizedText,
        names: &[NormalizedText],
    ) -> MatchVerdict {
        let names: Vec<&NormalizedText> = names.iter().filter(|n| !n.is_empty()).collect();
        if candidate.is_empty() || names.is_empty() {
            return MatchVerdict::Miss;
        }

        let mut unused = vec![true; candidate.len()];
        let mut all_exact = true;
        let mut fraction_sum = 0.0;

        for name in &names {
            let pairing = self.pair_tokens(candidate.tokens(), name.tokens(), &mut unused);
            if pairing.exact < name.len() {
                all_exact = false;
            }
            fraction_sum += pairing.total() as f64 / name.len() as f64;
        }

        if all_exact {
            return MatchVerdict::Exact;
        }
        let fraction = fraction_sum / names.len() as f64;
        if fraction > 0.0 {
            MatchVerdict::Partial(fraction)
        } else {
            MatchVerdict::Miss
        }
    }

    /// Pair target tokens with unused candidate tokens: identical ones first,
    /// then misspellings among what is left. Consumed candidate slots are
    /// cleared in `unused`.
    fn pair_tokens(&self, candidate: &[String], target: &[String], unused: &mut [bool]) -> Pairing {
        let mut unmatched_target = Vec::new();
        let mut exact = 0;

        for token in target {
            match (0..candidate.len()).find(|&i| unused[i] && candidate[i] == *token) {
                Some(i) => {
                    unused[i] = false;
                    exact += 1;
                }
                None => unmatched_target.push(token),
            }
        }

        let mut fuzzy = 0;
        for token in unmatched_target {
            let found = (0..candidate.len())
                .find(|&i| unused[i] && tokens_similar(&candidate[i], token, self.fuzzy_threshold));
            if let Some(i) = found {
                unused[i] = false;
                fuzzy += 1;
            }
        }

        Pairing { exact, fuzzy }
    }
}

#[derive(Debug, Clone, Copy)]
struct Pairing {
    exact: usize,
    fuzzy: usize,
}

impl Pairing {
    fn total(&self) -> usize {
        self.exact + self.fuzzy
    }
}

fn sorted(text: &NormalizedText) -> Vec<&str> {
    let mut tokens: Vec<&str> = text.tokens().iter().map(String::as_str).collect();
    tokens.sort_unstable();
    tokens
}

fn verdict_for(overlap: usize, target_len: usize) -> MatchVerdict {
    if overlap == 0 || target_len == 0 {
        MatchVerdict::Miss
    } else {
        MatchVerdict::Partial(overlap.min(target_len) as f64 / target_len as f64)
    }
}
