//! Core text processing
//!
//! Normalization of answers and track metadata before matching.

pub mod text_normalizer;

pub use text_normalizer::{join_for_display, normalize, NormalizedText, TextNormalizer};
