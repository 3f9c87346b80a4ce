//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Canonicalizes raw answers for comparison
//! - **Tokenizer**: Splits normalized text into words

pub mod normalizer;
pub mod tokenizer;

pub use normalizer::{NormalizerConfig, TextNormalizer};
pub use tokenizer::{extract_words, Tokenizer};
