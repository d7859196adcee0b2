// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Harmonic reasoning over chord progressions.
//!
//! Key finding, functional classification, and next-chord suggestions.

pub mod function;
pub mod key_finder;
pub mod recommend;

pub use function::{classify, HarmonicFunction};
pub use key_finder::{infer_key, rank_keys, score_keys, KeyEstimate, KeyScore};
pub use recommend::{recommend, Recommendation, RecommendationSet, DEFAULT_MAX_RESULTS};
