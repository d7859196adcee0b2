// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Cadenza: key inference and next-chord suggestions for chord progressions.
//!
//! ```
//! let estimate = cadenza::infer_key(&["C", "F", "G", "C"]);
//! assert_eq!(estimate.key, "C major");
//!
//! let set = cadenza::recommend(&["C", "F"], Some("G"), 6);
//! assert_eq!(set.recommendations[0].chord, "C");
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod harmony;
pub mod music;

pub use analysis::{analyze, ChordAnalysis, ChordEvent, NoteDocument, NoteEvent};
pub use config::Settings;
pub use error::{ArgumentError, ChordParseError};
pub use harmony::{
    classify, infer_key, recommend, score_keys, HarmonicFunction, KeyEstimate, Recommendation,
    RecommendationSet, DEFAULT_MAX_RESULTS,
};
pub use music::{normalize, symbolize, ChordSymbol, Key, Mode, Note, Quality, ScaleDegree};
