// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Key finding from chord progressions.
//!
//! Every chord votes for each of the 24 candidate keys: chords that read as
//! scale degrees of a key score for it (more when the label needs fewer
//! accidentals), chords that do not score against it. A progression that
//! ends on the tonic earns that key a cadence bonus.

use serde::Serialize;
use tracing::debug;

use crate::music::chord::{normalize, ChordSymbol};
use crate::music::roman::reinterpret;
use crate::music::scale::Key;

/// Score for a chord that reads as a scale degree of the key
pub const DIATONIC_WEIGHT: f64 = 2.0;
/// Ceiling of the bonus for labels with few accidentals
pub const SIMPLICITY_BONUS: f64 = 2.0;
/// Bonus lost per accidental in the label
pub const ACCIDENTAL_PENALTY: f64 = 0.75;
/// Score for a chord the key cannot explain
pub const UNEXPLAINED_PENALTY: f64 = -1.25;
/// Bonus when the last chord is the key's tonic
pub const CADENCE_BONUS: f64 = 1.5;

const CONFIDENCE_BASE: f64 = 0.5;
const CONFIDENCE_PER_POINT: f64 = 0.15;

/// Total score of one candidate key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyScore {
    pub key: Key,
    pub score: f64,
}

/// Result of key inference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyEstimate {
    /// "<Tonic> <major|minor>"
    pub key: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
}

/// What a single chord contributes to a key's score
fn chord_score(chord: &ChordSymbol, key: &Key) -> f64 {
    match reinterpret(chord, key) {
        Some(label) => {
            let accidentals = label.accidental_count() as f64;
            DIATONIC_WEIGHT + (SIMPLICITY_BONUS - ACCIDENTAL_PENALTY * accidentals).max(0.0)
        }
        None => UNEXPLAINED_PENALTY,
    }
}

/// Score one key against a chord sequence
pub fn score_key(chords: &[ChordSymbol], key: &Key) -> f64 {
    let mut score: f64 = chords.iter().map(|chord| chord_score(chord, key)).sum();

    let ends_on_tonic = chords
        .last()
        .and_then(|last| reinterpret(last, key))
        .is_some_and(|label| label.is_tonic());
    if ends_on_tonic {
        score += CADENCE_BONUS;
    }

    score
}

/// All 24 candidates ranked by score, best first.
///
/// The sort is stable, so equal scores keep candidate order.
pub fn rank_keys(chords: &[ChordSymbol]) -> Vec<KeyScore> {
    let mut ranking: Vec<KeyScore> = Key::CANDIDATES
        .iter()
        .map(|key| KeyScore {
            key: *key,
            score: score_key(chords, key),
        })
        .collect();
    ranking.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranking
}

/// Map the margin between the two best scores to [0, 1]
pub fn confidence_from_margin(margin: f64) -> f64 {
    (CONFIDENCE_BASE + CONFIDENCE_PER_POINT * margin).clamp(0.0, 1.0)
}

/// Pick the most plausible key for a chord sequence.
///
/// An empty sequence yields C major with confidence 0.0.
pub fn score_keys(chords: &[ChordSymbol]) -> (Key, f64) {
    let ranking = rank_keys(chords);
    let best = match ranking.first() {
        Some(best) if !chords.is_empty() => *best,
        _ => return (Key::default(), 0.0),
    };

    let second = ranking.get(1).map(|s| s.score).unwrap_or(best.score - 1.0);
    let margin = best.score - second;
    let confidence = confidence_from_margin(margin);

    debug!(
        key = %best.key,
        score = best.score,
        margin,
        confidence,
        chords = chords.len(),
        "key chosen"
    );
    (best.key, confidence)
}

/// Infer the key of a progression of raw chord strings.
///
/// Strings that do not parse are left out of the vote.
pub fn infer_key<S: AsRef<str>>(chords: &[S]) -> KeyEstimate {
    let parsed: Vec<ChordSymbol> = chords.iter().filter_map(|c| normalize(c.as_ref())).collect();
    let (key, confidence) = score_keys(&parsed);
    KeyEstimate {
        key: key.to_string(),
        confidence,
    }
}
