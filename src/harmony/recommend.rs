// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Next-chord recommendations.
//!
//! The key is inferred from the whole progression. The function of the
//! last chord picks a pool of scale degrees to move to, and each degree is
//! realized as a chord in that key. Two dominant suggestions always follow
//! the pool.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::function::{classify, HarmonicFunction};
use super::key_finder::score_keys;
use crate::music::chord::{normalize, ChordSymbol};
use crate::music::roman::{realize, reinterpret, ScaleDegree};
use crate::music::scale::{Key, Mode};

/// Recommendations returned when no limit is given
pub const DEFAULT_MAX_RESULTS: usize = 6;

/// Suggestions tried after every pool, with their reasons
const EXTRAS: [(&str, &str); 2] = [
    ("V7", "Adds tension that resolves strongly"),
    ("V", "Classic dominant resolution"),
];

/// A single suggested next chord
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub chord: String,
    pub scale_degree: ScaleDegree,
    pub function: HarmonicFunction,
    pub reason: String,
}

/// Key guess plus ordered, de-duplicated suggestions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSet {
    pub key_guess: String,
    pub confidence: f64,
    pub recommendations: Vec<Recommendation>,
}

/// Scale degrees to suggest after a chord of the given function
pub fn pool_for(function: Option<HarmonicFunction>, mode: Mode) -> &'static [&'static str] {
    match (mode, function) {
        (Mode::Major, Some(HarmonicFunction::Tonic)) => &["IV", "ii", "V", "vi"],
        (Mode::Major, Some(HarmonicFunction::Predominant)) => &["V", "vii°", "I"],
        (Mode::Major, Some(HarmonicFunction::Dominant)) => &["I", "vi"],
        (Mode::Major, _) => &["I", "V", "vi", "IV", "ii", "iii"],
        (Mode::Minor, Some(HarmonicFunction::Tonic)) => &["iv", "ii°", "V", "VI"],
        (Mode::Minor, Some(HarmonicFunction::Predominant)) => &["V", "vii°", "i"],
        (Mode::Minor, Some(HarmonicFunction::Dominant)) => &["i", "VI"],
        (Mode::Minor, _) => &["i", "V", "VI", "iv", "ii°", "III"],
    }
}

/// Realize a label in `key` as a recommendation, or skip it
fn suggest(label: &str, key: &Key, reason: &str) -> Option<Recommendation> {
    let Some(chord) = realize(label, key) else {
        debug!(label, key = %key, "skipping label that does not realize");
        return None;
    };
    let scale_degree = ScaleDegree::new(label);
    Some(Recommendation {
        chord: chord.symbol(key.spelling()),
        function: classify(&scale_degree),
        scale_degree,
        reason: reason.to_string(),
    })
}

/// Suggest chords to follow a progression.
///
/// `current_chord`, when given, is appended to the progression and is the
/// chord the suggestions follow. Empty entries are skipped. Unparseable
/// symbols are ignored for the key, and an unparseable last chord falls
/// back to the default pool.
pub fn recommend<S: AsRef<str>>(
    progression: &[S],
    current_chord: Option<&str>,
    max_results: usize,
) -> RecommendationSet {
    // Blank but non-empty entries still count as the last chord
    let current = current_chord.filter(|c| !c.is_empty());

    let mut raw: Vec<&str> = progression
        .iter()
        .map(|c| c.as_ref())
        .filter(|c| !c.is_empty())
        .collect();
    let last_raw = current.or_else(|| raw.last().copied());
    raw.extend(current);

    let chords: Vec<ChordSymbol> = raw.iter().filter_map(|c| normalize(c)).collect();
    let (key, confidence) = score_keys(&chords);

    let last_function = last_raw
        .and_then(normalize)
        .and_then(|chord| reinterpret(&chord, &key))
        .map(|label| classify(&label));
    debug!(key = %key, last = ?last_raw, function = ?last_function, "selecting pool");

    let reason = format!("Diatonic choice in {}", key);
    let candidates = pool_for(last_function, key.mode())
        .iter()
        .filter_map(|label| suggest(label, &key, &reason))
        .chain(EXTRAS.iter().filter_map(|(label, why)| suggest(label, &key, why)));

    let mut seen = HashSet::new();
    let recommendations = candidates
        .filter(|r| seen.insert(r.chord.clone()))
        .take(max_results)
        .collect();

    RecommendationSet {
        key_guess: key.to_string(),
        confidence,
        recommendations,
    }
}
