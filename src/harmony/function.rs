// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Harmonic function buckets for scale-degree labels.

use std::fmt;

use serde::Serialize;

use crate::music::roman::ScaleDegree;

/// Coarse functional role of a chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HarmonicFunction {
    Tonic,
    Predominant,
    Dominant,
    Other,
}

impl HarmonicFunction {
    /// Name used in output
    pub fn name(self) -> &'static str {
        match self {
            HarmonicFunction::Tonic => "Tonic",
            HarmonicFunction::Predominant => "Predominant",
            HarmonicFunction::Dominant => "Dominant",
            HarmonicFunction::Other => "Other",
        }
    }
}

impl fmt::Display for HarmonicFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Classify a label by its leading numeral.
///
/// First matching rule wins: secondary dominants, V and vii are dominant;
/// ii and iv are predominant; i, vi and iii are tonic.
pub fn classify(label: &ScaleDegree) -> HarmonicFunction {
    let numeral = label.numeral();

    if label.as_str().contains("V/") || numeral == "V" || numeral.eq_ignore_ascii_case("vii") {
        HarmonicFunction::Dominant
    } else if matches!(numeral, "ii" | "II" | "iv" | "IV") {
        HarmonicFunction::Predominant
    } else if matches!(numeral, "i" | "I" | "vi" | "VI" | "iii" | "III") {
        HarmonicFunction::Tonic
    } else {
        HarmonicFunction::Other
    }
}
