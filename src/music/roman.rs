// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Roman-numeral scale-degree labels.
//!
//! Reinterprets a chord as a scale degree of a key ("V7", "ii", "vii°")
//! and realizes a label back into a concrete chord. Minor keys follow the
//! cautionary convention for the sixth and seventh degrees: lowercase
//! numerals sit on the raised note, uppercase on the natural one.

use std::fmt;

use serde::Serialize;

use super::chord::{ChordSymbol, ChordTone, Quality};
use super::scale::{Key, Mode, Note};

const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// A scale-degree label such as "I", "V7", "vii°" or "II#3"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScaleDegree(String);

impl ScaleDegree {
    /// Wrap a label string
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of sharp and flat markers in the label
    pub fn accidental_count(&self) -> usize {
        self.0.chars().filter(|&c| c == '#' || c == 'b').count()
    }

    /// The roman numeral the label starts with.
    ///
    /// Empty when the label opens with an accidental.
    pub fn numeral(&self) -> &str {
        let end = self
            .0
            .find(|c: char| !matches!(c, 'I' | 'V' | 'i' | 'v'))
            .unwrap_or(self.0.len());
        &self.0[..end]
    }

    /// Whether the label names the tonic degree, in either case
    pub fn is_tonic(&self) -> bool {
        matches!(self.numeral(), "I" | "i")
    }
}

impl fmt::Display for ScaleDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ScaleDegree {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// Label a chord as a scale degree of `key`.
///
/// Fails when the chord's root is not a degree of the key. Chord tones
/// outside the key's pitch collection are written as figured alterations
/// ("II#3" for a major chord on the supertonic of a major key).
pub fn reinterpret(chord: &ChordSymbol, key: &Key) -> Option<ScaleDegree> {
    let intervals = key.scale().intervals();
    let lowercase = chord.quality().is_lowercase();
    let interval = key.tonic().interval_to(chord.root());

    let (index, prefix) = match intervals.iter().position(|&i| i == interval) {
        Some(index) => {
            let contradicts = key.mode() == Mode::Minor && index >= 5 && lowercase;
            (index, if contradicts { "b" } else { "" })
        }
        None if key.mode() == Mode::Minor && (interval == 9 || interval == 11) => {
            let index = if interval == 9 { 5 } else { 6 };
            (index, if lowercase { "" } else { "#" })
        }
        None => return None,
    };

    let mut label = String::from(prefix);
    if lowercase {
        label.push_str(&NUMERALS[index].to_lowercase());
    } else {
        label.push_str(NUMERALS[index]);
    }

    match chord.quality() {
        Quality::Diminished if chord.tones().contains(&ChordTone::new(10, 7)) => label.push('ø'),
        Quality::Diminished => label.push('°'),
        Quality::Augmented => label.push('+'),
        _ => {}
    }
    if chord.has_seventh() {
        label.push('7');
    }

    for tone in chord.tones().iter().filter(|t| t.semitones != 0) {
        if key.contains(chord.root().transpose(tone.semitones as i8)) {
            continue;
        }
        let reference = diatonic_interval(key, index, chord.root(), tone.degree) as i16;
        let diff = (tone.semitones as i16 - reference + 6).rem_euclid(12) - 6;
        label.push(if diff > 0 { '#' } else { 'b' });
        label.push_str(&tone.degree.to_string());
    }

    Some(ScaleDegree(label))
}

/// Semitones from `root` up to the key's natural-scale note a generic
/// `degree` above scale step `index`
fn diatonic_interval(key: &Key, index: usize, root: Note, degree: u8) -> u8 {
    let intervals = key.scale().intervals();
    let target = intervals[(index + degree as usize - 1) % 7] as i16;
    (key.tonic().pitch_class() as i16 + target - root.pitch_class() as i16).rem_euclid(12) as u8
}

/// Build the chord a label names in `key`.
///
/// Accepts `[#b]*<numeral>[°ø+]?[7]?` followed by any figured alterations
/// (`#3`, `b5`, ...). Returns `None` for anything else.
pub fn realize(label: &str, key: &Key) -> Option<ChordSymbol> {
    let mut rest = label.trim();

    let mut shift: i8 = 0;
    loop {
        if let Some(r) = rest.strip_prefix('#') {
            shift = (shift + 1).rem_euclid(12);
            rest = r;
        } else if let Some(r) = rest.strip_prefix('b') {
            shift = (shift - 1).rem_euclid(12);
            rest = r;
        } else {
            break;
        }
    }

    let numeral_len = rest
        .find(|c: char| !matches!(c, 'I' | 'V' | 'i' | 'v'))
        .unwrap_or(rest.len());
    let (numeral, mut rest) = rest.split_at(numeral_len);

    let lowercase = if numeral.chars().all(|c| c.is_ascii_uppercase()) {
        false
    } else if numeral.chars().all(|c| c.is_ascii_lowercase()) {
        true
    } else {
        return None;
    };
    let index = NUMERALS.iter().position(|n| n.eq_ignore_ascii_case(numeral))?;

    let intervals = key.scale().intervals();
    let mut root_interval = intervals[index] as i8;
    if key.mode() == Mode::Minor && index >= 5 && lowercase {
        root_interval += 1;
    }
    let root = key.tonic().transpose(root_interval + shift);

    let (third, fifth, mut seventh) = if let Some(r) = rest.strip_prefix('°') {
        rest = r;
        (3, 6, None)
    } else if let Some(r) = rest.strip_prefix('ø') {
        rest = r;
        (3, 6, Some(10))
    } else if let Some(r) = rest.strip_prefix('+') {
        rest = r;
        (4, 8, None)
    } else if lowercase {
        (3, 7, None)
    } else {
        (4, 7, None)
    };

    if let Some(r) = rest.strip_prefix('7') {
        rest = r;
        seventh.get_or_insert(diatonic_interval(key, index, root, 7));
    }

    let mut tones = vec![
        ChordTone::new(0, 1),
        ChordTone::new(third, 3),
        ChordTone::new(fifth, 5),
    ];
    if let Some(seventh) = seventh {
        tones.push(ChordTone::new(seventh, 7));
    }

    let mut chars = rest.chars();
    while let Some(marker) = chars.next() {
        let step: i8 = match marker {
            '#' => 1,
            'b' => -1,
            _ => return None,
        };
        let degree = chars.next()?.to_digit(10)? as u8;
        let tone = tones.iter_mut().find(|t| t.degree == degree)?;
        let reference = diatonic_interval(key, index, root, degree) as i8;
        tone.semitones = (reference + step).rem_euclid(12) as u8;
    }

    Some(ChordSymbol::from_tones(root, tones))
}
