// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord symbols.
//!
//! Parses textual chord labels ("Am7", "F#dim", "C/E") into a root, a
//! triad quality and a list of chord tones, normalizes sloppy input with a
//! single rewrite-and-retry pass, and identifies chords from sounding
//! pitch sets.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::scale::{Note, Spelling};
use crate::error::ChordParseError;

/// Triad quality of a chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Other,
}

impl Quality {
    /// Display suffix appended to the root name
    pub fn suffix(self) -> &'static str {
        match self {
            Quality::Major => "",
            Quality::Minor => "m",
            Quality::Diminished => "dim",
            Quality::Augmented => "aug",
            Quality::Other => "",
        }
    }

    /// Derive the triad quality from the third and fifth present
    pub fn from_tones(tones: &[ChordTone]) -> Self {
        let has = |semitones: u8| tones.iter().any(|t| t.semitones == semitones);
        if has(4) && has(7) {
            Quality::Major
        } else if has(3) && has(7) {
            Quality::Minor
        } else if has(3) && has(6) {
            Quality::Diminished
        } else if has(4) && has(8) {
            Quality::Augmented
        } else {
            Quality::Other
        }
    }

    /// Whether roman numerals for this quality are written lowercase
    pub fn is_lowercase(self) -> bool {
        matches!(self, Quality::Minor | Quality::Diminished)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quality::Major => "major",
            Quality::Minor => "minor",
            Quality::Diminished => "diminished",
            Quality::Augmented => "augmented",
            Quality::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// One chord tone relative to the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChordTone {
    /// Semitones above the root (0-11)
    pub semitones: u8,
    /// Generic interval number folded into an octave (1 = root, 3 = third, ...)
    pub degree: u8,
}

impl ChordTone {
    /// Create a chord tone
    pub const fn new(semitones: u8, degree: u8) -> Self {
        Self { semitones, degree }
    }

    /// Chord tone for an arbitrary interval, guessing the generic degree
    pub fn from_semitones(semitones: u8) -> Self {
        const DEGREES: [u8; 12] = [1, 2, 2, 3, 3, 4, 5, 5, 6, 6, 7, 7];
        let semitones = semitones % 12;
        Self::new(semitones, DEGREES[semitones as usize])
    }
}

const fn tone(semitones: u8, degree: u8) -> ChordTone {
    ChordTone::new(semitones, degree)
}

const MAJOR: &[ChordTone] = &[tone(0, 1), tone(4, 3), tone(7, 5)];
const MINOR: &[ChordTone] = &[tone(0, 1), tone(3, 3), tone(7, 5)];
const DIMINISHED: &[ChordTone] = &[tone(0, 1), tone(3, 3), tone(6, 5)];
const AUGMENTED: &[ChordTone] = &[tone(0, 1), tone(4, 3), tone(8, 5)];
const DOMINANT_7: &[ChordTone] = &[tone(0, 1), tone(4, 3), tone(7, 5), tone(10, 7)];
const MAJOR_7: &[ChordTone] = &[tone(0, 1), tone(4, 3), tone(7, 5), tone(11, 7)];
const MINOR_7: &[ChordTone] = &[tone(0, 1), tone(3, 3), tone(7, 5), tone(10, 7)];
const DIMINISHED_7: &[ChordTone] = &[tone(0, 1), tone(3, 3), tone(6, 5), tone(9, 7)];
const HALF_DIMINISHED_7: &[ChordTone] = &[tone(0, 1), tone(3, 3), tone(6, 5), tone(10, 7)];
const AUGMENTED_7: &[ChordTone] = &[tone(0, 1), tone(4, 3), tone(8, 5), tone(10, 7)];
const MAJOR_6: &[ChordTone] = &[tone(0, 1), tone(4, 3), tone(7, 5), tone(9, 6)];
const MINOR_6: &[ChordTone] = &[tone(0, 1), tone(3, 3), tone(7, 5), tone(9, 6)];
const DOMINANT_9: &[ChordTone] = &[tone(0, 1), tone(4, 3), tone(7, 5), tone(10, 7), tone(2, 2)];
const MAJOR_9: &[ChordTone] = &[tone(0, 1), tone(4, 3), tone(7, 5), tone(11, 7), tone(2, 2)];
const MINOR_9: &[ChordTone] = &[tone(0, 1), tone(3, 3), tone(7, 5), tone(10, 7), tone(2, 2)];
const ADD_9: &[ChordTone] = &[tone(0, 1), tone(4, 3), tone(7, 5), tone(2, 2)];
const SUS_2: &[ChordTone] = &[tone(0, 1), tone(2, 2), tone(7, 5)];
const SUS_4: &[ChordTone] = &[tone(0, 1), tone(5, 4), tone(7, 5)];
const SEVEN_SUS_4: &[ChordTone] = &[tone(0, 1), tone(5, 4), tone(7, 5), tone(10, 7)];
const POWER: &[ChordTone] = &[tone(0, 1), tone(7, 5)];

/// Recognized suffixes, matched exactly
const SUFFIXES: &[(&str, &[ChordTone])] = &[
    ("", MAJOR),
    ("M", MAJOR),
    ("m", MINOR),
    ("dim", DIMINISHED),
    ("°", DIMINISHED),
    ("o", DIMINISHED),
    ("aug", AUGMENTED),
    ("+", AUGMENTED),
    ("7", DOMINANT_7),
    ("maj7", MAJOR_7),
    ("M7", MAJOR_7),
    ("m7", MINOR_7),
    ("dim7", DIMINISHED_7),
    ("°7", DIMINISHED_7),
    ("o7", DIMINISHED_7),
    ("m7b5", HALF_DIMINISHED_7),
    ("ø", HALF_DIMINISHED_7),
    ("ø7", HALF_DIMINISHED_7),
    ("aug7", AUGMENTED_7),
    ("+7", AUGMENTED_7),
    ("6", MAJOR_6),
    ("m6", MINOR_6),
    ("9", DOMINANT_9),
    ("maj9", MAJOR_9),
    ("m9", MINOR_9),
    ("add9", ADD_9),
    ("sus2", SUS_2),
    ("sus4", SUS_4),
    ("sus", SUS_4),
    ("7sus4", SEVEN_SUS_4),
    ("5", POWER),
];

/// Templates for naming sounding pitch sets, in priority order
const TEMPLATES: &[(&str, &[ChordTone])] = &[
    ("major triad", MAJOR),
    ("minor triad", MINOR),
    ("diminished triad", DIMINISHED),
    ("augmented triad", AUGMENTED),
    ("dominant seventh chord", DOMINANT_7),
    ("major seventh chord", MAJOR_7),
    ("minor seventh chord", MINOR_7),
    ("diminished seventh chord", DIMINISHED_7),
    ("half-diminished seventh chord", HALF_DIMINISHED_7),
    ("augmented seventh chord", AUGMENTED_7),
    ("suspended-fourth triad", SUS_4),
    ("suspended-second triad", SUS_2),
    ("dominant ninth chord", DOMINANT_9),
    ("power chord", POWER),
];

/// A successfully interpreted chord symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordSymbol {
    text: String,
    root: Note,
    quality: Quality,
    tones: Vec<ChordTone>,
    bass: Option<Note>,
}

impl ChordSymbol {
    /// Interpret a chord symbol such as "C", "F#m7", "Bb/D" or "Gsus4"
    pub fn parse(s: &str) -> Result<Self, ChordParseError> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ChordParseError::Empty);
        }

        let (body, bass_str) = match text.split_once('/') {
            Some((body, bass)) => (body, Some(bass)),
            None => (text, None),
        };

        let (root, consumed) =
            Note::parse_prefix(body).ok_or_else(|| ChordParseError::UnknownRoot(text.to_string()))?;
        let suffix = &body[consumed..];

        let template = SUFFIXES
            .iter()
            .find(|(name, _)| *name == suffix)
            .map(|(_, tones)| *tones)
            .ok_or_else(|| ChordParseError::UnknownSuffix {
                symbol: text.to_string(),
                suffix: suffix.to_string(),
            })?;

        let bass = match bass_str {
            Some(b) => Some(Note::from_str(b).ok_or_else(|| ChordParseError::InvalidBass {
                symbol: text.to_string(),
                bass: b.to_string(),
            })?),
            None => None,
        };

        let mut chord = Self::from_tones(root, template.to_vec());
        chord.text = text.to_string();
        if let Some(bass) = bass {
            chord.set_bass(bass);
        }
        Ok(chord)
    }

    /// Build a chord from a root and its tones
    pub fn from_tones(root: Note, tones: Vec<ChordTone>) -> Self {
        let quality = Quality::from_tones(&tones);
        Self {
            text: symbolize(root, quality, Spelling::Sharps),
            root,
            quality,
            tones,
            bass: None,
        }
    }

    fn set_bass(&mut self, bass: Note) {
        let semitones = self.root.interval_to(bass);
        if !self.tones.iter().any(|t| t.semitones == semitones) {
            self.tones.push(ChordTone::from_semitones(semitones));
        }
        self.bass = Some(bass);
    }

    /// Get the root note
    pub fn root(&self) -> Note {
        self.root
    }

    /// Get the triad quality
    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Chord tones relative to the root, root first
    pub fn tones(&self) -> &[ChordTone] {
        &self.tones
    }

    /// Slash bass, if one was written
    pub fn bass(&self) -> Option<Note> {
        self.bass
    }

    /// Whether a seventh is present
    pub fn has_seventh(&self) -> bool {
        self.tones.iter().any(|t| t.degree == 7)
    }

    /// Sounding pitch classes, ascending from C
    pub fn pitch_classes(&self) -> Vec<Note> {
        let mut notes: Vec<Note> = self
            .tones
            .iter()
            .map(|t| self.root.transpose(t.semitones as i8))
            .collect();
        notes.sort();
        notes.dedup();
        notes
    }

    /// Canonical display symbol under a spelling
    pub fn symbol(&self, spelling: Spelling) -> String {
        symbolize(self.root, self.quality, spelling)
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Canonical display string for a root and quality ("C", "Am", "Bdim", "Eaug")
pub fn symbolize(root: Note, quality: Quality, spelling: Spelling) -> String {
    format!("{}{}", root.name(spelling), quality.suffix())
}

/// Rewrites tried once when a symbol does not parse as written
const FALLBACK_REWRITES: [(&str, &str); 4] = [("major", ""), ("minor", "m"), ("maj", ""), ("min", "m")];

/// Turn a raw chord label into a chord, or reject it.
///
/// Rejected labels are `None`; callers filter them out.
pub fn normalize(raw: &str) -> Option<ChordSymbol> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let first_error = match ChordSymbol::parse(trimmed) {
        Ok(chord) => return Some(chord),
        Err(e) => e,
    };

    let retry = fallback_spelling(trimmed);
    match ChordSymbol::parse(&retry) {
        Ok(chord) => {
            debug!(raw = trimmed, rewritten = %retry, "chord symbol accepted after rewrite");
            Some(chord)
        }
        Err(_) => {
            debug!(raw = trimmed, error = %first_error, "rejected chord symbol");
            None
        }
    }
}

fn fallback_spelling(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let split = Note::parse_prefix(&compact).map(|(_, len)| len).unwrap_or(0);
    let (root, rest) = compact.split_at(split);

    let mut suffix = rest.to_string();
    for (word, replacement) in FALLBACK_REWRITES {
        let mut from = 0;
        while let Some(pos) = suffix.to_ascii_lowercase()[from..].find(word).map(|p| p + from) {
            let end = pos + word.len();
            // "maj7" and "maj9" are already valid suffixes
            if replacement.is_empty() && suffix[end..].starts_with(|c: char| c.is_ascii_digit()) {
                from = end;
                continue;
            }
            suffix.replace_range(pos..end, replacement);
            from = pos + replacement.len();
        }
    }

    format!("{}{}", root, suffix)
}

/// A chord recognized from sounding notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedChord {
    /// The recognized chord
    pub chord: ChordSymbol,
    /// Descriptive name ("major triad", "dominant seventh chord", ...)
    pub name: String,
}

/// Identify a chord from MIDI note numbers.
///
/// Exact template matches win in template order, trying the bass note as
/// root first. Sets that match nothing are described from the bass up.
pub fn identify(notes: &[u8]) -> Option<IdentifiedChord> {
    let bass = Note::from_pitch_class(*notes.iter().min()? % 12);

    let mut pcs: Vec<Note> = notes.iter().map(|&n| Note::from_pitch_class(n % 12)).collect();
    pcs.sort();
    pcs.dedup();

    let mut roots = vec![bass];
    roots.extend(pcs.iter().copied().filter(|&n| n != bass));

    let intervals_from = |root: Note| -> Vec<u8> {
        let mut intervals: Vec<u8> = pcs.iter().map(|&n| root.interval_to(n)).collect();
        intervals.sort_unstable();
        intervals
    };

    for (name, template) in TEMPLATES {
        let mut wanted: Vec<u8> = template.iter().map(|t| t.semitones).collect();
        wanted.sort_unstable();

        if let Some(&root) = roots.iter().find(|&&root| intervals_from(root) == wanted) {
            let mut chord = ChordSymbol::from_tones(root, template.to_vec());
            if root != bass {
                chord.set_bass(bass);
            }
            return Some(IdentifiedChord {
                chord,
                name: (*name).to_string(),
            });
        }
    }

    let tones = intervals_from(bass)
        .into_iter()
        .map(ChordTone::from_semitones)
        .collect();
    Some(IdentifiedChord {
        chord: ChordSymbol::from_tones(bass, tones),
        name: format!("{}-note chord", pcs.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triads() {
        let c = ChordSymbol::parse("C").unwrap();
        assert_eq!(c.root(), Note::C);
        assert_eq!(c.quality(), Quality::Major);
        assert_eq!(c.pitch_classes(), vec![Note::C, Note::E, Note::G]);

        let am = ChordSymbol::parse("Am").unwrap();
        assert_eq!(am.quality(), Quality::Minor);

        let bdim = ChordSymbol::parse("Bdim").unwrap();
        assert_eq!(bdim.quality(), Quality::Diminished);

        let caug = ChordSymbol::parse("C+").unwrap();
        assert_eq!(caug.quality(), Quality::Augmented);
    }

    #[test]
    fn test_parse_sevenths_and_accidentals() {
        let g7 = ChordSymbol::parse("G7").unwrap();
        assert_eq!(g7.quality(), Quality::Major);
        assert!(g7.has_seventh());
        assert_eq!(g7.pitch_classes(), vec![Note::D, Note::F, Note::G, Note::B]);

        let fsm7 = ChordSymbol::parse("F#m7").unwrap();
        assert_eq!(fsm7.root(), Note::Fs);
        assert_eq!(fsm7.quality(), Quality::Minor);

        let bb = ChordSymbol::parse("Bbmaj7").unwrap();
        assert_eq!(bb.root(), Note::As);

        let half_dim = ChordSymbol::parse("Bm7b5").unwrap();
        assert_eq!(half_dim.quality(), Quality::Diminished);
    }

    #[test]
    fn test_parse_sus_is_other() {
        let sus = ChordSymbol::parse("Gsus4").unwrap();
        assert_eq!(sus.quality(), Quality::Other);
        assert_eq!(sus.symbol(Spelling::Sharps), "G");
    }

    #[test]
    fn test_parse_slash_bass() {
        let c_e = ChordSymbol::parse("C/E").unwrap();
        assert_eq!(c_e.bass(), Some(Note::E));
        assert_eq!(c_e.tones().len(), 3);

        let c_bb = ChordSymbol::parse("C/Bb").unwrap();
        assert_eq!(c_bb.tones().len(), 4);
        assert_eq!(c_bb.quality(), Quality::Major);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(ChordSymbol::parse("  "), Err(ChordParseError::Empty));
        assert!(matches!(
            ChordSymbol::parse("Xyz123"),
            Err(ChordParseError::UnknownRoot(_))
        ));
        assert!(matches!(
            ChordSymbol::parse("Cwhatever"),
            Err(ChordParseError::UnknownSuffix { .. })
        ));
        assert!(matches!(
            ChordSymbol::parse("C/H"),
            Err(ChordParseError::InvalidBass { .. })
        ));
    }

    #[test]
    fn test_normalize_direct_and_fallback() {
        assert_eq!(normalize(" Am ").unwrap().quality(), Quality::Minor);

        let cmaj = normalize("Cmaj").unwrap();
        assert_eq!(cmaj.root(), Note::C);
        assert_eq!(cmaj.quality(), Quality::Major);

        let amin7 = normalize("Amin7").unwrap();
        assert_eq!(amin7.quality(), Quality::Minor);
        assert!(amin7.has_seventh());

        let spaced = normalize("C maj7").unwrap();
        assert!(spaced.tones().contains(&ChordTone::new(11, 7)));

        let spelled = normalize("D Minor").unwrap();
        assert_eq!(spelled.root(), Note::D);
        assert_eq!(spelled.quality(), Quality::Minor);
    }

    #[test]
    fn test_display_keeps_interpreted_text() {
        let chord = normalize(" Bbmaj7 ").unwrap();
        assert_eq!(chord.to_string(), "Bbmaj7");
        assert_eq!(chord.symbol(Spelling::Flats), "Bb");

        // The rewritten form is what was interpreted
        assert_eq!(normalize("Amin7").unwrap().to_string(), "Am7");
    }

    #[test]
    fn test_normalize_rejects() {
        assert!(normalize("").is_none());
        assert!(normalize("   ").is_none());
        assert!(normalize("Xyz123").is_none());
        assert!(normalize("Cmajorish").is_none());
    }

    #[test]
    fn test_fallback_spelling() {
        assert_eq!(fallback_spelling("C major"), "C");
        assert_eq!(fallback_spelling("Bbminor"), "Bbm");
        assert_eq!(fallback_spelling("EbMAJ"), "Eb");
        assert_eq!(fallback_spelling("Fmin"), "Fm");
        assert_eq!(fallback_spelling("C maj7"), "Cmaj7");
    }

    #[test]
    fn test_symbolize() {
        assert_eq!(symbolize(Note::C, Quality::Major, Spelling::Sharps), "C");
        assert_eq!(symbolize(Note::A, Quality::Minor, Spelling::Sharps), "Am");
        assert_eq!(symbolize(Note::B, Quality::Diminished, Spelling::Sharps), "Bdim");
        assert_eq!(symbolize(Note::Gs, Quality::Augmented, Spelling::Flats), "Abaug");
        assert_eq!(symbolize(Note::As, Quality::Other, Spelling::Flats), "Bb");
    }

    #[test]
    fn test_identify_triads() {
        let c = identify(&[60, 64, 67]).unwrap();
        assert_eq!(c.chord.root(), Note::C);
        assert_eq!(c.name, "major triad");

        // First inversion keeps the real root
        let c6 = identify(&[52, 60, 67]).unwrap();
        assert_eq!(c6.chord.root(), Note::C);
        assert_eq!(c6.chord.bass(), Some(Note::E));

        let dm = identify(&[62, 65, 69, 74]).unwrap();
        assert_eq!(dm.chord.quality(), Quality::Minor);
        assert_eq!(dm.name, "minor triad");
    }

    #[test]
    fn test_identify_sevenths_and_fallback() {
        let g7 = identify(&[55, 59, 62, 65]).unwrap();
        assert_eq!(g7.chord.root(), Note::G);
        assert_eq!(g7.name, "dominant seventh chord");

        let cluster = identify(&[60, 61, 62]).unwrap();
        assert_eq!(cluster.chord.root(), Note::C);
        assert_eq!(cluster.name, "3-note chord");

        assert!(identify(&[]).is_none());
    }
}
