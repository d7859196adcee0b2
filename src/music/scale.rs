// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Notes, scales and the 24 candidate keys.
//!
//! Provides pitch-class naming and spelling, the scales a key is built
//! from, and the fixed major/minor key enumeration used for key finding.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pitch class (0-11, C = 0)
pub type PitchClass = u8;

/// Semitone offset type
pub type Semitones = i8;

/// Note names (pitch classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Note {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

const SHARP_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
const FLAT_NAMES: [&str; 12] = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B"];

/// How black-key pitch classes are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the pitch class (0-11) for this note
    pub fn pitch_class(self) -> PitchClass {
        self as PitchClass
    }

    /// Get note from pitch class
    pub fn from_pitch_class(pc: PitchClass) -> Self {
        Note::ALL[(pc % 12) as usize]
    }

    /// Parse a complete note name (e.g., "C", "F#", "Bb", "Ebb")
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        match Self::parse_prefix(s) {
            Some((note, len)) if len == s.len() => Some(note),
            _ => None,
        }
    }

    /// Parse a note name at the start of `s`.
    ///
    /// Returns the note and the number of bytes consumed. The letter must be
    /// uppercase; any run of `#`/`b` (or `♯`/`♭`) after it is applied.
    pub fn parse_prefix(s: &str) -> Option<(Self, usize)> {
        let mut chars = s.char_indices();
        let (_, letter) = chars.next()?;
        let natural: i16 = match letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };

        let mut offset = 0i16;
        let mut consumed = letter.len_utf8();
        for (idx, c) in chars {
            match c {
                '#' | '♯' => offset = (offset + 1).rem_euclid(12),
                'b' | '♭' => offset = (offset - 1).rem_euclid(12),
                _ => break,
            }
            consumed = idx + c.len_utf8();
        }

        let pc = (natural + offset).rem_euclid(12) as PitchClass;
        Some((Note::from_pitch_class(pc), consumed))
    }

    /// Transpose by semitones
    pub fn transpose(self, semitones: Semitones) -> Self {
        let new_pc = (self.pitch_class() as i16 + semitones as i16).rem_euclid(12) as u8;
        Note::from_pitch_class(new_pc)
    }

    /// Get interval in semitones to another note (ascending)
    pub fn interval_to(self, other: Note) -> u8 {
        (other.pitch_class() as i16 - self.pitch_class() as i16).rem_euclid(12) as u8
    }

    /// Name of this note under the given spelling
    pub fn name(self, spelling: Spelling) -> &'static str {
        match spelling {
            Spelling::Sharps => SHARP_NAMES[self as usize],
            Spelling::Flats => FLAT_NAMES[self as usize],
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(Spelling::Sharps))
    }
}

/// Key mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    /// Parse mode from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" | "maj" => Some(Mode::Major),
            "minor" | "min" => Some(Mode::Minor),
            _ => None,
        }
    }

    /// Lowercase name used in key strings
    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Scale types a key is assembled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleType {
    Major,
    NaturalMinor,
    HarmonicMinor,
}

impl ScaleType {
    /// Get the intervals (semitones from root) for this scale type
    pub fn intervals(self) -> [u8; 7] {
        match self {
            ScaleType::Major => [0, 2, 4, 5, 7, 9, 11],
            ScaleType::NaturalMinor => [0, 2, 3, 5, 7, 8, 10],
            ScaleType::HarmonicMinor => [0, 2, 3, 5, 7, 8, 11],
        }
    }
}

/// A seven-note scale with root and type
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    root: Note,
    scale_type: ScaleType,
    notes: [Note; 7],
}

impl Scale {
    /// Create a new scale from root and type
    pub fn new(root: Note, scale_type: ScaleType) -> Self {
        let notes = scale_type.intervals().map(|i| root.transpose(i as Semitones));
        Self {
            root,
            scale_type,
            notes,
        }
    }

    /// Get the root note
    pub fn root(&self) -> Note {
        self.root
    }

    /// Get the scale type
    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    /// Get the intervals (semitones from root)
    pub fn intervals(&self) -> [u8; 7] {
        self.scale_type.intervals()
    }

    /// Get the notes in this scale
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Check if a note is in this scale
    pub fn contains(&self, note: Note) -> bool {
        self.notes.contains(&note)
    }

    /// Get the scale degree (1-based) for a note, if it's in the scale
    pub fn degree_of(&self, note: Note) -> Option<usize> {
        self.notes.iter().position(|&n| n == note).map(|i| i + 1)
    }

    /// Get the note at a given scale degree (1-based, wraps past 7)
    pub fn note_at_degree(&self, degree: usize) -> Option<Note> {
        if degree == 0 {
            return None;
        }
        Some(self.notes[(degree - 1) % 7])
    }
}

/// Tonic names in candidate order, shared by both modes
const KEY_TONIC_NAMES: [&str; 12] = ["C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B"];

/// A musical key: tonic plus major/minor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    tonic: Note,
    mode: Mode,
}

impl Key {
    /// The 24 candidate keys: the twelve majors in chromatic order, then
    /// the twelve minors. Ties during key finding resolve to the earlier entry.
    pub const CANDIDATES: [Key; 24] = [
        Key::new(Note::C, Mode::Major),
        Key::new(Note::Cs, Mode::Major),
        Key::new(Note::D, Mode::Major),
        Key::new(Note::Ds, Mode::Major),
        Key::new(Note::E, Mode::Major),
        Key::new(Note::F, Mode::Major),
        Key::new(Note::Fs, Mode::Major),
        Key::new(Note::G, Mode::Major),
        Key::new(Note::Gs, Mode::Major),
        Key::new(Note::A, Mode::Major),
        Key::new(Note::As, Mode::Major),
        Key::new(Note::B, Mode::Major),
        Key::new(Note::C, Mode::Minor),
        Key::new(Note::Cs, Mode::Minor),
        Key::new(Note::D, Mode::Minor),
        Key::new(Note::Ds, Mode::Minor),
        Key::new(Note::E, Mode::Minor),
        Key::new(Note::F, Mode::Minor),
        Key::new(Note::Fs, Mode::Minor),
        Key::new(Note::G, Mode::Minor),
        Key::new(Note::Gs, Mode::Minor),
        Key::new(Note::A, Mode::Minor),
        Key::new(Note::As, Mode::Minor),
        Key::new(Note::B, Mode::Minor),
    ];

    /// Create a new key
    pub const fn new(tonic: Note, mode: Mode) -> Self {
        Self { tonic, mode }
    }

    /// Parse a key string such as "C major", "Eb minor" or "f# minor"
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let tonic_str = parts.next()?;
        let mode = Mode::from_str(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }

        let mut tonic_chars = tonic_str.chars();
        let first = tonic_chars.next()?.to_ascii_uppercase();
        let tonic = Note::from_str(&format!("{}{}", first, tonic_chars.as_str()))?;
        Some(Key::new(tonic, mode))
    }

    /// Get the tonic note
    pub fn tonic(&self) -> Note {
        self.tonic
    }

    /// Get the mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Tonic as written in key names
    pub fn tonic_name(&self) -> &'static str {
        KEY_TONIC_NAMES[self.tonic as usize]
    }

    /// The natural scale of this key (major, or natural minor)
    pub fn scale(&self) -> Scale {
        match self.mode {
            Mode::Major => Scale::new(self.tonic, ScaleType::Major),
            Mode::Minor => Scale::new(self.tonic, ScaleType::NaturalMinor),
        }
    }

    /// Whether a note belongs to the key's pitch collection.
    ///
    /// Minor keys admit the raised seventh alongside the natural minor scale.
    pub fn contains(&self, note: Note) -> bool {
        match self.mode {
            Mode::Major => self.scale().contains(note),
            Mode::Minor => {
                self.scale().contains(note)
                    || Scale::new(self.tonic, ScaleType::HarmonicMinor).contains(note)
            }
        }
    }

    /// Number of sharps (positive) or flats (negative) in the key signature
    pub fn signature(&self) -> i8 {
        let relative_major = match self.mode {
            Mode::Major => self.tonic,
            Mode::Minor => self.tonic.transpose(3),
        };
        let fifths = (relative_major.pitch_class() as i8 * 7).rem_euclid(12);
        if fifths > 6 {
            fifths - 12
        } else {
            fifths
        }
    }

    /// Spelling used for chord roots in this key
    pub fn spelling(&self) -> Spelling {
        let name = self.tonic_name();
        if name.contains('b') {
            Spelling::Flats
        } else if name.contains('#') || self.signature() >= 0 {
            Spelling::Sharps
        } else {
            Spelling::Flats
        }
    }
}

impl Default for Key {
    fn default() -> Self {
        Key::new(Note::C, Mode::Major)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic_name(), self.mode)
    }
}
