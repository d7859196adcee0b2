// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord analysis of timed note events.
//!
//! Slices decoded notes into vertical sonorities, drops fragments too
//! short or too thin to be chords, names each chord, labels it in the
//! estimated key of the whole passage, and merges repeats.

pub mod events;
pub mod profile;

pub use events::{chordify, merge_consecutive, Sonority};
pub use profile::estimate_key;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisSettings;
use crate::music::chord::identify;
use crate::music::roman::{reinterpret, ScaleDegree};

/// A decoded note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Start time in ticks
    pub start_tick: u64,
    /// Duration in ticks
    pub duration: u64,
    /// MIDI note number (0-127)
    pub note: u8,
    /// Velocity (0-127)
    #[serde(default = "default_velocity")]
    pub velocity: u8,
}

fn default_velocity() -> u8 {
    100
}

impl NoteEvent {
    /// Create a new note event
    pub fn new(start_tick: u64, duration: u64, note: u8, velocity: u8) -> Self {
        Self {
            start_tick,
            duration,
            note,
            velocity,
        }
    }

    /// Tick at which the note stops sounding
    pub fn end_tick(&self) -> u64 {
        self.start_tick.saturating_add(self.duration)
    }
}

/// A YAML file of note events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteDocument {
    /// Resolution of the tick values, if not the configured one
    #[serde(default)]
    pub ppqn: Option<u32>,
    pub notes: Vec<NoteEvent>,
}

impl NoteDocument {
    /// Load a note document from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read note file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a note document from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse note YAML")
    }
}

/// One chord in the analysis, timed in quarter notes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChordEvent {
    pub offset: f64,
    pub duration: f64,
    /// Distinct pitch-class names, ascending from C
    pub pitch_classes: Vec<String>,
    /// Descriptive name ("major triad", ...)
    pub chord_name: String,
    /// Scale degree in the estimated key, when the chord has one
    pub scale_degree: Option<ScaleDegree>,
    /// Chord symbol spelled for the key
    pub symbol: String,
}

/// Key and chord timeline of a passage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChordAnalysis {
    pub key: String,
    pub confidence: f64,
    pub events: Vec<ChordEvent>,
}

/// Analyze a passage of notes.
pub fn analyze(notes: &[NoteEvent], settings: &AnalysisSettings) -> ChordAnalysis {
    let (key, confidence) = estimate_key(notes);
    let spelling = key.spelling();
    let quarter = settings.ppqn.max(1) as f64;

    let sonorities = chordify(notes);
    let total = sonorities.len();

    let mut chord_events: Vec<ChordEvent> = sonorities
        .into_iter()
        .filter(|s| s.duration_ticks >= settings.min_duration_ticks)
        .filter(|s| s.pitch_class_count() >= settings.min_pitch_classes)
        .filter_map(|s| {
            let identified = identify(&s.notes)?;
            let chord = identified.chord;
            Some(ChordEvent {
                offset: s.start_tick as f64 / quarter,
                duration: s.duration_ticks as f64 / quarter,
                pitch_classes: chord
                    .pitch_classes()
                    .iter()
                    .map(|n| n.name(spelling).to_string())
                    .collect(),
                chord_name: identified.name,
                scale_degree: reinterpret(&chord, &key),
                symbol: chord.symbol(spelling),
            })
        })
        .collect();
    debug!(sonorities = total, kept = chord_events.len(), "filtered sonorities");

    chord_events.sort_by(|a, b| a.offset.total_cmp(&b.offset));

    ChordAnalysis {
        key: key.to_string(),
        confidence,
        events: merge_consecutive(chord_events),
    }
}
