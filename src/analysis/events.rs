// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Vertical slicing of note events and merging of chord events.

use std::collections::BTreeMap;

use super::{ChordEvent, NoteEvent};

/// Notes sounding together over one stretch of time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sonority {
    /// Start of the slice in ticks
    pub start_tick: u64,
    /// Length of the slice in ticks
    pub duration_ticks: u64,
    /// Sounding MIDI notes, ascending
    pub notes: Vec<u8>,
}

impl Sonority {
    /// Number of distinct pitch classes sounding
    pub fn pitch_class_count(&self) -> usize {
        let mut seen = [false; 12];
        for &note in &self.notes {
            seen[(note % 12) as usize] = true;
        }
        seen.iter().filter(|&&s| s).count()
    }
}

/// Cut the timeline at every note start and end.
///
/// Each stretch with at least one sounding note becomes a sonority.
/// Zero-length notes never sound.
pub fn chordify(notes: &[NoteEvent]) -> Vec<Sonority> {
    // (tick, is_start, note)
    let mut edges: Vec<(u64, bool, u8)> = notes
        .iter()
        .filter(|n| n.duration > 0)
        .flat_map(|n| [(n.start_tick, true, n.note), (n.end_tick(), false, n.note)])
        .collect();
    edges.sort_unstable();

    // Sounding notes with how many events hold each one
    let mut sounding: BTreeMap<u8, usize> = BTreeMap::new();
    let mut slices = Vec::new();
    let mut edges = edges.into_iter().peekable();

    while let Some((tick, is_start, note)) = edges.next() {
        if is_start {
            *sounding.entry(note).or_insert(0) += 1;
        } else if let Some(count) = sounding.get_mut(&note) {
            *count -= 1;
            if *count == 0 {
                sounding.remove(&note);
            }
        }

        match edges.peek() {
            Some(&(next, _, _)) if next > tick && !sounding.is_empty() => slices.push(Sonority {
                start_tick: tick,
                duration_ticks: next - tick,
                notes: sounding.keys().copied().collect(),
            }),
            _ => {}
        }
    }

    slices
}

/// Merge runs of events that share a chord name, summing durations.
///
/// The first event of each run keeps its other fields.
pub fn merge_consecutive(events: Vec<ChordEvent>) -> Vec<ChordEvent> {
    let mut merged: Vec<ChordEvent> = Vec::with_capacity(events.len());
    for event in events {
        match merged.last_mut() {
            Some(last) if last.chord_name == event.chord_name => {
                last.duration += event.duration;
            }
            _ => merged.push(event),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(offset: f64, duration: f64, name: &str) -> ChordEvent {
        ChordEvent {
            offset,
            duration,
            pitch_classes: vec![],
            chord_name: name.to_string(),
            scale_degree: None,
            symbol: String::new(),
        }
    }

    #[test]
    fn test_chordify_block_chords() {
        let notes = vec![
            NoteEvent::new(0, 24, 60, 100),
            NoteEvent::new(0, 24, 64, 100),
            NoteEvent::new(0, 24, 67, 100),
            NoteEvent::new(24, 24, 62, 100),
            NoteEvent::new(24, 24, 65, 100),
        ];
        let slices = chordify(&notes);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].notes, vec![60, 64, 67]);
        assert_eq!(slices[0].duration_ticks, 24);
        assert_eq!(slices[1].start_tick, 24);
        assert_eq!(slices[1].notes, vec![62, 65]);
    }

    #[test]
    fn test_chordify_overlaps_and_gaps() {
        let notes = vec![
            NoteEvent::new(0, 48, 48, 100),
            NoteEvent::new(12, 12, 64, 100),
            NoteEvent::new(72, 24, 67, 100),
            NoteEvent::new(80, 0, 70, 100),
        ];
        let slices = chordify(&notes);
        let spans: Vec<(u64, u64)> = slices.iter().map(|s| (s.start_tick, s.duration_ticks)).collect();
        assert_eq!(spans, vec![(0, 12), (12, 12), (24, 24), (72, 24)]);
        assert_eq!(slices[1].notes, vec![48, 64]);
        assert_eq!(slices[3].notes, vec![67]);
    }

    #[test]
    fn test_chordify_repeated_pitch_overlaps() {
        let notes = vec![NoteEvent::new(0, 48, 60, 100), NoteEvent::new(24, 48, 60, 100)];
        let slices = chordify(&notes);
        let spans: Vec<(u64, u64)> = slices.iter().map(|s| (s.start_tick, s.duration_ticks)).collect();
        assert_eq!(spans, vec![(0, 24), (24, 24), (48, 24)]);
        assert!(slices.iter().all(|s| s.notes == vec![60]));
    }

    #[test]
    fn test_chordify_dense_passage() {
        // Pedal under a run of overlapping notes, plus a pitch restruck as it ends
        let mut notes = vec![NoteEvent::new(0, 2400, 36, 100)];
        for i in 0..200u64 {
            notes.push(NoteEvent::new(i * 12, 18, 60 + (i % 24) as u8, 100));
        }
        notes.push(NoteEvent::new(2388, 24, 60, 100));
        notes.push(NoteEvent::new(2412, 12, 60, 100));

        let slices = chordify(&notes);

        // Every stretch between consecutive boundaries, checked note by note
        let mut boundaries: Vec<u64> = notes.iter().flat_map(|n| [n.start_tick, n.end_tick()]).collect();
        boundaries.sort_unstable();
        boundaries.dedup();
        let expected: Vec<Sonority> = boundaries
            .windows(2)
            .filter_map(|w| {
                let mut sounding: Vec<u8> = notes
                    .iter()
                    .filter(|n| n.start_tick <= w[0] && n.end_tick() >= w[1])
                    .map(|n| n.note)
                    .collect();
                sounding.sort_unstable();
                sounding.dedup();
                (!sounding.is_empty()).then(|| Sonority {
                    start_tick: w[0],
                    duration_ticks: w[1] - w[0],
                    notes: sounding,
                })
            })
            .collect();

        assert_eq!(slices, expected);
        assert_eq!(slices[1].notes, vec![36, 60, 61]);
        assert_eq!(slices.last().map(|s| s.notes.clone()), Some(vec![60]));
    }

    #[test]
    fn test_chordify_end_tick_saturates() {
        let notes = vec![
            NoteEvent::new(u64::MAX - 10, 100, 60, 100),
            NoteEvent::new(u64::MAX - 10, 100, 64, 100),
        ];
        let slices = chordify(&notes);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].duration_ticks, 10);
        assert_eq!(slices[0].notes, vec![60, 64]);
    }

    #[test]
    fn test_pitch_class_count() {
        let octaves = Sonority {
            start_tick: 0,
            duration_ticks: 24,
            notes: vec![48, 60, 72],
        };
        assert_eq!(octaves.pitch_class_count(), 1);
    }

    #[test]
    fn test_merge_consecutive() {
        let events = vec![
            event(0.0, 1.0, "major triad"),
            event(1.0, 0.5, "major triad"),
            event(1.5, 1.0, "minor triad"),
            event(2.5, 1.0, "major triad"),
        ];
        let merged = merge_consecutive(events);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].duration, 1.5);
        assert_eq!(merged[0].offset, 0.0);
        assert_eq!(merged[2].offset, 2.5);
    }
}
