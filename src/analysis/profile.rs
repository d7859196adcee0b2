// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Key estimation from pitch-class distributions.
//!
//! Correlates a duration-weighted pitch-class histogram against the
//! Krumhansl-Kessler major and minor profiles rotated to each candidate
//! tonic.

use tracing::debug;

use super::NoteEvent;
use crate::music::scale::{Key, Mode};

/// Krumhansl-Kessler major key profile
const KK_MAJOR: [f64; 12] = [6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88];
/// Krumhansl-Kessler minor key profile
const KK_MINOR: [f64; 12] = [6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17];

/// Total sounding ticks per pitch class
pub fn pitch_class_histogram(notes: &[NoteEvent]) -> [f64; 12] {
    let mut histogram = [0.0; 12];
    for note in notes {
        histogram[(note.note % 12) as usize] += note.duration as f64;
    }
    histogram
}

/// Pearson correlation of the histogram, rotated so `tonic` sits at index
/// 0, with a profile
fn pearson_correlate(histogram: &[f64; 12], profile: &[f64; 12], tonic: usize) -> f64 {
    let x: [f64; 12] = std::array::from_fn(|i| histogram[(i + tonic) % 12]);
    let y = profile;

    let mean_x = x.iter().sum::<f64>() / 12.0;
    let mean_y = y.iter().sum::<f64>() / 12.0;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..12 {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom > 1e-10 {
        cov / denom
    } else {
        0.0
    }
}

/// Correlation of the histogram with one candidate key
pub fn key_correlation(histogram: &[f64; 12], key: &Key) -> f64 {
    let profile = match key.mode() {
        Mode::Major => &KK_MAJOR,
        Mode::Minor => &KK_MINOR,
    };
    pearson_correlate(histogram, profile, key.tonic().pitch_class() as usize)
}

/// Confidence from the best and runner-up correlations.
///
/// Mostly separation (a 0.15 gap is full marks), partly absolute strength.
fn confidence(best: f64, second: f64) -> f64 {
    let separation = ((best - second) / 0.15).clamp(0.0, 1.0);
    let strength = ((best + 1.0) / 2.0).clamp(0.0, 1.0);
    (separation * 0.7 + strength * 0.3).clamp(0.0, 1.0)
}

/// Most likely key for a set of notes, with a confidence in [0, 1].
///
/// Equal correlations resolve to the earlier candidate. Silence yields
/// C major with confidence 0.0.
pub fn estimate_key(notes: &[NoteEvent]) -> (Key, f64) {
    let histogram = pitch_class_histogram(notes);
    if histogram.iter().all(|&w| w == 0.0) {
        return (Key::default(), 0.0);
    }

    let mut best = (Key::CANDIDATES[0], f64::NEG_INFINITY);
    let mut second = f64::NEG_INFINITY;
    for key in Key::CANDIDATES {
        let r = key_correlation(&histogram, &key);
        if r > best.1 {
            second = best.1;
            best = (key, r);
        } else if r > second {
            second = r;
        }
    }

    let confidence = confidence(best.1, second);
    debug!(key = %best.0, correlation = best.1, runner_up = second, confidence, "profile key estimate");
    (best.0, confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::scale::Note;

    fn scale_notes(pitches: &[u8], ticks: u64) -> Vec<NoteEvent> {
        pitches
            .iter()
            .enumerate()
            .map(|(i, &p)| NoteEvent::new(i as u64 * ticks, ticks, p, 100))
            .collect()
    }

    #[test]
    fn test_histogram_weights_by_duration() {
        let notes = vec![NoteEvent::new(0, 24, 60, 100), NoteEvent::new(0, 12, 72, 90)];
        let histogram = pitch_class_histogram(&notes);
        assert_eq!(histogram[0], 36.0);
        assert_eq!(histogram[1], 0.0);
    }

    #[test]
    fn test_profile_matches_itself() {
        let r = pearson_correlate(&KK_MAJOR, &KK_MAJOR, 0);
        assert!((r - 1.0).abs() < 1e-9);
        assert_eq!(pearson_correlate(&[1.0; 12], &KK_MAJOR, 0), 0.0);
    }

    #[test]
    fn test_estimate_c_major_scale() {
        // Tonic triad weighted heavier than passing tones
        let mut notes = scale_notes(&[60, 62, 64, 65, 67, 69, 71, 72], 24);
        notes.extend(scale_notes(&[48, 52, 55], 96));
        let (key, confidence) = estimate_key(&notes);
        assert_eq!(key, Key::new(Note::C, Mode::Major));
        assert!(confidence > 0.0 && confidence <= 1.0);
    }

    #[test]
    fn test_estimate_a_minor() {
        let mut notes = scale_notes(&[57, 59, 60, 62, 64, 65, 68, 69], 24);
        notes.extend(scale_notes(&[45, 48, 52], 96));
        let (key, _) = estimate_key(&notes);
        assert_eq!(key, Key::new(Note::A, Mode::Minor));
    }

    #[test]
    fn test_estimate_silence() {
        assert_eq!(estimate_key(&[]), (Key::default(), 0.0));
    }
}
