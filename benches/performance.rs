// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for cadenza
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Chord symbol parsing
//! - Key scoring over all 24 candidates
//! - Recommendation generation
//! - Chordify and full analysis of note events

use cadenza::analysis::{analyze, chordify, NoteEvent};
use cadenza::config::AnalysisSettings;
use cadenza::harmony::rank_keys;
use cadenza::{infer_key, normalize, recommend, ChordSymbol};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const PROGRESSION: [&str; 8] = ["C", "Am", "F", "G7", "Em", "Dm7", "G", "C"];

/// Benchmark chord symbol normalization, including the fallback path
fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    group.bench_function("direct", |b| b.iter(|| normalize(black_box("F#m7"))));
    group.bench_function("fallback", |b| b.iter(|| normalize(black_box("Bb minor"))));
    group.bench_function("rejected", |b| b.iter(|| normalize(black_box("Xyz123"))));

    group.finish();
}

/// Benchmark key scoring for growing progressions
fn bench_key_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_scoring");

    for len in [4usize, 16, 64].iter() {
        let symbols: Vec<&str> = PROGRESSION.iter().cycle().take(*len).copied().collect();
        let chords: Vec<ChordSymbol> = symbols.iter().filter_map(|s| normalize(s)).collect();

        group.bench_with_input(BenchmarkId::new("rank_keys", len), &chords, |b, chords| {
            b.iter(|| black_box(rank_keys(chords)))
        });
        group.bench_with_input(BenchmarkId::new("infer_key", len), &symbols, |b, symbols| {
            b.iter(|| black_box(infer_key(symbols.as_slice())))
        });
    }

    group.finish();
}

/// Benchmark recommendation generation
fn bench_recommend(c: &mut Criterion) {
    c.bench_function("recommend", |b| {
        b.iter(|| recommend(black_box(&PROGRESSION[..6]), Some("G"), 6))
    });
}

/// Block chords, one per beat, with a melody note on every eighth
fn note_events(beats: u64) -> Vec<NoteEvent> {
    const CHORDS: [[u8; 3]; 4] = [[48, 64, 67], [45, 60, 64], [41, 60, 65], [43, 59, 62]];
    let mut notes = Vec::new();
    for beat in 0..beats {
        for &pitch in &CHORDS[(beat % 4) as usize] {
            notes.push(NoteEvent::new(beat * 24, 24, pitch, 90));
        }
        notes.push(NoteEvent::new(beat * 24, 12, 72, 100));
        notes.push(NoteEvent::new(beat * 24 + 12, 12, 74, 100));
    }
    notes
}

/// Benchmark chordify and full analysis
fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");
    let settings = AnalysisSettings::default();

    for beats in [16u64, 128].iter() {
        let notes = note_events(*beats);
        group.bench_with_input(BenchmarkId::new("chordify", beats), &notes, |b, notes| {
            b.iter(|| black_box(chordify(notes)))
        });
        group.bench_with_input(BenchmarkId::new("analyze", beats), &notes, |b, notes| {
            b.iter(|| black_box(analyze(notes, &settings)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize,
    bench_key_scoring,
    bench_recommend,
    bench_analysis,
);

criterion_main!(benches);
