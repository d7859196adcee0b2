// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory layer for cadenza.
//!
//! Notes and keys, chord-symbol interpretation, and roman-numeral
//! scale-degree labels.

pub mod chord;
pub mod roman;
pub mod scale;

pub use chord::{identify, normalize, symbolize, ChordSymbol, IdentifiedChord, Quality};
pub use roman::{realize, reinterpret, ScaleDegree};
pub use scale::{Key, Mode, Note, Scale, ScaleType, Spelling};
