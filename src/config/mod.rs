// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for cadenza.
//!
//! Settings are read from a TOML file. Every field has a default, so an
//! empty file (or no file at all) gives the stock behavior.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::harmony::DEFAULT_MAX_RESULTS;

/// Root settings file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    /// Next-chord suggestion settings
    pub recommend: RecommendSettings,
    /// Note-event analysis settings
    pub analysis: AnalysisSettings,
    /// Log output settings
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read settings file: {:?}", path.as_ref()))?;
        Self::from_toml(&contents)
    }

    /// Parse settings from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML settings")
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize settings to TOML")
    }
}

/// Settings for `recommend`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecommendSettings {
    /// Maximum number of suggestions returned
    pub max_results: usize,
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Settings for chord analysis of note events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Ticks per quarter note
    pub ppqn: u32,
    /// Sonorities shorter than this are dropped (a sixteenth at 24 PPQN)
    pub min_duration_ticks: u64,
    /// Sonorities with fewer distinct pitch classes are dropped
    pub min_pitch_classes: usize,
}

fn default_ppqn() -> u32 {
    24
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        let ppqn = default_ppqn();
        Self {
            ppqn,
            min_duration_ticks: ppqn as u64 / 4,
            min_pitch_classes: 2,
        }
    }
}

impl AnalysisSettings {
    /// Same settings at a different resolution.
    ///
    /// The minimum duration keeps its length in quarter notes.
    pub fn with_ppqn(&self, ppqn: u32) -> Self {
        let min_duration_ticks = if self.ppqn == 0 {
            self.min_duration_ticks
        } else {
            self.min_duration_ticks * ppqn as u64 / self.ppqn as u64
        };
        Self {
            ppqn,
            min_duration_ticks,
            min_pitch_classes: self.min_pitch_classes,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level filter: "error", "warn", "info", "debug" or "trace"
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
