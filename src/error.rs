// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types.

use thiserror::Error;

/// Errors from the chord-symbol interpreter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordParseError {
    #[error("empty chord symbol")]
    Empty,
    #[error("unknown chord root in {0:?}")]
    UnknownRoot(String),
    #[error("unknown suffix {suffix:?} in chord {symbol:?}")]
    UnknownSuffix { symbol: String, suffix: String },
    #[error("invalid bass note {bass:?} in chord {symbol:?}")]
    InvalidBass { symbol: String, bass: String },
}

/// Errors in command-line arguments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("no command given")]
    MissingCommand,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("{0} requires a value")]
    MissingValue(String),
    #[error("invalid value for {option}: {value}")]
    InvalidValue { option: String, value: String },
    #[error("unknown option: {0}")]
    UnknownOption(String),
    #[error("{0} requires a file path")]
    MissingPath(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = ChordParseError::UnknownSuffix {
            symbol: "Cxyz".to_string(),
            suffix: "xyz".to_string(),
        };
        assert_eq!(e.to_string(), "unknown suffix \"xyz\" in chord \"Cxyz\"");

        let e = ArgumentError::InvalidValue {
            option: "--max".to_string(),
            value: "lots".to_string(),
        };
        assert_eq!(e.to_string(), "invalid value for --max: lots");
        assert_eq!(
            ArgumentError::UnknownCommand("play".to_string()).to_string(),
            "unknown command: play"
        );
    }
}
