// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, Level};

use cadenza::analysis::{analyze, NoteDocument};
use cadenza::{infer_key, recommend, ArgumentError, Settings};

fn print_usage() {
    println!("cadenza - Key inference and chord suggestions");
    println!();
    println!("Usage: cadenza [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  key <CHORD>...                 Infer the key of a chord progression");
    println!("  recommend [--current <CHORD>] [--max <N>] <CHORD>...");
    println!("                                 Suggest chords to follow a progression");
    println!("  analyze <NOTES.yaml>           Chord analysis of a note-event file");
    println!();
    println!("Options:");
    println!("  --config <PATH>                Read settings from a TOML file");
    println!("  --verbose                      Log debug output to stderr");
    println!("  --help                         Show this help message");
}

/// A parsed command line
#[derive(Debug, PartialEq)]
struct Invocation {
    config: Option<PathBuf>,
    verbose: bool,
    command: Command,
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Key {
        chords: Vec<String>,
    },
    Recommend {
        chords: Vec<String>,
        current: Option<String>,
        max_results: Option<usize>,
    },
    Analyze {
        path: PathBuf,
    },
}

fn take_value(args: &mut impl Iterator<Item = String>, option: &str) -> Result<String, ArgumentError> {
    args.next()
        .ok_or_else(|| ArgumentError::MissingValue(option.to_string()))
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Invocation, ArgumentError> {
    let mut args = args.into_iter();
    let mut config = None;
    let mut verbose = false;
    let mut command_name = None;
    let mut positional = Vec::new();
    let mut current = None;
    let mut max_results = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(take_value(&mut args, "--config")?)),
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => command_name = Some("help".to_string()),
            "--current" => current = Some(take_value(&mut args, "--current")?),
            "--max" => {
                let value = take_value(&mut args, "--max")?;
                let n = value.parse().map_err(|_| ArgumentError::InvalidValue {
                    option: "--max".to_string(),
                    value: value.clone(),
                })?;
                max_results = Some(n);
            }
            other if other.starts_with("--") => {
                return Err(ArgumentError::UnknownOption(other.to_string()));
            }
            _ if command_name.is_none() => command_name = Some(arg),
            _ => positional.push(arg),
        }
    }

    let command = match command_name.as_deref() {
        None => return Err(ArgumentError::MissingCommand),
        Some("help") => Command::Help,
        Some("key") => Command::Key { chords: positional },
        Some("recommend") => Command::Recommend {
            chords: positional,
            current,
            max_results,
        },
        Some("analyze") => {
            let path = positional
                .into_iter()
                .next()
                .ok_or_else(|| ArgumentError::MissingPath("analyze".to_string()))?;
            Command::Analyze {
                path: PathBuf::from(path),
            }
        }
        Some(other) => return Err(ArgumentError::UnknownCommand(other.to_string())),
    };

    Ok(Invocation {
        config,
        verbose,
        command,
    })
}

fn init_logging(settings: &Settings, verbose: bool) {
    let level = if verbose {
        Level::DEBUG
    } else {
        settings.logging.level.parse().unwrap_or_else(|_| {
            eprintln!("Unknown log level {:?}, using warn", settings.logging.level);
            Level::WARN
        })
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}

fn run(invocation: Invocation) -> Result<()> {
    let settings = match &invocation.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    init_logging(&settings, invocation.verbose);

    match invocation.command {
        Command::Help => print_usage(),
        Command::Key { chords } => {
            info!(chords = chords.len(), "inferring key");
            print_json(&infer_key(chords.as_slice()))?;
        }
        Command::Recommend {
            chords,
            current,
            max_results,
        } => {
            let max_results = max_results.unwrap_or(settings.recommend.max_results);
            info!(chords = chords.len(), current = ?current, max_results, "recommending");
            print_json(&recommend(chords.as_slice(), current.as_deref(), max_results))?;
        }
        Command::Analyze { path } => {
            let document = NoteDocument::load(&path)?;
            let analysis_settings = match document.ppqn {
                Some(ppqn) => settings.analysis.with_ppqn(ppqn),
                None => settings.analysis.clone(),
            };
            info!(path = ?path, notes = document.notes.len(), "analyzing");
            print_json(&analyze(&document.notes, &analysis_settings))?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        println!("cadenza - Key inference and chord suggestions");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let invocation = match parse_args(args) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    run(invocation)
}
