//! Command line argument parsing for the crowd lemmatizer CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Crowd Lemmatizer - lemmatize tagged message streams
#[derive(Parser, Debug, Clone)]
#[command(name = "crowd-lemmatizer")]
#[command(about = "Annotate POS-tagged message tokens with their lemmas")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LemmatizerArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON summaries (message streams stay one JSON object per line)
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LemmatizerArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Lemmatize a stream of JSON-lines messages
    Lemmatize(LemmatizeArgs),

    /// Print the lemma of a single word
    Lemma(LemmaArgs),
}

/// Arguments for lemmatizing messages
#[derive(Parser, Debug, Clone)]
pub struct LemmatizeArgs {
    /// Input file with one JSON message per line (default: stdin)
    #[arg(short, long, value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output file for the lemmatized messages (default: stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Plugin configuration as inline JSON, e.g. '{"calculate":"new"}'
    #[arg(short, long, value_name = "JSON", conflicts_with = "config_file")]
    pub config: Option<String>,

    /// Plugin configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Tab-separated lemma dictionary consulted before the English rules
    #[arg(short, long, value_name = "DICTIONARY", env = "CROWD_LEMMATIZER_DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Lemmatize messages in parallel
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for lemmatizing a single word
#[derive(Parser, Debug, Clone)]
pub struct LemmaArgs {
    /// Word to lemmatize
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Penn Treebank part-of-speech tag
    #[arg(short, long, value_name = "TAG")]
    pub pos: Option<String>,

    /// Tab-separated lemma dictionary consulted before the English rules
    #[arg(short, long, value_name = "DICTIONARY", env = "CROWD_LEMMATIZER_DICTIONARY")]
    pub dictionary: Option<PathBuf>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lemmatize() {
        let args = LemmatizerArgs::try_parse_from([
            "crowd-lemmatizer",
            "-vv",
            "lemmatize",
            "--config",
            r#"{"calculate":"new"}"#,
            "--parallel",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 2);
        match args.command {
            Command::Lemmatize(lemmatize) => {
                assert_eq!(lemmatize.config.as_deref(), Some(r#"{"calculate":"new"}"#));
                assert!(lemmatize.parallel);
                assert!(lemmatize.input.is_none());
            }
            _ => panic!("Expected lemmatize command"),
        }
    }

    #[test]
    fn test_parse_lemma() {
        let args = LemmatizerArgs::try_parse_from([
            "crowd-lemmatizer",
            "-q",
            "--format",
            "json",
            "lemma",
            "running",
            "--pos",
            "VBG",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 0);
        assert_eq!(args.output_format, OutputFormat::Json);
        match args.command {
            Command::Lemma(lemma) => {
                assert_eq!(lemma.word, "running");
                assert_eq!(lemma.pos.as_deref(), Some("VBG"));
            }
            _ => panic!("Expected lemma command"),
        }
    }

    #[test]
    fn test_config_conflicts_with_config_file() {
        let result = LemmatizerArgs::try_parse_from([
            "crowd-lemmatizer",
            "lemmatize",
            "--config",
            "{}",
            "--config-file",
            "config.json",
        ]);
        assert!(result.is_err());
    }
}
