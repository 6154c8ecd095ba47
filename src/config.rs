//! Configuration for the `gcode-cmd` line tool.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML config file with default metadata and output format

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::parser::LineParser;

/// How each parsed line is written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Original text for parsed lines
    #[default]
    Text,
    /// Text re-derived from the parsed fields
    Canonical,
    /// Full field dump
    Debug,
    /// One JSON object per line
    Json,
}

/// Command-line arguments for the G-code line tool
#[derive(Debug, Parser)]
#[command(name = "gcode-cmd")]
#[command(about = "Parse G-code lines into structured commands")]
#[command(version)]
pub struct Args {
    /// Files to read, one command per line. Reads stdin when empty or "-".
    pub inputs: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Classification attached to every command
    #[arg(long)]
    pub classification: Option<String>,

    /// Provenance tag attached to every command (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Config file to load instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip the default config file
    #[arg(long)]
    pub no_config: bool,

    /// Stop at the first line that is not a command
    #[arg(long)]
    pub strict: bool,

    /// Log level for the tool
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Settings read from a TOML config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub classification: Option<String>,
    pub tags: Vec<String>,
    pub format: Option<OutputFormat>,
    pub strict: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub inputs: Vec<PathBuf>,
    pub format: OutputFormat,
    pub classification: Option<String>,
    pub provenance: BTreeSet<String>,
    pub strict: bool,
    pub log_level: String,
    /// Config file that was actually loaded
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    ///
    /// Flags override the file. Tags from both sources are merged.
    pub fn from_args(args: Args) -> Result<Self> {
        let config_file = match args.config {
            Some(path) => Some(path),
            None if args.no_config => None,
            None => default_config_path().filter(|path| path.is_file()),
        };

        let file = match &config_file {
            Some(path) => {
                log::debug!("loading config from {}", path.display());
                FileConfig::load(path)?
            }
            None => FileConfig::default(),
        };

        let mut provenance: BTreeSet<String> = file.tags.into_iter().collect();
        provenance.extend(args.tags);

        Ok(Config {
            inputs: args.inputs,
            format: args.format.or(file.format).unwrap_or_default(),
            classification: args.classification.or(file.classification),
            provenance,
            strict: args.strict || file.strict.unwrap_or(false),
            log_level: args.log_level,
            config_file,
        })
    }

    /// A parser stamping this configuration's metadata on every command
    pub fn line_parser(&self) -> LineParser {
        let parser = LineParser::new().with_provenance(self.provenance.clone());
        match &self.classification {
            Some(classification) => parser.with_classification(classification.clone()),
            None => parser,
        }
    }
}

/// `<config dir>/gcode-command/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gcode-command").join("config.toml"))
}
