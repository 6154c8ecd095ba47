//! G-code Command Parsing
//!
//! Parses a single line of G-code into an immutable, typed [`Command`] and
//! writes it back out as canonical text.
//!
//! This library provides:
//! - Line parsing with typed parameters
//! - Canonical serialization and a debug dump
//! - A programmatic command builder
//! - Configuration and driver for the `gcode-cmd` line tool

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod parser;
pub mod serializer;

// Re-exports for clean public API
pub use command::{Command, CommandBuilder, Metadata, Value};
pub use config::Config;
pub use error::CommandError;
pub use parser::{CommandSource, LineParser, is_command_line, parse_line, parse_line_with};
