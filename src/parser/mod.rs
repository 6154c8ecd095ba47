//! G-code line parser
//!
//! Turns one line of text into a [`Command`]. Each call is independent: the
//! compiled grammar is shared read-only and nothing else is cached.

pub mod lexer;

pub use lexer::{CodeMatch, CodeToken, ParameterScanner, ParameterToken, match_code};

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::command::{Command, Fields, Metadata};
use crate::error::{CommandError, Result};

/// Parse a single line of G-code with no classification or provenance.
///
/// This is the main entry point for parsing. Leading and trailing whitespace
/// is ignored.
pub fn parse_line(line: &str) -> Result<Command> {
    parse_line_with(line, Metadata::default())
}

/// Parse a single line and attach caller metadata to the result.
pub fn parse_line_with(line: &str, metadata: Metadata) -> Result<Command> {
    let line = line.trim();
    let Some(CodeMatch { token, end }) = lexer::match_code(line) else {
        log::debug!("rejected {:?}: no command prefix", line);
        return Err(CommandError::not_a_command(line));
    };

    let mut fields = Fields::default();
    let mut trailing_text = None;

    let code = match token {
        CodeToken::Letter {
            letter,
            number,
            subcode,
        } => {
            if let Some(digits) = subcode {
                fields.subcode = Some(parse_digits(digits, line)?);
            }

            let rest = &line[end..];
            if !rest.is_empty() {
                let mut scanner = ParameterScanner::new(rest);
                for ParameterToken { key, value } in scanner.by_ref() {
                    log::trace!("{:?}: parameter {}={}", line, key, value);
                    fields.insert(key, value);
                }
                let remainder = scanner.into_remainder();
                let remainder = remainder.trim();
                if !remainder.is_empty() {
                    trailing_text = Some(remainder.to_string());
                }
            }

            format!("{}{}", letter, number)
        }
        CodeToken::Tool(digits) => {
            fields.tool = Some(parse_digits(digits, line)?);
            "T".to_string()
        }
        CodeToken::Feedrate(digits) => {
            fields.feedrate = Some(parse_digits(digits, line)?);
            "F".to_string()
        }
    };

    log::trace!("{:?}: code {}", line, code);

    Ok(Command::from_parts(
        code,
        fields,
        trailing_text,
        Some(line.to_string()),
        metadata,
    ))
}

/// Whether `line` starts with a recognised command.
pub fn is_command_line(line: &str) -> bool {
    lexer::match_code(line.trim()).is_some()
}

/// Digit runs come from the grammar, so the only failure is overflow.
fn parse_digits<N: FromStr>(digits: &str, line: &str) -> Result<N> {
    digits
        .parse()
        .map_err(|_| CommandError::not_a_command(line))
}

/// Anything that can become a [`Command`].
///
/// Text is parsed; an existing command passes through unchanged and keeps
/// its own metadata.
pub trait CommandSource {
    fn into_command(self, metadata: Metadata) -> Result<Command>;
}

impl CommandSource for &str {
    fn into_command(self, metadata: Metadata) -> Result<Command> {
        parse_line_with(self, metadata)
    }
}

impl CommandSource for &String {
    fn into_command(self, metadata: Metadata) -> Result<Command> {
        parse_line_with(self, metadata)
    }
}

impl CommandSource for String {
    fn into_command(self, metadata: Metadata) -> Result<Command> {
        parse_line_with(&self, metadata)
    }
}

impl CommandSource for Command {
    fn into_command(self, _metadata: Metadata) -> Result<Command> {
        Ok(self)
    }
}

/// Parser preloaded with the metadata to stamp on every command.
#[derive(Debug, Clone, Default)]
pub struct LineParser {
    metadata: Metadata,
}

impl LineParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.metadata.classification = Some(classification.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.metadata.provenance.insert(tag.into());
        self
    }

    pub fn with_provenance(mut self, tags: BTreeSet<String>) -> Self {
        self.metadata.provenance.extend(tags);
        self
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn parse<S: CommandSource>(&self, source: S) -> Result<Command> {
        source.into_command(self.metadata.clone())
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self> {
        parse_line(line)
    }
}

impl TryFrom<&str> for Command {
    type Error = CommandError;

    fn try_from(line: &str) -> Result<Self> {
        parse_line(line)
    }
}
