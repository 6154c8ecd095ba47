//! Text output for commands.
//!
//! `Display` gives the line as it should be sent to a device: the original
//! text when there is one, otherwise the canonical form. `Debug` is a full
//! dump of every populated field for logs.

use std::fmt;

use crate::command::{Command, Value};

/// Canonical text of a command, ignoring any original text.
///
/// Layout: code (with `.N` sub-code), then parameters in alphabetical order
/// with tool and feedrate merged in as `T`/`F`, then the trailing text.
/// `T` and `F` commands are written as `T<tool>` / `F<feedrate>`.
pub struct Canonical<'a>(pub &'a Command);

impl fmt::Display for Canonical<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cmd = self.0;
        f.write_str(cmd.code())?;

        match cmd.code() {
            "T" => {
                if let Some(tool) = cmd.tool() {
                    write!(f, "{}", tool)?;
                }
            }
            "F" => {
                if let Some(feedrate) = cmd.feedrate() {
                    write!(f, "{}", feedrate)?;
                }
            }
            _ => {
                if let Some(subcode) = cmd.subcode() {
                    write!(f, ".{}", subcode)?;
                }

                let mut words = cmd.parameters().clone();
                if let Some(feedrate) = cmd.feedrate() {
                    words.insert('f', Value::Int(feedrate));
                }
                if let Some(tool) = cmd.tool() {
                    words.insert('t', Value::Int(tool));
                }
                for (key, value) in &words {
                    f.write_str(" ")?;
                    write_word(f, *key, value)?;
                }
            }
        }

        if let Some(text) = cmd.trailing_text() {
            write!(f, " {}", text)?;
        }
        Ok(())
    }
}

fn write_word(f: &mut fmt::Formatter<'_>, key: char, value: &Value) -> fmt::Result {
    let letter = key.to_ascii_uppercase();
    match value {
        Value::Flag => write!(f, "{}", letter),
        other => write!(f, "{}{}", letter, other),
    }
}

impl Command {
    /// The line re-derived from the fields, even if original text exists.
    pub fn canonical_line(&self) -> String {
        Canonical(self).to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.original_text() {
            Some(text) => f.write_str(text),
            None => fmt::Display::fmt(&Canonical(self), f),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command({:?}", self.code())?;
        if let Some(subcode) = self.subcode() {
            write!(f, ", subcode={}", subcode)?;
        }
        if let Some(tool) = self.tool() {
            write!(f, ", tool={}", tool)?;
        }
        if let Some(feedrate) = self.feedrate() {
            write!(f, ", feedrate={}", feedrate)?;
        }
        for (key, value) in self.parameters() {
            write!(f, ", {}={}", key, value)?;
        }
        if let Some(text) = self.trailing_text() {
            write!(f, ", trailing_text={:?}", text)?;
        }
        if let Some(text) = self.original_text() {
            write!(f, ", original_text={:?}", text)?;
        }
        write!(
            f,
            ", classification={:?}, provenance={:?})",
            self.classification(),
            self.provenance()
        )
    }
}
