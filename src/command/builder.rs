//! Programmatic construction of commands.

use std::collections::BTreeSet;

use super::{Command, Fields, Metadata, Value};
use crate::error::{CommandError, Result};
use crate::parser::lexer::find_parameter;

/// Builds a [`Command`] that has no source text.
///
/// Errors are deferred to [`CommandBuilder::build`] so calls can be chained:
///
/// ```
/// use gcode_command::Command;
///
/// let cmd = Command::builder("G1").param('x', 10).param('y', -5.5).feedrate(1500).build()?;
/// assert_eq!(cmd.line(), "G1 F1500 X10 Y-5.5");
/// # Ok::<(), gcode_command::CommandError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    code: String,
    fields: Fields,
    trailing_text: Option<String>,
    metadata: Metadata,
    error: Option<CommandError>,
}

impl CommandBuilder {
    pub fn new(code: impl Into<String>) -> Self {
        let code: String = code.into();
        Self {
            code: code.trim().to_ascii_uppercase(),
            fields: Fields::default(),
            trailing_text: None,
            metadata: Metadata::default(),
            error: None,
        }
    }

    pub fn subcode(mut self, subcode: u32) -> Self {
        self.fields.subcode = Some(subcode);
        self
    }

    pub fn tool(mut self, tool: i64) -> Self {
        self.fields.insert('t', Value::Int(tool));
        self
    }

    pub fn feedrate(mut self, feedrate: i64) -> Self {
        self.fields.insert('f', Value::Int(feedrate));
        self
    }

    /// Add a parameter. The key is case-insensitive; integer `T`/`F`
    /// values land in [`Command::tool`] and [`Command::feedrate`].
    pub fn param(mut self, key: char, value: impl Into<Value>) -> Self {
        let key = key.to_ascii_lowercase();
        let value: Value = value.into();
        if !key.is_ascii_lowercase() {
            self.fail(CommandError::InvalidParameter(key));
        } else if matches!(value, Value::Float(x) if !x.is_finite()) {
            self.fail(CommandError::NonFiniteValue(key));
        } else {
            self.fields.insert(key, value);
        }
        self
    }

    /// Add a value-less parameter, written as the bare letter.
    pub fn flag(self, key: char) -> Self {
        self.param(key, Value::Flag)
    }

    /// Free text appended after the parameters. Blank text is dropped.
    pub fn trailing_text(mut self, text: impl Into<String>) -> Self {
        let text: String = text.into();
        let text = text.trim();
        self.trailing_text = (!text.is_empty()).then(|| text.to_string());
        self
    }

    pub fn classification(mut self, classification: impl Into<String>) -> Self {
        self.metadata.classification = Some(classification.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.metadata.provenance.insert(tag.into());
        self
    }

    pub fn provenance(mut self, tags: BTreeSet<String>) -> Self {
        self.metadata.provenance.extend(tags);
        self
    }

    pub fn build(self) -> Result<Command> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let letter_class = is_letter_class(&self.code);
        match self.code.as_str() {
            _ if letter_class => {}
            "T" if self.fields.tool.is_some() => {}
            "F" if self.fields.feedrate.is_some() => {}
            _ => return Err(CommandError::InvalidCode(self.code)),
        }

        if !letter_class {
            if self.fields.subcode.is_some() {
                return Err(CommandError::UnexpectedSubcode(self.code));
            }
            let stray = !self.fields.parameters.is_empty()
                || self.trailing_text.is_some()
                || (self.code == "T" && self.fields.feedrate.is_some())
                || (self.code == "F" && self.fields.tool.is_some());
            if stray {
                return Err(CommandError::UnexpectedParameters(self.code));
            }
        }

        let trailing_text = match self.trailing_text {
            Some(text) if find_parameter(&text).is_some() => {
                return Err(CommandError::ParameterInTrailingText(text));
            }
            other => other,
        };

        Ok(Command::from_parts(
            self.code,
            self.fields,
            trailing_text,
            None,
            self.metadata,
        ))
    }

    fn fail(&mut self, err: CommandError) {
        self.error.get_or_insert(err);
    }
}

/// `G` or `M` followed by at least one ASCII digit.
fn is_letter_class(code: &str) -> bool {
    match code.as_bytes() {
        [b'G' | b'M', digits @ ..] => !digits.is_empty() && digits.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}
