//! The structured form of a single G-code line.
//!
//! A [`Command`] is immutable. It is produced either by the parser
//! ([`crate::parser::parse_line`]) or by a [`CommandBuilder`].

mod builder;
mod value;

pub use builder::CommandBuilder;
pub use value::Value;

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// A parsed or programmatically built G-code command.
#[derive(Clone, PartialEq, Serialize)]
pub struct Command {
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    subcode: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    feedrate: Option<i64>,
    parameters: BTreeMap<char, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trailing_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_text: Option<String>,
    classification: Option<String>,
    provenance: BTreeSet<String>,
}

/// Named fields and parameters collected while parsing or building.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Fields {
    pub subcode: Option<u32>,
    pub tool: Option<i64>,
    pub feedrate: Option<i64>,
    pub parameters: BTreeMap<char, Value>,
}

impl Fields {
    /// Store a lowercase parameter, routing integer `t`/`f` into the named
    /// tool and feedrate fields. A later value for the same letter wins.
    pub fn insert(&mut self, key: char, value: Value) {
        match (key, value) {
            ('t', Value::Int(n)) => {
                self.parameters.remove(&key);
                self.tool = Some(n);
            }
            ('f', Value::Int(n)) => {
                self.parameters.remove(&key);
                self.feedrate = Some(n);
            }
            _ => {
                match key {
                    't' => self.tool = None,
                    'f' => self.feedrate = None,
                    _ => {}
                }
                self.parameters.insert(key, value);
            }
        }
    }
}

/// Caller supplied metadata carried through parsing untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub classification: Option<String>,
    pub provenance: BTreeSet<String>,
}

impl Metadata {
    pub fn new(classification: Option<String>, provenance: BTreeSet<String>) -> Self {
        Self {
            classification,
            provenance,
        }
    }
}

impl Command {
    pub(crate) fn from_parts(
        code: String,
        fields: Fields,
        trailing_text: Option<String>,
        original_text: Option<String>,
        metadata: Metadata,
    ) -> Self {
        Self {
            code,
            subcode: fields.subcode,
            tool: fields.tool,
            feedrate: fields.feedrate,
            parameters: fields.parameters,
            trailing_text,
            original_text,
            classification: metadata.classification,
            provenance: metadata.provenance,
        }
    }

    /// Start building a command without source text, e.g. `Command::builder("G1")`.
    pub fn builder(code: impl Into<String>) -> CommandBuilder {
        CommandBuilder::new(code)
    }

    /// Primary code, always uppercase: `"G1"`, `"M117"`, `"T"` or `"F"`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Command letter (`G`, `M`, `T` or `F`).
    pub fn letter(&self) -> char {
        self.code.chars().next().unwrap_or_default()
    }

    /// Numeric body of a `G`/`M` code. `None` for `T` and `F`.
    pub fn number(&self) -> Option<u32> {
        self.code.get(1..).and_then(|digits| digits.parse().ok())
    }

    pub fn subcode(&self) -> Option<u32> {
        self.subcode
    }

    pub fn tool(&self) -> Option<i64> {
        self.tool
    }

    pub fn feedrate(&self) -> Option<i64> {
        self.feedrate
    }

    /// Generic parameters keyed by lowercase letter, in alphabetical order.
    pub fn parameters(&self) -> &BTreeMap<char, Value> {
        &self.parameters
    }

    /// Look up a generic parameter. The letter is case-insensitive.
    pub fn get(&self, letter: char) -> Option<&Value> {
        self.parameters.get(&letter.to_ascii_lowercase())
    }

    pub fn has(&self, letter: char) -> bool {
        self.get(letter).is_some()
    }

    pub fn trailing_text(&self) -> Option<&str> {
        self.trailing_text.as_deref()
    }

    /// The trimmed source line, if this command was parsed from text.
    pub fn original_text(&self) -> Option<&str> {
        self.original_text.as_deref()
    }

    pub fn classification(&self) -> Option<&str> {
        self.classification.as_deref()
    }

    pub fn provenance(&self) -> &BTreeSet<String> {
        &self.provenance
    }

    /// Textual form: the original text when parsed, otherwise the canonical line.
    pub fn line(&self) -> Cow<'_, str> {
        match &self.original_text {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(self.canonical_line()),
        }
    }
}
