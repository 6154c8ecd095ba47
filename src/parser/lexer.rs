//! G-code line grammar
//!
//! Two patterns drive parsing: the command prefix at the start of a line and
//! a parameter word (`X10`, `Y-5.5`, a bare `Z`). Parameters are pulled out
//! of the remainder one at a time; each match is spliced out of the working
//! text before the next search, so words glued together (`X10Y20`) separate
//! cleanly and whatever is left over is the trailing text.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::command::Value;

/// `G`/`M` code with optional `.N` sub-code, then `T<n>`, then `F<n>`.
static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?P<letter>[GM])(?P<number>[0-9]+)(?:\.(?P<subcode>[0-9]+))?|T(?P<tool>[0-9]+)|F(?P<feedrate>[0-9]+))",
    )
    .expect("command grammar is a valid regex")
});

/// A letter followed by a number, or a bare letter before whitespace or end
/// of text. Quantifiers are greedy, so a digit run is never cut short.
static PARAMETER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<key>[A-Za-z])(?:(?P<value>[-+]?[0-9]*\.?[0-9]+)|\s|$)")
        .expect("parameter grammar is a valid regex")
});

/// The recognised command prefix of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CodeToken<'a> {
    /// `G`/`M` code: uppercase letter, digit body and optional sub-code digits
    Letter {
        letter: char,
        number: &'a str,
        subcode: Option<&'a str>,
    },
    /// `T<digits>`
    Tool(&'a str),
    /// `F<digits>`
    Feedrate(&'a str),
}

/// A command prefix together with the byte offset where it ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodeMatch<'a> {
    pub token: CodeToken<'a>,
    pub end: usize,
}

/// A single parameter word with its key already lowercased.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterToken {
    pub key: char,
    pub value: Value,
}

/// Match the command prefix at the very start of `line`.
pub fn match_code(line: &str) -> Option<CodeMatch<'_>> {
    let caps = CODE_PATTERN.captures(line)?;
    let end = caps.get(0)?.end();

    let token = if let (Some(letter), Some(number)) = (caps.name("letter"), caps.name("number")) {
        CodeToken::Letter {
            letter: letter.as_str().chars().next()?.to_ascii_uppercase(),
            number: number.as_str(),
            subcode: caps.name("subcode").map(|m| m.as_str()),
        }
    } else if let Some(tool) = caps.name("tool") {
        CodeToken::Tool(tool.as_str())
    } else {
        CodeToken::Feedrate(caps.name("feedrate")?.as_str())
    };

    Some(CodeMatch { token, end })
}

/// Find the leftmost parameter word in `text` and the byte span it occupies.
///
/// Uppercase letters are always keys. A lowercase letter is a key only when
/// it starts a word, which keeps ordinary words and filenames in trailing
/// text (`Print complete`, `part2.gco`) intact. Numbers too large for a
/// finite float are not parameters and stay in the text.
pub fn find_parameter(text: &str) -> Option<(Range<usize>, ParameterToken)> {
    PARAMETER_PATTERN.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        let key = caps.name("key")?.as_str().chars().next()?;
        let value = caps.name("value");

        if key.is_ascii_lowercase() && !starts_word(text, whole.start()) {
            return None;
        }

        let value = match value {
            Some(literal) => Value::from_literal(literal.as_str())?,
            None => Value::Flag,
        };

        Some((
            whole.range(),
            ParameterToken {
                key: key.to_ascii_lowercase(),
                value,
            },
        ))
    })
}

fn starts_word(text: &str, index: usize) -> bool {
    text[..index]
        .chars()
        .next_back()
        .is_none_or(char::is_whitespace)
}

/// Iterator that strips parameter words out of a working copy of the text.
///
/// Every step searches from the start of what is left, so earlier removals
/// are reflected in later matches.
#[derive(Debug, Clone)]
pub struct ParameterScanner {
    rest: String,
}

impl ParameterScanner {
    pub fn new(text: &str) -> Self {
        Self {
            rest: text.to_string(),
        }
    }

    /// Text not consumed by any parameter, untrimmed.
    pub fn remainder(&self) -> &str {
        &self.rest
    }

    pub fn into_remainder(self) -> String {
        self.rest
    }
}

impl Iterator for ParameterScanner {
    type Item = ParameterToken;

    fn next(&mut self) -> Option<Self::Item> {
        let (span, token) = find_parameter(&self.rest)?;
        self.rest.replace_range(span, "");
        Some(token)
    }
}
