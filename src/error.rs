//! Error types for parsing and building commands.

/// Errors produced by the parser and the command builder.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    /// The line does not start with a `G`/`M`, `T` or `F` command.
    #[error("{line:?} is not a G-code line")]
    NotACommand { line: String },

    /// A programmatically supplied code is empty or not a recognised form.
    #[error("invalid command code {0:?}")]
    InvalidCode(String),

    /// A parameter key outside `a..=z`.
    #[error("invalid parameter key {0:?}")]
    InvalidParameter(char),

    /// A float parameter that cannot be written back as a numeric literal.
    #[error("parameter {0:?} has a non-finite value")]
    NonFiniteValue(char),

    /// Sub-codes only exist on `G` and `M` commands.
    #[error("command {0:?} cannot carry a sub-code")]
    UnexpectedSubcode(String),

    /// `T` and `F` lines carry only their number.
    #[error("command {0:?} cannot carry parameters or trailing text")]
    UnexpectedParameters(String),

    /// Trailing text that would read back as parameters.
    #[error("trailing text {0:?} contains a parameter word")]
    ParameterInTrailingText(String),
}

impl CommandError {
    pub(crate) fn not_a_command(line: &str) -> Self {
        Self::NotACommand {
            line: line.to_string(),
        }
    }
}

pub type Result<T, E = CommandError> = std::result::Result<T, E>;
