use miette::Diagnostic;
use thiserror::Error;

/// Result type for constant tracking operations
pub type Result<T> = std::result::Result<T, Error>;

/// Custom error types for the constant tracker
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum Error {
    #[error("I/O error: {0}")]
    #[diagnostic(code(otbn_consts::io_error))]
    Io(String),

    #[error("Constant context invariant violated: {message}")]
    #[diagnostic(
        code(otbn_consts::invariant_violation),
        help("x0 must always be present and map to 0")
    )]
    InvariantViolation { message: String },

    #[error("Trace parse error at line {line}, column {column}: {message}")]
    #[diagnostic(code(otbn_consts::parse_error))]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Unknown mnemonic `{mnemonic}` at program index {index}")]
    #[diagnostic(code(otbn_consts::unknown_mnemonic))]
    UnknownMnemonic { mnemonic: String, index: usize },

    #[error("Program index {index} is out of range (program has {len} points)")]
    #[diagnostic(code(otbn_consts::out_of_range))]
    OutOfRange { index: usize, len: usize },
}

impl Error {
    /// Create an invariant violation error
    pub fn invariant(message: impl Into<String>) -> Self {
        Error::InvariantViolation {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}
