//! Error taxonomy for the trimming pipeline.
//!
//! Every variant is fatal to the run. Schema drift and blank lines are not
//! errors and never surface here.

use thiserror::Error;

use crate::{MAX_FIELDS, MAX_LINE_LEN};

/// Exit status for a missing required argument.
pub const EXIT_USAGE: i32 = 2;
/// Exit status for syntax, configuration, overflow and missing-field errors.
pub const EXIT_SYNTAX: i32 = 3;
/// Exit status for anything else (I/O failures).
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Error)]
pub enum TrimError {
    /// The positional name-column selector was not supplied.
    #[error("missing required name column selector")]
    MissingNameColumn,

    /// Command-line parsing failed; clap has already printed the details.
    #[error("invalid command line arguments")]
    InvalidArguments,

    #[error("input has no header line")]
    MissingHeader,

    #[error("Too many data fields (>{max})", max = MAX_FIELDS)]
    TooManyHeaderFields,

    #[error("Too many output fields (>{max})", max = MAX_FIELDS)]
    TooManyOutputFields,

    #[error("empty field selector")]
    EmptySelector,

    #[error("Field number ({index}) out of range (0..{last})")]
    FieldOutOfRange { index: String, last: usize },

    #[error("There is no field whose name ends with `{selector}'")]
    NoSuchField { selector: String },

    #[error("Line #{line} longer than {max} bytes", max = MAX_LINE_LEN)]
    InputLineTooLong { line: usize },

    #[error("Output line #{line} too long")]
    OutputLineTooLong { line: usize },

    #[error("Line #{line} missing required field")]
    MissingField { line: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TrimError {
    pub fn exit_status(&self) -> i32 {
        match self {
            TrimError::MissingNameColumn => EXIT_USAGE,
            TrimError::Io(_) => EXIT_FAILURE,
            _ => EXIT_SYNTAX,
        }
    }
}

/// Picks the process exit status for an error bubbled up through `run()`.
pub fn exit_status(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<TrimError>())
        .map(TrimError::exit_status)
        .unwrap_or(EXIT_FAILURE)
}
