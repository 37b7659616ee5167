use cfgbind_error::{DomainError, FatalError};
use thiserror::Error;

/// Custom error type for the cfg_ingest crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// Represents an I/O error while reading a source file.
    #[error("I/O error reading {path}: {message}")]
    Io { path: String, message: String },

    /// Represents a parsing error from the `syn` crate.
    #[error("Syn parsing error: {0}")]
    Syn(String),

    /// A `#[cfg(..)]` attribute whose predicate could not be parsed.
    #[error("Failed to parse cfg predicate `{cfg}`: {message}")]
    CfgParse { cfg: String, message: String },

    /// A cfg predicate with no entry in the `[defines]` table.
    #[error("No define is configured for cfg predicate `{predicate}`")]
    MissingDefine { predicate: String },

    /// A field, argument or return type outside the supported subset.
    #[error("Unsupported type `{ty}` in `{item}` (line {line})")]
    UnsupportedType {
        item: String,
        ty: String,
        line: usize,
    },

    /// A `repr` enum whose variant carries data.
    #[error("Enum `{item}` has data in variant `{variant}` (line {line})")]
    UnsupportedEnum {
        item: String,
        variant: String,
        line: usize,
    },
}

impl From<syn::Error> for IngestError {
    fn from(err: syn::Error) -> Self {
        let start = err.span().start();
        IngestError::Syn(format!("{} at {}:{}", err, start.line, start.column))
    }
}

impl From<IngestError> for cfgbind_error::Error {
    fn from(value: IngestError) -> cfgbind_error::Error {
        match value {
            IngestError::Syn(message) => FatalError::SyntaxError(message).into(),
            IngestError::CfgParse { cfg, message } => {
                FatalError::SyntaxError(format!("cfg({cfg}): {message}")).into()
            }
            IngestError::MissingDefine { predicate } => {
                FatalError::MissingDefine { predicate }.into()
            }
            err @ (IngestError::Io { .. }
            | IngestError::UnsupportedType { .. }
            | IngestError::UnsupportedEnum { .. }) => {
                DomainError::Ingest {
                    message: err.to_string(),
                }
                .into()
            }
        }
    }
}
