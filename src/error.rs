//! Error types surfaced by the public API.
//!
//! The schema minimiser never fails -- every rule is total over `serde_json::Value` --
//! so the only fallible subsystem is the validator compiler, which can be asked to lower
//! a construct it does not support (eg. an unrecognised `dependencies` shape).

use thiserror::Error;

/// Failure while compiling a schema into a [`crate::Validator`].
#[derive(Debug, Error)]
pub enum SchemaConstructionError {
    /// A keyword was present with a value shape the compiler does not know how to lower.
    #[error("unsupported value for keyword {keyword:?}: {reason}")]
    UnsupportedKeyword {
        /// The offending keyword.
        keyword: String,
        /// Human readable explanation of why the value could not be compiled.
        reason: String,
    },

    /// A `format` name's accompanying value could not be turned into a checker
    /// (this is distinct from an *unrecognised* format name, which is always accepted).
    #[error("invalid regular expression for keyword {keyword:?}: {source}")]
    InvalidPattern {
        /// The offending keyword (`pattern` or a `patternProperties` key).
        keyword: String,
        /// The underlying regex compilation error.
        #[source]
        source: regex::Error,
    },
}

/// Failure caused by an invalid argument to a public entry point (as opposed to a
/// malformed schema document, which is reported as [`SchemaConstructionError`]).
#[derive(Debug, Error)]
pub enum ArgumentError {
    /// A required argument was missing (JSON `null`) where a schema was expected.
    #[error("{argument} is required and cannot be null")]
    MissingRequiredArgument {
        /// Name of the missing argument.
        argument: String,
    },
}

/// Error returned by [`crate::compile`].
///
/// Validator construction can fail for two unrelated reasons: the caller passed a
/// missing/null argument, or the schema itself uses a construct the compiler does not
/// support. `thiserror`'s `#[from]` lets call sites use `?` against either source.
#[derive(Debug, Error)]
pub enum CompileError {
    /// See [`ArgumentError`].
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    /// See [`SchemaConstructionError`].
    #[error(transparent)]
    SchemaConstruction(#[from] SchemaConstructionError),
}
