//! Error kinds for netdraw operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on ErrorKind to tell bad input apart from a broken
/// rendering environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// The requested feature or input shape is not supported
    Unsupported,

    // =========================================================================
    // Model document errors
    // =========================================================================
    /// The document is not well-formed JSON
    ParseFailed,

    /// The JSON does not match the model schema (missing key, wrong type)
    DeserializationFailed,

    /// An index in the model points at nothing (layer, input, node)
    InvalidReference,

    /// A structural invariant of the model does not hold
    InvariantViolation,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Rendering errors
    // =========================================================================
    /// The rendering backend could not be started
    BackendUnavailable,

    /// The rendering backend ran but rejected the graph or the format
    RenderFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
