//! # netdraw-error
//!
//! Unified error handling for netdraw.
//!
//! - **ErrorKind**: what went wrong (e.g. ParseFailed, InvalidReference)
//! - **Error Context**: key/value pairs pointing at the offending model entry
//! - **Error Source**: the wrapped underlying error, if any
//!
//! ## Usage
//!
//! ```rust
//! use netdraw_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::InvalidReference, "layer index out of range")
//!         .with_operation("builder::resolve_layer")
//!         .with_context("node", "3")
//!         .with_context("layer_index", "7"))
//! }
//! ```
//!
//! All fallible functions in the workspace return `Result<T, netdraw_error::Error>`.
//! External errors are wrapped with `set_source(err)` at the boundary where they occur.

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using netdraw Error
pub type Result<T> = std::result::Result<T, Error>;
