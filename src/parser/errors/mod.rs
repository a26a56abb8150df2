//! Parser error handling module
//!
//! This module provides error handling for the HDL front-ends:
//! - Categorized error codes, lexical ones kept apart from syntax ones
//! - Context-aware error messages
//! - Hints for common mistakes
//! - Related span tracking (e.g., "block opened here" for a missing `end`)
//!
//! Parsing stops at the first error, so a front-end produces at most one
//! [`SyntaxError`] per file.

mod codes;
mod context;
mod error;

pub use codes::ErrorCode;
pub use context::ParseContext;
pub use error::{RelatedInfo, SyntaxError};

#[cfg(test)]
mod tests;
