//! Foundation types for the m2front toolchain.
//!
//! This module provides fundamental types used throughout the front end:
//! - [`Position`] - 1-based line/column of a token or diagnostic
//! - [`LineRange`] - inclusive line span for region warnings
//! - [`TextRange`], [`TextSize`] - byte offsets into a source text
//!
//! This module has NO dependencies on other m2front modules.

mod position;

pub use position::{LineRange, Position};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
