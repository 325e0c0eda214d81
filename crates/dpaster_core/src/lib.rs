//! Core library for dpaster (syntax inference, config, shared constants).

/// Configuration loading, persistence, and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Application error types.
pub mod error;
/// Syntax inference engine and vocabulary.
pub mod syntax;
/// Text normalization helpers.
pub mod text;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{Config, ConfigFields, ConfigStore, ConfigUpdate};
pub use constants::{DEFAULT_API_URL, FALLBACK_SYNTAX, STDIN_SENTINEL};
pub use error::AppError;
pub use syntax::{resolve_syntax_label, select_syntax, FilenameHint};
