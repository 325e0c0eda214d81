//! Syntax inference: guess a grammar, then translate it to a dpaste label.

/// Syntax vocabulary and alias canonicalization.
pub mod canonical;
mod guess;
mod heuristic;
mod library;
/// Grammar-name → syntax-label table.
pub mod table;

pub use guess::{guess, guess_for_content, guess_for_filename, GuessSource};
pub use table::SyntaxTable;

use crate::constants::{FALLBACK_SYNTAX, STDIN_SENTINEL};
use crate::error::AppError;
use crate::text::trimmed_nonempty;
use std::borrow::Cow;
use thiserror::Error;

/// Where the content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameHint<'a> {
    /// Content arrived on an interactive stream; classify by content alone.
    Stdin,
    /// Content came from a named file.
    Named(&'a str),
}

impl<'a> FilenameHint<'a> {
    /// Map a raw filename onto a hint; only [`STDIN_SENTINEL`] means stdin.
    pub fn from_name(filename: &'a str) -> Self {
        if filename == STDIN_SENTINEL {
            Self::Stdin
        } else {
            Self::Named(filename)
        }
    }
}

impl<'a> From<Option<&'a str>> for FilenameHint<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map(Self::from_name).unwrap_or(Self::Stdin)
    }
}

/// Raw grammar display name produced by the guesser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerGuess {
    name: &'static str,
    source: GuessSource,
}

impl LexerGuess {
    pub(crate) fn new(name: &'static str, source: GuessSource) -> Self {
        Self { name, source }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn source(&self) -> GuessSource {
        self.source
    }
}

/// No grammar could be confidently inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no grammar recognized")]
pub struct NotRecognized;

/// Resolve a syntax label from a raw filename hint and content.
///
/// # Returns
/// A label from the accepted vocabulary; `text` when nothing matches.
pub fn resolve_syntax_label(filename_hint: &str, content: &str) -> &'static str {
    resolve(FilenameHint::from_name(filename_hint), content)
}

/// Typed form of [`resolve_syntax_label`].
pub fn resolve(hint: FilenameHint<'_>, content: &str) -> &'static str {
    match guess(hint, content) {
        Ok(lexer) => table::global().label_for(lexer.name()),
        Err(NotRecognized) => FALLBACK_SYNTAX,
    }
}

/// Pick the syntax to submit.
///
/// Precedence: explicit flag, then configured default, then inference.
/// Overrides are canonicalized but not validated; the service has the final
/// word on unknown values.
pub fn select_syntax(
    explicit: Option<&str>,
    configured: Option<&str>,
    hint: FilenameHint<'_>,
    content: &str,
) -> Cow<'static, str> {
    if let Some(value) = trimmed_nonempty(explicit).or_else(|| trimmed_nonempty(configured)) {
        let canonical = canonical::canonicalize(value);
        return match canonical::known_value(&canonical) {
            Some(known) => Cow::Borrowed(known),
            None => Cow::Owned(canonical),
        };
    }
    let label = resolve(hint, content);
    tracing::debug!(syntax = label, "inferred syntax");
    Cow::Borrowed(label)
}

/// Validate the syntax table and load the bundled syntax set.
///
/// # Errors
/// Returns [`AppError::SyntaxTable`] when the compiled-in table is malformed.
pub fn init() -> Result<&'static SyntaxTable, AppError> {
    let table = table::init()?;
    library::prewarm();
    Ok(table)
}
