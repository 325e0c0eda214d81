//! Lookups against syntect's bundled default syntax set.

use std::sync::OnceLock;
use syntect::parsing::SyntaxSet;

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let set = SyntaxSet::load_defaults_newlines();
        tracing::debug!(syntaxes = set.syntaxes().len(), "loaded bundled syntax set");
        set
    })
}

/// Load the syntax set ahead of the first lookup.
pub(crate) fn prewarm() {
    let _ = syntax_set();
}

/// Grammar name registered for `token`, tried as a file extension.
///
/// Matching is ASCII case-insensitive; some grammars register whole file
/// names (`Makefile`, `Gemfile`) as extensions.
pub(crate) fn by_extension(token: &str) -> Option<&'static str> {
    if token.is_empty() {
        return None;
    }
    syntax_set()
        .find_syntax_by_extension(token)
        .map(|syntax| syntax.name.as_str())
}

/// Grammar whose first-line pattern (shebang, modeline, XML prolog) matches.
pub(crate) fn by_first_line(content: &str) -> Option<&'static str> {
    let first_line = content.lines().next()?;
    if first_line.trim().is_empty() {
        return None;
    }
    syntax_set()
        .find_syntax_by_first_line(first_line)
        .map(|syntax| syntax.name.as_str())
}

/// Names of every grammar in the bundled set.
#[cfg(test)]
pub(crate) fn grammar_names() -> impl Iterator<Item = &'static str> {
    syntax_set()
        .syntaxes()
        .iter()
        .map(|syntax| syntax.name.as_str())
}
