//! Static grammar-name → syntax-label table.
//!
//! Keys are grammar display names as produced by the bundled syntax set and
//! the built-in recognizers; lookups are exact and case-sensitive.

use super::canonical::is_known_syntax;
use crate::constants::FALLBACK_SYNTAX;
use crate::error::AppError;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Grammar display name → syntax label.
pub(crate) const SYNTAX_TABLE_ENTRIES: &[(&str, &str)] = &[
    // Bundled syntax set (Sublime Text default packages).
    ("ASP", "html"),
    ("ActionScript", "actionscript"),
    ("AppleScript", "applescript"),
    ("Batch File", "batch"),
    ("BibTeX", "bibtex"),
    ("Bourne Again Shell (bash)", "bash"),
    ("C", "c"),
    ("C#", "csharp"),
    ("C++", "cpp"),
    ("CSS", "css"),
    ("Cargo Build Results", "text"),
    ("Clojure", "clojure"),
    ("D", "d"),
    ("Diff", "diff"),
    ("Erlang", "erlang"),
    ("Go", "go"),
    ("Graphviz (DOT)", "graphviz"),
    ("Groovy", "groovy"),
    ("HTML", "html"),
    ("HTML (ASP)", "html"),
    ("HTML (Erlang)", "html"),
    ("HTML (Rails)", "erb"),
    ("HTML (Tcl)", "html"),
    ("Haskell", "haskell"),
    ("JSON", "json"),
    ("Java", "java"),
    ("Java Properties", "properties"),
    ("Java Server Page (JSP)", "jsp"),
    ("JavaDoc", "java"),
    ("JavaScript", "javascript"),
    ("JavaScript (Rails)", "javascript"),
    ("LaTeX", "tex"),
    ("LaTeX Log", "text"),
    ("Lisp", "common-lisp"),
    ("Literate Haskell", "literate-haskell"),
    ("Lua", "lua"),
    ("MATLAB", "matlab"),
    ("Make Output", "text"),
    ("Makefile", "make"),
    ("Markdown", "markdown"),
    ("MultiMarkdown", "markdown"),
    ("NAnt Build File", "xml"),
    ("OCaml", "ocaml"),
    ("OCamllex", "ocaml"),
    ("OCamlyacc", "ocaml"),
    ("Objective-C", "objective-c"),
    ("Objective-C++", "objective-c++"),
    ("PHP", "php"),
    ("PHP Source", "php"),
    ("Pascal", "delphi"),
    ("Perl", "perl"),
    ("Plain Text", "text"),
    ("Python", "python"),
    ("R", "r"),
    ("R Console", "r"),
    ("Rd (R Documentation)", "tex"),
    ("Regular Expression", "text"),
    ("Regular Expressions (Javascript)", "javascript"),
    ("Regular Expressions (Python)", "python"),
    ("Ruby", "ruby"),
    ("Ruby Haml", "haml"),
    ("Ruby on Rails", "ruby"),
    ("Rust", "rust"),
    ("SQL", "sql"),
    ("SQL (Rails)", "sql"),
    ("Scala", "scala"),
    ("Shell-Unix-Generic", "bash"),
    ("Tcl", "tcl"),
    ("TeX", "tex"),
    ("Textile", "text"),
    ("XML", "xml"),
    ("YAML", "yaml"),
    ("camlp4", "ocaml"),
    ("commands-builtin-shell-bash", "bash"),
    ("reStructuredText", "rst"),
    // Built-in filename and content recognizers.
    ("Ada", "ada"),
    ("Apache Config", "apacheconf"),
    ("Awk", "awk"),
    ("Bash", "bash"),
    ("Bash Session", "console"),
    ("CMake", "cmake"),
    ("COBOL", "cobol"),
    ("CoffeeScript", "coffeescript"),
    ("Common Lisp", "common-lisp"),
    ("Crystal", "crystal"),
    ("Cython", "cython"),
    ("Dart", "dart"),
    ("Django/Jinja", "django"),
    ("Docker", "docker"),
    ("ERB", "erb"),
    ("Elixir", "elixir"),
    ("Elm", "elm"),
    ("EmacsLisp", "emacs-lisp"),
    ("F#", "fsharp"),
    ("Fish", "fish"),
    ("Fortran", "fortran"),
    ("GAS", "gas"),
    ("Gherkin", "gherkin"),
    ("Handlebars", "handlebars"),
    ("INI", "ini"),
    ("JSX", "jsx"),
    ("Julia", "julia"),
    ("Kotlin", "kotlin"),
    ("Less", "less"),
    ("NASM", "nasm"),
    ("Nginx configuration file", "nginx"),
    ("Nim", "nim"),
    ("Nix", "nix"),
    ("PostgreSQL", "postgresql"),
    ("PowerShell", "powershell"),
    ("Prolog", "prolog"),
    ("Protocol Buffer", "protobuf"),
    ("Puppet", "puppet"),
    ("Python Traceback", "pytb"),
    ("Python console session", "pycon"),
    ("Racket", "racket"),
    ("SCSS", "scss"),
    ("Sass", "sass"),
    ("Scheme", "scheme"),
    ("Smalltalk", "smalltalk"),
    ("Solidity", "solidity"),
    ("Swift", "swift"),
    ("TOML", "toml"),
    ("TSX", "typescript"),
    ("Terraform", "terraform"),
    ("TypeScript", "typescript"),
    ("VB.net", "vb.net"),
    ("VHDL", "vhdl"),
    ("Verilog", "verilog"),
    ("VimL", "vim"),
    ("XSLT", "xslt"),
    ("Zig", "zig"),
    // Pygments-style display names seen in older configs and tooling.
    ("Bash (shell)", "bash"),
    ("BatchFile", "batch"),
    ("Clojure Script", "clojure"),
    ("Dockerfile", "docker"),
    ("Emacs Lisp", "emacs-lisp"),
    ("Groff", "text"),
    ("HTML+Django/Jinja", "django"),
    ("HTML+Handlebars", "handlebars"),
    ("HTML+PHP", "php"),
    ("JSON5", "json"),
    ("JSONLD", "json"),
    ("Javascript", "javascript"),
    ("Kotlin Script", "kotlin"),
    ("Lua 5.x", "lua"),
    ("MySQL", "sql"),
    ("Node.js", "javascript"),
    ("Objective-J", "objective-c"),
    ("PL/pgSQL", "postgresql"),
    ("PostgreSQL SQL dialect", "postgresql"),
    ("Python 2.x", "python"),
    ("Python 3", "python"),
    ("Python 3.0 Traceback", "pytb"),
    ("RConsole", "r"),
    ("S", "r"),
    ("SQLite3con", "sql"),
    ("Shell Session", "console"),
    ("Text only", "text"),
    ("Transact-SQL", "sql"),
    ("Vim Script", "vim"),
    ("XML+Django/Jinja", "django"),
    ("YAML+Jinja", "django"),
    ("reST", "rst"),
];

/// Read-only lookup from grammar display name to syntax label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTable {
    entries: BTreeMap<&'static str, &'static str>,
}

impl SyntaxTable {
    /// Build the table from the compiled-in entries, validating each one.
    ///
    /// # Errors
    /// Returns [`AppError::SyntaxTable`] for empty names, duplicate names, or
    /// labels outside the accepted vocabulary.
    pub fn load() -> Result<Self, AppError> {
        Self::from_entries(SYNTAX_TABLE_ENTRIES)
    }

    pub(crate) fn from_entries(entries: &[(&'static str, &'static str)]) -> Result<Self, AppError> {
        let mut map = BTreeMap::new();
        for (name, label) in entries {
            if name.trim().is_empty() {
                return Err(AppError::SyntaxTable("empty grammar name".to_string()));
            }
            if !is_known_syntax(label) {
                return Err(AppError::SyntaxTable(format!(
                    "grammar '{}' maps to unknown syntax '{}'",
                    name, label
                )));
            }
            if map.insert(*name, *label).is_some() {
                return Err(AppError::SyntaxTable(format!(
                    "duplicate grammar name '{}'",
                    name
                )));
            }
        }
        Ok(Self { entries: map })
    }

    pub(crate) fn load_lenient() -> Self {
        let entries = SYNTAX_TABLE_ENTRIES
            .iter()
            .filter(|(name, label)| !name.trim().is_empty() && is_known_syntax(label))
            .map(|(name, label)| (*name, *label))
            .collect();
        Self { entries }
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, grammar: &str) -> Option<&'static str> {
        self.entries.get(grammar).copied()
    }

    /// Lookup with the fallback label applied.
    pub fn label_for(&self, grammar: &str) -> &'static str {
        self.get(grammar).unwrap_or(FALLBACK_SYNTAX)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries ordered by grammar name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().map(|(name, label)| (*name, *label))
    }
}

static SYNTAX_TABLE: OnceLock<SyntaxTable> = OnceLock::new();

/// Validate and install the process-wide table.
///
/// Call once at startup so a malformed table fails fast instead of silently
/// degrading every lookup.
///
/// # Errors
/// Propagates [`SyntaxTable::load`] validation failures.
pub fn init() -> Result<&'static SyntaxTable, AppError> {
    install(&SYNTAX_TABLE, SYNTAX_TABLE_ENTRIES)
}

/// Validates `entries` even when `cell` was already filled by [`global`].
pub(crate) fn install<'a>(
    cell: &'a OnceLock<SyntaxTable>,
    entries: &[(&'static str, &'static str)],
) -> Result<&'a SyntaxTable, AppError> {
    let table = SyntaxTable::from_entries(entries)?;
    Ok(cell.get_or_init(|| table))
}

/// Process-wide table; builds leniently when [`init`] was never called.
pub fn global() -> &'static SyntaxTable {
    SYNTAX_TABLE.get_or_init(SyntaxTable::load_lenient)
}
