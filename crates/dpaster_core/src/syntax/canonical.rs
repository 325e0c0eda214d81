//! Syntax vocabulary accepted by dpaste.com and alias canonicalization.

/// Syntax option metadata for listings and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxOption {
    pub label: &'static str,
    pub value: &'static str,
}

const fn opt(label: &'static str, value: &'static str) -> SyntaxOption {
    SyntaxOption { label, value }
}

/// Closed vocabulary of syntax identifiers, sorted by label.
pub const SYNTAX_OPTIONS: &[SyntaxOption] = &[
    opt("ActionScript", "actionscript"),
    opt("Ada", "ada"),
    opt("Apache config", "apacheconf"),
    opt("AppleScript", "applescript"),
    opt("Assembly (GAS)", "gas"),
    opt("Assembly (NASM)", "nasm"),
    opt("Awk", "awk"),
    opt("Batch", "batch"),
    opt("BibTeX", "bibtex"),
    opt("C", "c"),
    opt("C#", "csharp"),
    opt("C++", "cpp"),
    opt("Clojure", "clojure"),
    opt("CMake", "cmake"),
    opt("COBOL", "cobol"),
    opt("CoffeeScript", "coffeescript"),
    opt("Common Lisp", "common-lisp"),
    opt("Crystal", "crystal"),
    opt("CSS", "css"),
    opt("Cython", "cython"),
    opt("D", "d"),
    opt("Dart", "dart"),
    opt("Diff", "diff"),
    opt("Django/Jinja", "django"),
    opt("Docker", "docker"),
    opt("Elixir", "elixir"),
    opt("Elm", "elm"),
    opt("Emacs Lisp", "emacs-lisp"),
    opt("ERB", "erb"),
    opt("Erlang", "erlang"),
    opt("F#", "fsharp"),
    opt("Fish", "fish"),
    opt("Fortran", "fortran"),
    opt("Gherkin", "gherkin"),
    opt("Go", "go"),
    opt("Graphviz", "graphviz"),
    opt("Groovy", "groovy"),
    opt("Haml", "haml"),
    opt("Handlebars", "handlebars"),
    opt("Haskell", "haskell"),
    opt("HTML", "html"),
    opt("INI", "ini"),
    opt("IRC logs", "irc"),
    opt("Java", "java"),
    opt("Java properties", "properties"),
    opt("JavaScript", "javascript"),
    opt("JSON", "json"),
    opt("JSP", "jsp"),
    opt("JSX", "jsx"),
    opt("Julia", "julia"),
    opt("Kotlin", "kotlin"),
    opt("LaTeX", "tex"),
    opt("Less", "less"),
    opt("Literate Haskell", "literate-haskell"),
    opt("Lua", "lua"),
    opt("Makefile", "make"),
    opt("Markdown", "markdown"),
    opt("MATLAB", "matlab"),
    opt("Nginx config", "nginx"),
    opt("Nim", "nim"),
    opt("Nix", "nix"),
    opt("Objective-C", "objective-c"),
    opt("Objective-C++", "objective-c++"),
    opt("OCaml", "ocaml"),
    opt("Pascal", "delphi"),
    opt("Perl", "perl"),
    opt("PHP", "php"),
    opt("Plain text", "text"),
    opt("PostgreSQL", "postgresql"),
    opt("PowerShell", "powershell"),
    opt("Prolog", "prolog"),
    opt("Protocol Buffers", "protobuf"),
    opt("Puppet", "puppet"),
    opt("Python", "python"),
    opt("Python console", "pycon"),
    opt("Python traceback", "pytb"),
    opt("R", "r"),
    opt("Racket", "racket"),
    opt("reStructuredText", "rst"),
    opt("Ruby", "ruby"),
    opt("Rust", "rust"),
    opt("Sass", "sass"),
    opt("Scala", "scala"),
    opt("Scheme", "scheme"),
    opt("SCSS", "scss"),
    opt("Shell", "bash"),
    opt("Shell session", "console"),
    opt("Smalltalk", "smalltalk"),
    opt("Solidity", "solidity"),
    opt("SQL", "sql"),
    opt("Swift", "swift"),
    opt("Tcl", "tcl"),
    opt("Terraform", "terraform"),
    opt("TOML", "toml"),
    opt("TypeScript", "typescript"),
    opt("Verilog", "verilog"),
    opt("VHDL", "vhdl"),
    opt("Vim script", "vim"),
    opt("Visual Basic .NET", "vb.net"),
    opt("XML", "xml"),
    opt("XSLT", "xslt"),
    opt("YAML", "yaml"),
    opt("Zig", "zig"),
];

/// Convert aliases/legacy names to vocabulary values.
///
/// # Returns
/// Lowercase vocabulary value for known aliases; other input is lowercased and
/// returned as-is (empty string for empty/whitespace input).
pub fn canonicalize(syntax: &str) -> String {
    let lowered = syntax.trim().to_ascii_lowercase();
    let mapped = match lowered.as_str() {
        "py" | "py3" | "python3" | "python2" => "python",
        "js" | "mjs" | "cjs" | "node" | "nodejs" => "javascript",
        "ts" => "typescript",
        "sh" | "shell" | "zsh" | "ksh" => "bash",
        "c++" | "cxx" | "cc" | "hpp" => "cpp",
        "c#" | "cs" => "csharp",
        "f#" | "fs" => "fsharp",
        "yml" => "yaml",
        "md" => "markdown",
        "plaintext" | "plain text" | "plain" | "txt" => "text",
        "rb" => "ruby",
        "rs" => "rust",
        "kt" | "kts" => "kotlin",
        "pl" | "pm" => "perl",
        "ex" | "exs" => "elixir",
        "pwsh" | "ps1" => "powershell",
        "golang" => "go",
        "latex" => "tex",
        "makefile" | "mk" => "make",
        "dockerfile" => "docker",
        "objc" | "objectivec" | "obj-c" => "objective-c",
        "hs" => "haskell",
        "tf" | "hcl" => "terraform",
        "bat" | "cmd" => "batch",
        "vb" | "vbnet" => "vb.net",
        "lisp" | "cl" => "common-lisp",
        "elisp" => "emacs-lisp",
        "jl" => "julia",
        "proto" => "protobuf",
        "dot" => "graphviz",
        "postgres" => "postgresql",
        "jinja" | "jinja2" => "django",
        "restructuredtext" => "rst",
        _ => return lowered,
    };
    mapped.to_string()
}

/// Return `true` when `value` is a member of [`SYNTAX_OPTIONS`].
pub fn is_known_syntax(value: &str) -> bool {
    SYNTAX_OPTIONS.iter().any(|option| option.value == value)
}

/// Find the vocabulary entry for `value` (exact match, no aliasing).
pub(crate) fn known_value(value: &str) -> Option<&'static str> {
    SYNTAX_OPTIONS
        .iter()
        .find(|option| option.value == value)
        .map(|option| option.value)
}

/// Find the friendly label for a syntax value or alias.
///
/// # Returns
/// The display label for a known option, otherwise `None`.
pub fn option_label(value: &str) -> Option<&'static str> {
    let canonical = canonicalize(value);
    SYNTAX_OPTIONS
        .iter()
        .find(|option| option.value == canonical)
        .map(|option| option.label)
}
