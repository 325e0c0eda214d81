//! Lexical guesser: filename patterns first, content shape second.

use super::{heuristic, library, FilenameHint, LexerGuess, NotRecognized};
use crate::text::path_basename;

/// How a [`LexerGuess`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessSource {
    /// Matched a well-known whole file name.
    FileName,
    /// Matched the file extension.
    Extension,
    /// Inferred from the content's shape.
    Content,
    /// Matched a first-line pattern such as a shebang.
    FirstLine,
}

/// Guess the grammar of `content`.
///
/// A named hint is classified by file name alone (content only settles
/// ambiguous extensions); the stdin hint is classified by content.
pub fn guess(hint: FilenameHint<'_>, content: &str) -> Result<LexerGuess, NotRecognized> {
    match hint {
        FilenameHint::Named(filename) => guess_for_filename(filename, content),
        FilenameHint::Stdin => guess_for_content(content),
    }
}

/// Classify by file name; `NotRecognized` when no pattern matches.
pub fn guess_for_filename(filename: &str, content: &str) -> Result<LexerGuess, NotRecognized> {
    let basename = path_basename(filename.trim());
    if basename.is_empty() {
        return Err(NotRecognized);
    }

    if let Some(name) = special_filename_grammar(basename) {
        return Ok(LexerGuess::new(name, GuessSource::FileName));
    }

    if let Some(extension) = file_extension(basename) {
        let lowered = extension.to_ascii_lowercase();
        if let Some(name) = ambiguous_extension_grammar(&lowered, content) {
            return Ok(LexerGuess::new(name, GuessSource::Extension));
        }
        if let Some(name) = extension_grammar(&lowered) {
            return Ok(LexerGuess::new(name, GuessSource::Extension));
        }
        if let Some(name) = library::by_extension(extension) {
            return Ok(LexerGuess::new(name, GuessSource::Extension));
        }
    }

    // Some grammars register whole names (`Gemfile`, `.bashrc`) as extensions.
    library::by_extension(basename)
        .map(|name| LexerGuess::new(name, GuessSource::FileName))
        .ok_or(NotRecognized)
}

/// Classify by content shape; `NotRecognized` for empty or shapeless input.
pub fn guess_for_content(content: &str) -> Result<LexerGuess, NotRecognized> {
    if let Some(name) = heuristic::detect(content) {
        return Ok(LexerGuess::new(name, GuessSource::Content));
    }
    library::by_first_line(content.trim_start())
        .map(|name| LexerGuess::new(name, GuessSource::FirstLine))
        .ok_or(NotRecognized)
}

/// Extension after the last dot; dotfiles without a second dot have none.
fn file_extension(basename: &str) -> Option<&str> {
    let (stem, extension) = basename.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension)
}

fn special_filename_grammar(basename: &str) -> Option<&'static str> {
    let name = match basename {
        "CMakeLists.txt" => "CMake",
        "Dockerfile" | "Containerfile" => "Docker",
        "Makefile" | "makefile" | "GNUmakefile" => "Makefile",
        "Rakefile" | "Gemfile" | "Vagrantfile" | "Podfile" | "Brewfile" => "Ruby",
        "Jenkinsfile" => "Groovy",
        "Cargo.lock" | "Pipfile" | "poetry.lock" => "TOML",
        "nginx.conf" => "Nginx configuration file",
        ".bashrc" | ".bash_profile" | ".bash_aliases" | ".zshrc" | ".profile" | "PKGBUILD" => {
            "Bash"
        }
        ".vimrc" | "_vimrc" => "VimL",
        ".emacs" => "EmacsLisp",
        ".gitconfig" | ".editorconfig" => "INI",
        _ => {
            if basename.starts_with("Dockerfile.") {
                "Docker"
            } else {
                return None;
            }
        }
    };
    Some(name)
}

/// Grammars for extensions missing from the bundled syntax set.
fn extension_grammar(extension: &str) -> Option<&'static str> {
    let name = match extension {
        "ts" | "mts" | "cts" => "TypeScript",
        "tsx" => "TSX",
        "jsx" => "JSX",
        "mjs" | "cjs" => "JavaScript",
        "toml" => "TOML",
        "kt" | "kts" => "Kotlin",
        "swift" => "Swift",
        "dart" => "Dart",
        "zig" => "Zig",
        "ps1" | "psm1" | "psd1" => "PowerShell",
        "ex" | "exs" => "Elixir",
        "scss" => "SCSS",
        "sass" => "Sass",
        "less" => "Less",
        "jl" => "Julia",
        "nim" | "nims" => "Nim",
        "nix" => "Nix",
        "tf" | "tfvars" | "hcl" => "Terraform",
        "proto" => "Protocol Buffer",
        "cr" => "Crystal",
        "f" | "f90" | "f95" | "f03" | "for" => "Fortran",
        "fs" | "fsi" | "fsx" => "F#",
        "scm" | "ss" => "Scheme",
        "rkt" => "Racket",
        "vim" => "VimL",
        "el" => "EmacsLisp",
        "awk" => "Awk",
        "vb" => "VB.net",
        "fish" => "Fish",
        "ini" | "cfg" => "INI",
        "cmake" => "CMake",
        "dockerfile" => "Docker",
        "coffee" => "CoffeeScript",
        "elm" => "Elm",
        "sol" => "Solidity",
        "pyx" | "pxd" => "Cython",
        "erb" => "ERB",
        "hbs" | "handlebars" => "Handlebars",
        "j2" | "jinja" | "jinja2" => "Django/Jinja",
        "feature" => "Gherkin",
        "vhd" | "vhdl" => "VHDL",
        "sv" | "svh" => "Verilog",
        "adb" | "ads" => "Ada",
        "cob" | "cbl" => "COBOL",
        "st" => "Smalltalk",
        "pp" => "Puppet",
        "asm" | "nasm" => "NASM",
        "s" => "GAS",
        "xsl" | "xslt" => "XSLT",
        "pytb" => "Python Traceback",
        "pycon" => "Python console session",
        "htaccess" => "Apache Config",
        _ => return None,
    };
    Some(name)
}

/// Extensions shared by several grammars, settled by content markers.
fn ambiguous_extension_grammar(extension: &str, content: &str) -> Option<&'static str> {
    let name = match extension {
        "h" => {
            let cpp_markers = [
                "class ",
                "namespace ",
                "template<",
                "template <",
                "std::",
                "public:",
                "private:",
            ];
            if cpp_markers.iter().any(|marker| content.contains(marker)) {
                "C++"
            } else {
                "C"
            }
        }
        "m" => {
            let objc_markers = ["@interface", "@implementation", "#import", "@end"];
            let matlab_markers = ["function ", "end\n", "disp(", "fprintf(", "% "];
            if objc_markers.iter().any(|marker| content.contains(marker)) {
                "Objective-C"
            } else if matlab_markers.iter().any(|marker| content.contains(marker)) {
                "MATLAB"
            } else {
                "Objective-C"
            }
        }
        "pl" => {
            let perl_markers = ["my $", "use strict", "sub ", "print "];
            let prolog_clause = content
                .lines()
                .any(|line| line.trim_end().ends_with(":-") || line.contains(") :- "));
            if prolog_clause && !perl_markers.iter().any(|marker| content.contains(marker)) {
                "Prolog"
            } else {
                "Perl"
            }
        }
        _ => return None,
    };
    Some(name)
}
