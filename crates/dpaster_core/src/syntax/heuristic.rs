//! Content-shape grammar detection for unnamed input.

use crate::text::{path_basename, utf8_prefix};

const SAMPLE_MAX_BYTES: usize = 64 * 1024;
const SAMPLE_MAX_LINES: usize = 512;

/// Best-effort grammar detection based on simple heuristics.
///
/// Checks run from most to least specific; the keyword-scoring pass at the
/// end breaks ties by declaration order so identical input always yields the
/// same name.
///
/// # Returns
/// Grammar display name when a strong pattern is found, otherwise `None`.
pub(crate) fn detect(content: &str) -> Option<&'static str> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return None;
    }
    let sample = utf8_prefix(trimmed, SAMPLE_MAX_BYTES);
    let lower = sample.to_ascii_lowercase();
    let lines = || sample.lines().take(SAMPLE_MAX_LINES);

    if let Some(grammar) = shebang_interpreter(sample).and_then(|name| shebang_grammar(&name)) {
        return Some(grammar);
    }

    if lower.starts_with("<?php") {
        return Some("PHP");
    }

    // JSON: full parse when the whole document fits in the sample.
    if sample.starts_with('{') || sample.starts_with('[') {
        // When sampling truncates very large JSON payloads, the prefix may not end
        // with the final closing delimiter. Keep large-document detection stable.
        let sample_truncated = sample.len() < trimmed.len();
        let is_json = if sample_truncated {
            sample.contains('"') && (sample.contains(':') || sample.starts_with('['))
        } else {
            serde_json::from_str::<serde_json::Value>(sample).is_ok()
        };
        if is_json {
            return Some("JSON");
        }
    }

    // HTML before generic XML so we don't mis-classify.
    let html_tag_hits = [
        "<html", "<head", "<body", "<div", "<span", "<script", "<style",
    ]
    .iter()
    .filter(|tag| lower.contains(**tag))
    .count();
    if lower.contains("<!doctype html")
        || lower.contains("<html")
        || (sample.starts_with('<') && !lower.starts_with("<?xml") && html_tag_hits >= 1)
    {
        return Some("HTML");
    }

    if lower.starts_with("<?xml") || (sample.starts_with('<') && lower.contains("</")) {
        if lower.contains("<xsl:stylesheet") || lower.contains("<xsl:transform") {
            return Some("XSLT");
        }
        return Some("XML");
    }

    if looks_like_traceback(sample) {
        return Some("Python Traceback");
    }

    if looks_like_unified_diff(sample) {
        return Some("Diff");
    }

    let perl_hits = ["use strict;", "use warnings;", "my $", "sub ", "package "]
        .iter()
        .filter(|kw| lower.contains(**kw))
        .count();
    if perl_hits >= 2 {
        return Some("Perl");
    }

    let has_ps_command = lower.contains("write-host")
        || lower.contains("$psversiontable")
        || lower.contains("set-strictmode")
        || lower.contains("get-childitem");
    let has_param_block = lines().any(|line| {
        let trimmed = line.trim_start();
        trimmed.starts_with("param(") || trimmed.starts_with("param (")
    });
    let has_ps_variable = lower.contains("$env:")
        || lower.contains("$ps")
        || lower.contains("$_")
        || lower.contains("$true")
        || lower.contains("$false");
    if has_ps_command || (has_param_block && has_ps_variable) {
        return Some("PowerShell");
    }

    let shell_hits = [
        (lower.contains("echo ") && lower.contains('$')),
        lower.contains("\nfi"),
        lower.contains("\ndone"),
        lower.contains("if ["),
        lower.contains(" then\n"),
        (lower.contains("case ") && lower.contains(" esac")),
    ]
    .iter()
    .filter(|hit| **hit)
    .count();
    if shell_hits >= 2 && lower.contains('\n') {
        return Some("Bash");
    }

    // Python blocks end in `:` and would otherwise read as YAML mappings.
    if looks_like_python_block(sample) || looks_like_python_from_import(sample) {
        return Some("Python");
    }

    if looks_like_yaml(sample) {
        return Some("YAML");
    }

    let has_toml_header = lines().any(|l| {
        let t = l.trim();
        t.starts_with('[') && t.ends_with(']') && t.len() > 2
    });
    let toml_assignments = lines()
        .filter(|l| {
            let t = l.trim();
            if t.is_empty() || t.starts_with('#') || t.starts_with('[') {
                return false;
            }
            t.contains('=') && !t.contains("==")
        })
        .count();
    if has_toml_header && toml_assignments >= 1 {
        return Some("TOML");
    }

    if looks_like_sql(sample) {
        return Some("SQL");
    }

    if looks_like_markdown(sample) {
        return Some("Markdown");
    }

    let latex_hits = [
        "\\begin{",
        "\\end{",
        "\\usepackage",
        "\\section",
        "\\subsection",
    ]
    .iter()
    .filter(|kw| lower.contains(**kw))
    .count();
    if lower.contains("\\documentclass") || latex_hits >= 2 {
        return Some("LaTeX");
    }

    if lower.contains('{') && lower.contains('}') && lower.contains(':') && lower.contains(';') {
        let css_tokens = [
            "color:",
            "background",
            "margin",
            "padding",
            "font-",
            "display",
            "position",
            "flex",
            "grid",
        ];
        if css_tokens.iter().any(|token| lower.contains(token)) {
            let scss_tokens = ["@mixin", "@include", "@extend", "#{"];
            if scss_tokens.iter().any(|token| lower.contains(token)) || has_scss_variable(sample) {
                return Some("SCSS");
            }
            return Some("CSS");
        }
    }

    // Specialized checks for languages with distinctive constructs.
    let cs_has_using_system = lower.contains("using system");
    let cs_has_namespace_class = lower.contains("namespace ") && lower.contains("class ");
    let cs_has_console = lower.contains("console.");
    if (cs_has_using_system && (cs_has_namespace_class || cs_has_console))
        || (cs_has_namespace_class && cs_has_console)
    {
        return Some("C#");
    }

    let cpp_has_std_scope = lower.contains("std::");
    let cpp_has_usage = lower.contains("cout")
        || lower.contains("vector<")
        || lower.contains("::iterator")
        || lower.contains("int main(");
    if lower.contains("using namespace std")
        || lower.contains("template <")
        || (cpp_has_std_scope && cpp_has_usage)
    {
        return Some("C++");
    }

    if lower.contains("#include") && (lower.contains("int main") || lower.contains("printf")) {
        return Some("C");
    }

    if lower.contains("public static void main") {
        return Some("Java");
    }

    if lines().any(|line| line.trim() == "package main") && lower.contains("func ") {
        return Some("Go");
    }

    let swift_has_import = lower.contains("import foundation") || lower.contains("import swiftui");
    let swift_has_func = lower.contains("func ");
    let swift_has_shape = lower.contains("print(")
        || lower.contains("guard let")
        || lower.contains("protocol ")
        || lower.contains("let ")
        || lower.contains("var ");
    if (swift_has_import && swift_has_func && swift_has_shape)
        || (swift_has_func && (lower.contains("guard let") || lower.contains("protocol ")))
    {
        return Some("Swift");
    }

    best_scored_grammar(&lower)
}

/// Keyword sets per grammar: (name, keywords, minimum hits).
const SCORED_GRAMMARS: &[(&str, &[&str], usize)] = &[
    (
        "Rust",
        &[
            "fn ", "impl", "crate::", "let ", "mut ", "pub ", "struct ", "enum", "match ",
            "trait", "println!",
        ],
        2,
    ),
    (
        "Python",
        &[
            "def ",
            "import ",
            "class ",
            "self",
            "async def",
            "elif",
            "print(",
        ],
        2,
    ),
    (
        "JavaScript",
        &[
            "function",
            "const ",
            "let ",
            "=>",
            "console.",
            "document.",
            "export ",
            "import ",
        ],
        2,
    ),
    (
        "TypeScript",
        &[
            "interface ",
            " type ",
            ": string",
            ": number",
            "implements ",
            " enum ",
            "<t>",
            "readonly ",
        ],
        2,
    ),
    (
        "Go",
        &[
            "package ",
            "func ",
            "fmt.",
            "defer ",
            "go ",
            "chan",
            "interface",
            "select {",
        ],
        2,
    ),
    (
        "Java",
        &[
            "public class",
            "import java.",
            "system.out",
            " implements ",
            " extends ",
            " void main",
        ],
        2,
    ),
    (
        "C#",
        &[
            "using system",
            "namespace ",
            "public class",
            "console.",
            " async ",
            " task<",
            " get;",
        ],
        2,
    ),
    (
        "Kotlin",
        &[
            "fun ",
            "data class",
            "companion object",
            "val ",
            "var ",
            "when (",
            "println(",
        ],
        2,
    ),
    (
        "Dart",
        &[
            "void main()",
            "import 'package:",
            "class ",
            "final ",
            "future<",
            "=>",
        ],
        2,
    ),
    (
        "Zig",
        &[
            "const std = @import",
            "pub fn main(",
            "comptime",
            "@import(",
            "var ",
        ],
        2,
    ),
    (
        "Lua",
        &[
            "local ",
            "function ",
            "require(",
            "elseif",
            "pairs(",
            "ipairs(",
        ],
        2,
    ),
    (
        "Ruby",
        &[
            "require '",
            "def ",
            "end\n",
            "puts ",
            "attr_accessor",
            ".each do",
            "module ",
        ],
        3,
    ),
    (
        "PHP",
        &["<?php", "$this->", "function ", "echo ", "->", "namespace "],
        3,
    ),
    (
        "Elixir",
        &["defmodule ", "defp ", "fn ", "|>", "end", "io.puts"],
        2,
    ),
    (
        "Haskell",
        &["module ", " where", "import qualified", ":: ", "->", "main = "],
        3,
    ),
];

fn best_scored_grammar(lower: &str) -> Option<&'static str> {
    let keyword_hits =
        |keywords: &[&str]| -> usize { keywords.iter().filter(|kw| lower.contains(*kw)).count() };

    let mut best_match: Option<(&'static str, usize)> = None;
    for (grammar, keywords, threshold) in SCORED_GRAMMARS {
        let hits = keyword_hits(keywords);
        if hits >= *threshold {
            match best_match {
                Some((_, best_hits)) if best_hits >= hits => {}
                _ => best_match = Some((*grammar, hits)),
            }
        }
    }
    best_match.map(|(grammar, _)| grammar)
}

fn shebang_interpreter(sample: &str) -> Option<String> {
    let first_line = sample.lines().next()?.trim();
    let interpreter_line = first_line.strip_prefix("#!")?.trim();
    if interpreter_line.is_empty() {
        return None;
    }

    let mut parts = interpreter_line.split_whitespace();
    let first = parts.next()?;
    let mut interpreter = first;
    if path_basename(first).eq_ignore_ascii_case("env") {
        for arg in parts {
            if arg.starts_with('-') {
                continue;
            }
            interpreter = arg;
            break;
        }
    }

    let basename = path_basename(interpreter).trim();
    if basename.is_empty() {
        return None;
    }
    Some(basename.to_ascii_lowercase())
}

fn shebang_grammar(interpreter: &str) -> Option<&'static str> {
    // Versioned interpreters (`python3.12`, `perl5`) share their family grammar.
    let family = interpreter.trim_end_matches(|ch: char| ch.is_ascii_digit() || ch == '.');
    let grammar = match family {
        "python" | "pypy" => "Python",
        "node" | "nodejs" | "deno" | "bun" => "JavaScript",
        "sh" | "bash" | "zsh" | "ksh" | "dash" | "ash" => "Bash",
        "fish" => "Fish",
        "perl" => "Perl",
        "ruby" => "Ruby",
        "php" => "PHP",
        "lua" | "luajit" => "Lua",
        "pwsh" | "powershell" => "PowerShell",
        "tclsh" | "wish" => "Tcl",
        "awk" | "gawk" | "mawk" | "nawk" => "Awk",
        "rscript" => "R",
        "elixir" => "Elixir",
        "escript" => "Erlang",
        "groovy" => "Groovy",
        "julia" => "Julia",
        "make" => "Makefile",
        "racket" => "Racket",
        _ => return None,
    };
    Some(grammar)
}

fn looks_like_python_block(sample: &str) -> bool {
    sample.lines().take(SAMPLE_MAX_LINES).any(|line| {
        let trimmed = line.trim();
        if !trimmed.ends_with(':') {
            return false;
        }
        let header = trimmed.strip_prefix("async ").unwrap_or(trimmed);
        if let Some(rest) = header.strip_prefix("def ") {
            return rest.contains('(') && rest.contains(')');
        }
        if let Some(rest) = header.strip_prefix("class ") {
            let name = rest.trim_end_matches(':');
            let name = name.split('(').next().unwrap_or(name);
            return is_identifier(name.trim());
        }
        trimmed.starts_with("if __name__ ==")
    })
}

fn looks_like_python_from_import(sample: &str) -> bool {
    sample.lines().take(SAMPLE_MAX_LINES).any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(rest) = trimmed.strip_prefix("from ") else {
            return false;
        };
        let Some((module, imported)) = rest.split_once(" import ") else {
            return false;
        };
        let module = module.trim();
        let imported = imported.trim();
        !module.is_empty()
            && !imported.is_empty()
            && module
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '.')
    })
}

fn looks_like_traceback(sample: &str) -> bool {
    sample.starts_with("Traceback (most recent call last):")
}

fn looks_like_unified_diff(sample: &str) -> bool {
    let mut old_header = false;
    let mut new_header = false;
    for line in sample.lines().take(SAMPLE_MAX_LINES) {
        if line.starts_with("--- ") {
            old_header = true;
        } else if line.starts_with("+++ ") && old_header {
            new_header = true;
        } else if line.starts_with("@@ ") && new_header {
            return true;
        }
    }
    sample.starts_with("diff --git ")
}

fn looks_like_markdown(sample: &str) -> bool {
    if sample.contains("```") {
        return true;
    }
    let mut heading = false;
    let mut quote = false;
    let mut list = false;
    for line in sample.lines().take(SAMPLE_MAX_LINES) {
        let trimmed = line.trim_start();
        heading |= is_markdown_heading_line(trimmed);
        quote |= trimmed.starts_with("> ");
        list |= is_markdown_list_line(trimmed);
    }
    let link = has_markdown_link(sample);
    let emphasis = sample.contains("**") || sample.contains("__");
    // A lone `# ...` line is too common in comments to count on its own.
    [heading, quote, list, link, emphasis]
        .iter()
        .filter(|signal| **signal)
        .count()
        >= 2
}

fn is_markdown_heading_line(line: &str) -> bool {
    let bytes = line.as_bytes();
    let mut hash_count = 0usize;
    while hash_count < bytes.len() && bytes[hash_count] == b'#' {
        hash_count += 1;
    }
    if hash_count == 0 || hash_count > 6 {
        return false;
    }
    bytes.get(hash_count) == Some(&b' ')
}

fn is_markdown_ordered_list_line(line: &str) -> bool {
    let bytes = line.as_bytes();
    let mut digits = 0usize;
    while digits < bytes.len() && bytes[digits].is_ascii_digit() {
        digits += 1;
    }
    if digits == 0 {
        return false;
    }
    bytes.get(digits) == Some(&b'.') && bytes.get(digits + 1) == Some(&b' ')
}

fn is_markdown_list_line(line: &str) -> bool {
    ((line.starts_with("- ") || line.starts_with("* ") || line.starts_with("+ "))
        && !line.contains(": "))
        || is_markdown_ordered_list_line(line)
}

fn has_markdown_link(sample: &str) -> bool {
    sample.lines().take(SAMPLE_MAX_LINES).any(|line| {
        let Some(split) = line.find("](") else {
            return false;
        };
        let before = &line[..split];
        let after = &line[split + 2..];
        before
            .rfind('[')
            .map(|open| open + 1 < before.len())
            .unwrap_or(false)
            && after.find(')').map(|close| close > 0).unwrap_or(false)
    })
}

fn has_scss_variable(sample: &str) -> bool {
    sample.lines().take(SAMPLE_MAX_LINES).any(|line| {
        let trimmed = line.trim();
        trimmed
            .strip_prefix('$')
            .and_then(|rest| rest.split_once(':'))
            .map(|(name, _)| {
                !name.is_empty()
                    && name
                        .chars()
                        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
            })
            .unwrap_or(false)
    })
}

pub(crate) fn looks_like_yaml(content: &str) -> bool {
    let mut yaml_pairs = 0usize;
    let mut content_lines = 0usize;
    let mut first_content_line: Option<&str> = None;
    let mut has_doc_start = false;
    let mut first_meaningful_seen = false;

    for line in content.lines().take(SAMPLE_MAX_LINES) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if !first_meaningful_seen {
            first_meaningful_seen = true;
            if trimmed == "---" {
                has_doc_start = true;
                continue;
            }
        }
        content_lines = content_lines.saturating_add(1);
        if first_content_line.is_none() {
            first_content_line = Some(trimmed);
        }
        if trimmed.starts_with("- ")
            || trimmed.contains(": ")
            || (trimmed.ends_with(':') && trimmed.len() > 1)
        {
            let yaml_like = if trimmed.ends_with(':') && trimmed.len() > 1 {
                !trimmed.contains('(')
            } else {
                looks_like_single_line_yaml_mapping(trimmed, true)
            };
            if yaml_like {
                yaml_pairs = yaml_pairs.saturating_add(1);
            }
        }
    }

    if yaml_pairs >= 2 {
        return true;
    }

    if yaml_pairs == 1 && content_lines == 1 {
        return first_content_line
            .map(|line| !line.starts_with("- ") && looks_like_single_line_yaml_mapping(line, false))
            .unwrap_or(false);
    }

    if has_doc_start {
        return yaml_pairs >= 1;
    }

    false
}

fn looks_like_single_line_yaml_mapping(line: &str, allow_unquoted_space_keys: bool) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }
    if trimmed.starts_with("- ") {
        return true;
    }

    let Some((raw_key, raw_value)) = trimmed.split_once(':') else {
        return false;
    };
    let key = raw_key.trim();
    if key.is_empty() {
        return false;
    }
    let quoted_key = (key.starts_with('"') && key.ends_with('"'))
        || (key.starts_with('\'') && key.ends_with('\''));
    if key.contains(char::is_whitespace) && !allow_unquoted_space_keys && !quoted_key {
        return false;
    }

    let value = raw_value.trim();
    if value.contains(';') {
        return false;
    }
    if value.contains('{') || value.contains('}') {
        return looks_like_yaml_flow_mapping(value);
    }
    if value.contains('[') || value.contains(']') {
        return looks_like_yaml_flow_sequence(value);
    }
    if value.contains(char::is_control) {
        return false;
    }
    if !value.starts_with('"') && !value.starts_with('\'') && value.split_whitespace().count() > 3 {
        return false;
    }

    true
}

fn looks_like_yaml_flow_mapping(value: &str) -> bool {
    let trimmed = value.trim();
    if !trimmed.starts_with('{') || !trimmed.ends_with('}') {
        return false;
    }

    let inner = trimmed[1..trimmed.len().saturating_sub(1)].trim();
    if inner.is_empty() {
        return true;
    }

    // `key: {child: value}` is valid YAML; reject CSS/JS-like bodies.
    inner.contains(':') && !inner.contains(';')
}

fn looks_like_yaml_flow_sequence(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.len() >= 2
        && trimmed.starts_with('[')
        && trimmed.ends_with(']')
        && !trimmed.contains(';')
}

fn looks_like_sql(sample: &str) -> bool {
    sample.lines().take(SAMPLE_MAX_LINES).any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("--") || trimmed.starts_with('#') {
            return false;
        }
        let lower = trimmed.to_ascii_lowercase();
        looks_like_select_sql_line(lower.as_str())
            || looks_like_insert_sql_line(lower.as_str())
            || looks_like_update_sql_line(lower.as_str())
            || looks_like_delete_sql_line(lower.as_str())
            || lower.starts_with("create table ")
            || lower.starts_with("alter table ")
            || lower.starts_with("drop table ")
    })
}

fn looks_like_select_sql_line(line: &str) -> bool {
    let Some(after_select) = line.strip_prefix("select ") else {
        return false;
    };
    let Some((projection, from_tail)) = after_select.split_once(" from ") else {
        return false;
    };
    let projection = projection.trim();
    if projection.is_empty() {
        return false;
    }
    let projection_sqlish = projection.contains(',')
        || projection.contains('*')
        || projection.contains('.')
        || projection.contains('(')
        || is_identifier(projection);
    if !projection_sqlish {
        return false;
    }

    let source = from_tail
        .split_whitespace()
        .next()
        .map(|token| token.trim_matches(|ch: char| matches!(ch, ',' | ';')))
        .unwrap_or("");
    !source.is_empty() && source.split('.').all(is_quoted_identifier)
}

fn looks_like_insert_sql_line(line: &str) -> bool {
    line.starts_with("insert into ")
        && (line.contains(" values ")
            || line.contains(" values(")
            || line.contains(" select ")
            || line.contains(" default values"))
}

fn looks_like_update_sql_line(line: &str) -> bool {
    line.starts_with("update ") && line.contains(" set ")
}

fn looks_like_delete_sql_line(line: &str) -> bool {
    line.starts_with("delete from ") && (line.contains(" where ") || line.ends_with(';'))
}

fn is_quoted_identifier(token: &str) -> bool {
    is_identifier(token.trim_matches(|ch| matches!(ch, '"' | '\'' | '`' | '[' | ']')))
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
