//! Copy text to the system clipboard by piping it into a platform tool.

use std::io::{self, Write};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard tool available (tried {tried})")]
    NoToolAvailable { tried: String },

    #[error("failed to run {tool}: {source}")]
    Io {
        tool: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with {status}")]
    ToolFailed {
        tool: &'static str,
        status: ExitStatus,
    },
}

/// An external program that reads clipboard content from stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardTool {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

const fn tool(program: &'static str, args: &'static [&'static str]) -> ClipboardTool {
    ClipboardTool { program, args }
}

#[cfg(target_os = "macos")]
const PLATFORM_TOOLS: &[ClipboardTool] = &[tool("pbcopy", &[])];

#[cfg(windows)]
const PLATFORM_TOOLS: &[ClipboardTool] = &[tool("clip", &[])];

#[cfg(not(any(target_os = "macos", windows)))]
const PLATFORM_TOOLS: &[ClipboardTool] = &[
    tool("wl-copy", &[]),
    tool("xclip", &["-selection", "clipboard"]),
    tool("xsel", &["--clipboard", "--input"]),
];

/// Copy `text` with the first platform tool that succeeds.
///
/// # Returns
/// Name of the program that accepted the text.
pub fn copy_text(text: &str) -> Result<&'static str, ClipboardError> {
    copy_with(PLATFORM_TOOLS, text)
}

pub(crate) fn copy_with(
    tools: &[ClipboardTool],
    text: &str,
) -> Result<&'static str, ClipboardError> {
    let mut last_error = None;
    for candidate in tools {
        match run_tool(candidate, text) {
            Ok(()) => return Ok(candidate.program),
            Err(ClipboardError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::debug!(tool = candidate.program, error = %err, "clipboard tool failed");
                last_error = Some(err);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| ClipboardError::NoToolAvailable {
        tried: tools
            .iter()
            .map(|candidate| candidate.program)
            .collect::<Vec<_>>()
            .join(", "),
    }))
}

fn run_tool(candidate: &ClipboardTool, text: &str) -> Result<(), ClipboardError> {
    let io_error = |source| ClipboardError::Io {
        tool: candidate.program,
        source,
    };
    let mut child = Command::new(candidate.program)
        .args(candidate.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(io_error)?;
    if let Some(mut stdin) = child.stdin.take() {
        if let Err(source) = stdin.write_all(text.as_bytes()) {
            // Close the pipe so the tool can exit, then reap it.
            drop(stdin);
            let _ = child.wait();
            return Err(io_error(source));
        }
    }
    let status = child.wait().map_err(io_error)?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::ToolFailed {
            tool: candidate.program,
            status,
        })
    }
}
