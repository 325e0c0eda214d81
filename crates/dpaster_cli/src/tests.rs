//! Unit tests for the `dpaster` CLI entrypoint module.

use super::clipboard::{copy_with, ClipboardError, ClipboardTool};
use super::paste::{
    endpoint_url, error_message_for_response, submit, with_raw_suffix, PasteError, PasteRequest,
};
use super::{Cli, Commands, ConfigAction, Input};
use clap::Parser;
use dpaster_core::{FilenameHint, DEFAULT_API_URL};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// One-shot HTTP listener that records the raw request it receives.
struct FakePasteServer {
    endpoint: String,
    requests: mpsc::Receiver<String>,
}

impl FakePasteServer {
    fn start(status_line: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
        let endpoint = format!(
            "http://{}/api/v2/",
            listener.local_addr().expect("listener addr")
        );
        let (request_tx, requests) = mpsc::channel::<String>();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let request = read_http_request(&mut stream);
                let _ = request_tx.send(request);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        Self { endpoint, requests }
    }

    fn received_request(&self) -> String {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("server should receive a request")
    }
}

fn read_http_request(stream: &mut TcpStream) -> String {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 4096];
    loop {
        let read = match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(read) => read,
        };
        buffer.extend_from_slice(&chunk[..read]);
        let Some(header_end) = buffer.windows(4).position(|window| window == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buffer[..header_end]).to_ascii_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buffer.len() >= header_end + 4 + content_length {
            break;
        }
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

fn request_body(request: &str) -> &str {
    request
        .split_once("\r\n\r\n")
        .map(|(_, body)| body)
        .unwrap_or("")
}

fn client() -> reqwest::Client {
    super::paste::build_client(Duration::from_secs(5)).expect("client")
}

fn sample_request<'a>(content: &'a str) -> PasteRequest<'a> {
    PasteRequest {
        content,
        syntax: "python",
        title: None,
        expiry_days: None,
    }
}

#[tokio::test]
async fn submit_posts_form_fields_and_returns_trimmed_url() {
    let server = FakePasteServer::start("201 Created", "https://dpaste.com/ABCD1234\n");
    let endpoint = endpoint_url(&server.endpoint).expect("endpoint");
    let request = PasteRequest {
        title: Some("demo"),
        expiry_days: Some(7),
        ..sample_request("hello")
    };

    let url = submit(&client(), &endpoint, &request)
        .await
        .expect("paste should succeed");
    assert_eq!(url, "https://dpaste.com/ABCD1234");

    let raw_request = server.received_request();
    assert!(raw_request.starts_with("POST /api/v2/ HTTP/1.1"));
    let lowered = raw_request.to_ascii_lowercase();
    assert!(lowered.contains("content-type: application/x-www-form-urlencoded"));
    assert!(lowered.contains("user-agent: dpaster/"));
    let body = request_body(&raw_request);
    for field in ["content=hello", "syntax=python", "title=demo", "expiry_days=7"] {
        assert!(body.contains(field), "missing {field} in {body}");
    }
}

#[tokio::test]
async fn submit_leaves_out_absent_optional_fields() {
    let server = FakePasteServer::start("200 OK", "https://dpaste.com/XYZ");
    let endpoint = endpoint_url(&server.endpoint).expect("endpoint");

    submit(&client(), &endpoint, &sample_request("hello"))
        .await
        .expect("paste should succeed");

    let raw_request = server.received_request();
    let body = request_body(&raw_request);
    assert!(!body.contains("title="), "body: {body}");
    assert!(!body.contains("expiry_days="), "body: {body}");
}

#[tokio::test]
async fn submit_reports_status_and_body_on_failure() {
    let server = FakePasteServer::start("400 Bad Request", "Invalid syntax choice.\n");
    let endpoint = endpoint_url(&server.endpoint).expect("endpoint");

    let err = submit(&client(), &endpoint, &sample_request("hello"))
        .await
        .expect_err("paste should fail");
    match err {
        PasteError::Status { status, message } => {
            assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
            assert_eq!(message, "Invalid syntax choice.");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn submit_rejects_blank_content_before_any_request() {
    // Nothing listens here; a request attempt would surface as an HTTP error.
    let endpoint = endpoint_url("http://127.0.0.1:9/api/v2/").expect("endpoint");
    let err = submit(&client(), &endpoint, &sample_request("  \n\t"))
        .await
        .expect_err("blank content should fail");
    assert!(matches!(err, PasteError::EmptyContent));
}

#[test]
fn error_message_for_response_matrix_covers_json_reason_and_passthrough() {
    let cases = [
        (
            reqwest::StatusCode::NOT_FOUND,
            r#"{"error":"Not found"}"#,
            "Not found",
        ),
        (reqwest::StatusCode::BAD_REQUEST, "   ", "Bad Request"),
        (
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "raw failure body\n",
            "raw failure body",
        ),
    ];

    for (status, body, expected) in cases {
        assert_eq!(error_message_for_response(status, body), expected);
    }
}

#[test]
fn raw_suffix_is_appended_only_when_requested() {
    assert_eq!(
        with_raw_suffix("https://dpaste.com/ABC".to_string(), true),
        "https://dpaste.com/ABC.txt"
    );
    assert_eq!(
        with_raw_suffix("https://dpaste.com/ABC".to_string(), false),
        "https://dpaste.com/ABC"
    );
}

#[test]
fn endpoint_url_requires_http_scheme() {
    assert!(endpoint_url(DEFAULT_API_URL).is_ok());
    assert!(endpoint_url("  http://127.0.0.1:8080/api/v2/ ").is_ok());
    for invalid in ["not a url", "ftp://dpaste.com/api/v2/"] {
        assert!(
            matches!(
                endpoint_url(invalid),
                Err(PasteError::InvalidEndpoint { .. })
            ),
            "{invalid} should be rejected"
        );
    }
}

#[test]
fn form_fields_keep_declared_order() {
    let request = PasteRequest {
        title: Some("t"),
        expiry_days: Some(3),
        ..sample_request("x")
    };
    let names: Vec<&str> = request
        .form_fields()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, ["content", "syntax", "title", "expiry_days"]);
}

#[test]
fn cli_parses_paste_alias_and_flags() {
    let cli = Cli::try_parse_from([
        "dpaster", "p", "-s", "py", "-e", "7", "-t", "demo", "-r", "-c", "main.py",
    ])
    .expect("cli should parse paste");
    match cli.command {
        Commands::Paste(args) => {
            assert_eq!(args.syntax.as_deref(), Some("py"));
            assert_eq!(args.expires, Some(7));
            assert_eq!(args.title.as_deref(), Some("demo"));
            assert!(args.raw);
            assert!(args.copy);
            assert_eq!(args.file.as_deref(), Some(Path::new("main.py")));
        }
        _ => panic!("expected paste command"),
    }
}

#[test]
fn cli_rejects_expiry_outside_service_range() {
    for days in ["0", "366"] {
        assert!(
            Cli::try_parse_from(["dpaster", "paste", "-e", days]).is_err(),
            "{days} should be rejected"
        );
    }
}

#[test]
fn cli_requires_config_subcommand() {
    assert!(Cli::try_parse_from(["dpaster", "config"]).is_err());
    assert!(Cli::try_parse_from(["dpaster", "c"]).is_err());
}

#[test]
fn cli_parses_config_rm_flags() {
    let cli = Cli::try_parse_from(["dpaster", "c", "rm", "--syntax", "--raw"])
        .expect("cli should parse config rm");
    match cli.command {
        Commands::Config {
            action:
                ConfigAction::Rm {
                    autocp,
                    raw,
                    syntax,
                    expires,
                },
        } => {
            assert!(!autocp);
            assert!(raw);
            assert!(syntax);
            assert!(!expires);
        }
        _ => panic!("expected config rm command"),
    }
}

#[test]
fn cli_global_options_follow_subcommands() {
    let cli = Cli::try_parse_from([
        "dpaster",
        "guess",
        "--endpoint",
        "http://127.0.0.1:1/",
        "--timeout",
        "5",
    ])
    .expect("cli should parse global options");
    assert_eq!(cli.endpoint, "http://127.0.0.1:1/");
    assert_eq!(cli.timeout, 5);
}

#[test]
fn input_from_file_uses_named_hint() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("HelloWorld.java");
    std::fs::write(&path, "class HelloWorld {}").expect("write");

    let input = Input::read(Some(path.as_path())).expect("read");
    assert_eq!(input.content, "class HelloWorld {}");
    match input.hint() {
        FilenameHint::Named(name) => assert!(name.ends_with("HelloWorld.java")),
        FilenameHint::Stdin => panic!("file input must not use the stdin hint"),
    }
}

#[test]
fn clipboard_reports_missing_tools() {
    let tools = [ClipboardTool {
        program: "dpaster-missing-clipboard-tool",
        args: &[],
    }];
    match copy_with(&tools, "https://dpaste.com/ABC") {
        Err(ClipboardError::NoToolAvailable { tried }) => {
            assert_eq!(tried, "dpaster-missing-clipboard-tool")
        }
        other => panic!("expected missing tool error, got {:?}", other),
    }
}

#[cfg(unix)]
#[test]
fn clipboard_falls_through_to_first_working_tool() {
    let tools = [
        ClipboardTool {
            program: "dpaster-missing-clipboard-tool",
            args: &[],
        },
        ClipboardTool {
            program: "cat",
            args: &[],
        },
    ];
    assert_eq!(
        copy_with(&tools, "https://dpaste.com/ABC").expect("cat accepts input"),
        "cat"
    );
}

#[cfg(unix)]
#[test]
fn clipboard_surfaces_tool_exit_status() {
    let tools = [ClipboardTool {
        program: "sh",
        args: &["-c", "cat >/dev/null; exit 3"],
    }];
    assert!(matches!(
        copy_with(&tools, "https://dpaste.com/ABC"),
        Err(ClipboardError::ToolFailed { tool: "sh", .. })
    ));
}

#[cfg(unix)]
#[test]
fn clipboard_tool_closing_stdin_early_is_reaped_and_skipped() {
    let tools = [
        ClipboardTool {
            program: "sh",
            args: &["-c", "exit 0"],
        },
        ClipboardTool {
            program: "cat",
            args: &[],
        },
    ];
    let text = "x".repeat(1 << 20);

    match copy_with(&tools[..1], &text) {
        Err(ClipboardError::Io { tool, source }) => {
            assert_eq!(tool, "sh");
            assert_eq!(source.kind(), std::io::ErrorKind::BrokenPipe);
        }
        other => panic!("expected broken pipe, got {:?}", other),
    }
    assert_eq!(copy_with(&tools, &text).expect("cat accepts input"), "cat");
}
