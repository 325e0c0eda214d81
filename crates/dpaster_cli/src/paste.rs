//! Paste submission against the dpaste.com form API.

use dpaster_core::constants::RAW_URL_SUFFIX;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("dpaster/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum PasteError {
    #[error("refusing to paste empty content")]
    EmptyContent,

    #[error("invalid endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("server response did not contain a paste URL")]
    MissingUrl,
}

/// Form fields for a single paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteRequest<'a> {
    pub content: &'a str,
    pub syntax: &'a str,
    pub title: Option<&'a str>,
    pub expiry_days: Option<u32>,
}

impl PasteRequest<'_> {
    /// Encoded field list; absent optional fields are left out entirely.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("content", self.content.to_string()),
            ("syntax", self.syntax.to_string()),
        ];
        if let Some(title) = self.title {
            fields.push(("title", title.to_string()));
        }
        if let Some(days) = self.expiry_days {
            fields.push(("expiry_days", days.to_string()));
        }
        fields
    }
}

/// Parse the API endpoint; only `http` and `https` are accepted.
pub fn endpoint_url(endpoint: &str) -> Result<Url, PasteError> {
    let trimmed = endpoint.trim();
    let invalid = |message: String| PasteError::InvalidEndpoint {
        endpoint: trimmed.to_string(),
        message,
    };
    let url = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

pub fn build_client(timeout: Duration) -> Result<Client, PasteError> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?)
}

pub(crate) fn error_message_for_response(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if let Some(error) = value.get("error").and_then(Value::as_str) {
            return error.to_string();
        }
    }

    trimmed.to_string()
}

/// Append the raw-text suffix when requested.
pub fn with_raw_suffix(url: String, raw: bool) -> String {
    if raw {
        format!("{}{}", url, RAW_URL_SUFFIX)
    } else {
        url
    }
}

/// Submit one paste and return the URL the service answered with.
///
/// # Errors
/// [`PasteError::EmptyContent`] before any request when the content is blank;
/// [`PasteError::Status`] for non-2xx responses.
pub async fn submit(
    client: &Client,
    endpoint: &Url,
    request: &PasteRequest<'_>,
) -> Result<String, PasteError> {
    if request.content.trim().is_empty() {
        return Err(PasteError::EmptyContent);
    }

    tracing::debug!(
        endpoint = %endpoint,
        syntax = request.syntax,
        bytes = request.content.len(),
        "submitting paste"
    );
    let res = client
        .post(endpoint.clone())
        .form(&request.form_fields())
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let body = match res.text().await {
            Ok(body) => body,
            Err(err) => format!("failed to read error response body: {}", err),
        };
        return Err(PasteError::Status {
            status,
            message: error_message_for_response(status, &body),
        });
    }

    let body = res.text().await?;
    let url = body.trim();
    if url.is_empty() {
        return Err(PasteError::MissingUrl);
    }
    Ok(url.to_string())
}
