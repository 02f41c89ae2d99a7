//! HTTP + identity seams used by the metadata client
//!
//! The browser implementations live in `web/`; tests substitute their own.

#![allow(async_fn_in_trait)]

use crate::error::Result;

/// Response of a GET request, body read as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.into(),
        }
    }

    pub fn status(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal GET-only client. Transport failures are errors; non-success
/// statuses are returned as responses.
pub trait HttpClient {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse>;
}

/// Identity collaborator handing out the bearer credential
pub trait CredentialProvider {
    async fn bearer_token(&self) -> Result<String>;
}

/// Fixed token, for tooling and tests
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(pub String);

impl CredentialProvider for StaticCredentials {
    async fn bearer_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Headers attached to every backend request
pub fn json_headers(token: &str) -> Vec<(&'static str, String)> {
    vec![
        ("Content-Type", "application/json".to_string()),
        ("Authorization", format!("Bearer {}", token)),
    ]
}
