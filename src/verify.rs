//! HTTP sanity check of rescued URLs

use crate::error::VerifyError;
use reqwest::StatusCode;
use std::fmt;
use tracing::debug;

/// Marker lookup services put in a page when they don't know a Message-ID
pub const NOT_FOUND_MARKER: &str = "not found";

/// What a lookup service said about a rescued URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The page loaded and does not say "not found"
    Found,
    /// The page loaded but says "not found"
    NotFound,
    /// 300 Multiple Choices: the service knows several matching messages
    MultipleChoices(String),
    /// Any other non-success status
    Status(u16),
}

impl Verification {
    /// Classify a response from its status and body
    pub fn classify(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::MULTIPLE_CHOICES {
            let reason = status.canonical_reason().unwrap_or_default();
            return Verification::MultipleChoices(reason.to_string());
        }
        if !status.is_success() {
            return Verification::Status(status.as_u16());
        }
        if body.contains(NOT_FOUND_MARKER) {
            Verification::NotFound
        } else {
            Verification::Found
        }
    }

    /// Line to print under the rescued URL, if any
    pub fn note(&self) -> Option<String> {
        match self {
            Verification::Found | Verification::Status(_) => None,
            Verification::NotFound => Some("!! Message ID was not found".to_string()),
            Verification::MultipleChoices(reason) => Some(format!("   300 {}", reason)),
        }
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verification::Found => f.write_str("found"),
            Verification::NotFound => f.write_str("not found"),
            Verification::MultipleChoices(reason) => write!(f, "300 {}", reason),
            Verification::Status(code) => write!(f, "HTTP {}", code),
        }
    }
}

/// Fetches rescued URLs to see whether the lookup service knows them
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    http: reqwest::Client,
}

impl Verifier {
    /// Verifier using a default HTTP client (redirects followed)
    pub fn new() -> Self {
        Self::default()
    }

    /// Verifier using a caller-configured HTTP client
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// GET `url` and classify the answer
    ///
    /// # Errors
    ///
    /// [`VerifyError::Http`] when the request itself fails (DNS, connect,
    /// TLS, body read). HTTP error statuses are not errors here.
    pub async fn check(&self, url: &str) -> Result<Verification, VerifyError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        debug!("GET {} -> {}", url, status);

        let body = if status.is_success() {
            response.text().await?
        } else {
            String::new()
        };

        Ok(Verification::classify(status, &body))
    }
}
