//! Error types for the NNTP client and the URL rescuer

use thiserror::Error;

/// NNTP protocol and connection errors
#[derive(Error, Debug)]
pub enum NntpError {
    /// IO error during network operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TLS error during secure connection
    #[error("TLS error: {0}")]
    Tls(String),

    /// Connection timeout
    #[error("Connection timeout")]
    Timeout,

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// NNTP protocol error with response code
    #[error("NNTP error {code}: {message}")]
    Protocol {
        /// NNTP response code (e.g., 411, 430, 502)
        code: u16,
        /// Error message from server
        message: String,
    },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// No such newsgroup
    #[error("No such newsgroup: {0}")]
    NoSuchGroup(String),

    /// No such article
    #[error("No such article: {0}")]
    NoSuchArticle(String),

    /// No newsgroup selected
    #[error("No newsgroup selected")]
    NoGroupSelected,

    /// Connection closed unexpectedly
    #[error("Connection closed")]
    ConnectionClosed,
}

/// Result type alias using NntpError
pub type Result<T> = std::result::Result<T, NntpError>;

/// Errors raised while rescuing a gmane URL
///
/// Everything except [`RescueError::Nntp`] is a usage error: the input URL is
/// not something this tool can resolve, and no network traffic has happened.
#[derive(Error, Debug)]
pub enum RescueError {
    /// The input could not be parsed as a URL at all
    #[error("Couldn't parse URL {url}: {source}")]
    Url {
        /// The offending input
        url: String,
        /// Parser failure
        source: url::ParseError,
    },

    /// The host is not a gmane.org archive host
    #[error("Must be a gmane URL: {0}")]
    NotGmane(String),

    /// The first path segment is missing or is not a gmane newsgroup
    #[error("Couldn't parse URL {0} - path didn't start with '/gmane.'")]
    BadGroup(String),

    /// The second path segment is missing or is not an article number
    #[error("Couldn't parse URL {0} - no article number after the group")]
    BadArticle(String),

    /// The server rejected a request or the connection failed
    #[error(transparent)]
    Nntp(#[from] NntpError),
}

impl RescueError {
    /// Whether this error comes from the input rather than the server
    pub fn is_usage(&self) -> bool {
        !matches!(self, RescueError::Nntp(_))
    }
}

/// Errors raised while verifying a rescued URL over HTTP
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Connection, TLS or body read failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// A lookup URL template without exactly one `%s` placeholder
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("URL template must contain exactly one %s: {0}")]
pub struct TemplateError(pub String);

/// Errors that end a self-test run
#[derive(Error, Debug)]
pub enum SelfTestError {
    /// A sample URL could not be rescued
    #[error(transparent)]
    Rescue(#[from] RescueError),

    /// A rescued URL could not be fetched
    #[error(transparent)]
    Verify(#[from] VerifyError),

    /// Report output could not be written
    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}
