//! NNTP command builders and response parsers
//!
//! Only the handful of RFC 3977 commands the rescuer needs: session setup,
//! GROUP, STAT and ARTICLE.

pub mod article;
pub mod group;
pub mod response;

pub use article::*;
pub use group::*;
pub use response::*;

// Authentication and connection management commands

/// Build AUTHINFO USER command
pub fn authinfo_user(username: &str) -> String {
    format!("AUTHINFO USER {}\r\n", username)
}

/// Build AUTHINFO PASS command
pub fn authinfo_pass(password: &str) -> String {
    format!("AUTHINFO PASS {}\r\n", password)
}

/// Build MODE READER command (RFC 3977 §5.3)
pub fn mode_reader() -> &'static str {
    "MODE READER\r\n"
}

/// Build QUIT command
pub fn quit() -> &'static str {
    "QUIT\r\n"
}
