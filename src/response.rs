//! NNTP response types and status codes

/// NNTP response with status code, message, and optional multi-line body
#[derive(Debug, Clone)]
pub struct NntpResponse {
    /// 3-digit NNTP response code
    pub code: u16,
    /// Status message from server
    pub message: String,
    /// Multi-line response body (empty for single-line responses)
    pub lines: Vec<String>,
}

impl NntpResponse {
    /// Check if response indicates success (2xx)
    pub fn is_success(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Check if response indicates continuation (3xx)
    pub fn is_continuation(&self) -> bool {
        self.code >= 300 && self.code < 400
    }

    /// Check if response indicates error (4xx or 5xx)
    pub fn is_error(&self) -> bool {
        self.code >= 400
    }

    /// The status line as the server sent it, e.g. "223 54801 <id@host>"
    pub fn status_line(&self) -> String {
        if self.message.is_empty() {
            self.code.to_string()
        } else {
            format!("{} {}", self.code, self.message)
        }
    }
}

/// NNTP response codes used by the rescuer (RFC 3977, RFC 4643)
pub mod codes {
    // 2xx - Success
    /// Server ready, posting allowed
    pub const READY_POSTING_ALLOWED: u16 = 200;
    /// Server ready, no posting
    pub const READY_NO_POSTING: u16 = 201;
    /// Closing connection
    pub const CLOSING_CONNECTION: u16 = 205;
    /// Group selected
    pub const GROUP_SELECTED: u16 = 211;
    /// Article follows
    pub const ARTICLE_FOLLOWS: u16 = 220;
    /// Article stat
    pub const ARTICLE_STAT: u16 = 223;
    /// Authentication accepted
    pub const AUTH_ACCEPTED: u16 = 281;

    // 3xx - Continuation
    /// Continue with authentication
    pub const AUTH_CONTINUE: u16 = 381;

    // 4xx - Temporary errors
    /// Service temporarily unavailable
    pub const SERVICE_UNAVAILABLE: u16 = 400;
    /// No such newsgroup
    pub const NO_SUCH_GROUP: u16 = 411;
    /// No newsgroup selected
    pub const NO_GROUP_SELECTED: u16 = 412;
    /// No article with that number
    pub const NO_SUCH_ARTICLE_NUMBER: u16 = 423;
    /// No article with that message-id
    pub const NO_SUCH_ARTICLE_ID: u16 = 430;
    /// Authentication required
    pub const AUTH_REQUIRED: u16 = 480;
    /// Authentication rejected
    pub const AUTH_REJECTED: u16 = 481;

    // 5xx - Permanent errors
    /// Command not recognized
    pub const COMMAND_NOT_RECOGNIZED: u16 = 500;
    /// Access denied
    pub const ACCESS_DENIED: u16 = 502;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(code: u16, message: &str) -> NntpResponse {
        NntpResponse {
            code,
            message: message.to_string(),
            lines: vec![],
        }
    }

    #[test]
    fn test_classification() {
        assert!(response(codes::ARTICLE_STAT, "1 <a@b>").is_success());
        assert!(response(codes::AUTH_CONTINUE, "").is_continuation());
        assert!(response(codes::NO_SUCH_GROUP, "").is_error());
        assert!(!response(codes::GROUP_SELECTED, "").is_error());
    }

    #[test]
    fn test_status_line() {
        assert_eq!(
            response(223, "54801 <abc@example.com>").status_line(),
            "223 54801 <abc@example.com>"
        );
        assert_eq!(response(205, "").status_line(), "205");
    }
}
