//! Group selection (RFC 3977 §6.1.1)

use crate::error::{NntpError, Result};
use crate::response::NntpResponse;

/// Build GROUP command
pub fn group(newsgroup: &str) -> String {
    format!("GROUP {}\r\n", newsgroup)
}

/// Group information returned by the GROUP command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    /// Estimated number of articles in the group
    pub count: u64,
    /// Number of the first article
    pub first: u64,
    /// Number of the last article
    pub last: u64,
    /// Group name as echoed by the server
    pub name: String,
}

/// Parse GROUP response to extract article count and range
///
/// Response format: "211 count first last group-name"
pub fn parse_group_response(response: NntpResponse) -> Result<GroupInfo> {
    if !response.is_success() {
        return Err(NntpError::Protocol {
            code: response.code,
            message: response.message,
        });
    }

    let parts: Vec<&str> = response.message.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(NntpError::InvalidResponse(response.message));
    }

    let number = |s: &str| {
        s.parse::<u64>()
            .map_err(|_| NntpError::InvalidResponse(response.message.clone()))
    };

    Ok(GroupInfo {
        count: number(parts[0])?,
        first: number(parts[1])?,
        last: number(parts[2])?,
        name: parts[3].to_string(),
    })
}
