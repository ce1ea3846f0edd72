//! Article retrieval commands (RFC 3977 §6.2)

use crate::error::{NntpError, Result};
use crate::response::NntpResponse;

/// Build ARTICLE command
pub fn article(id: &str) -> String {
    format!("ARTICLE {}\r\n", id)
}

/// Build STAT command (RFC 3977 §6.2.4)
///
/// Gets article status without retrieving content.
pub fn stat(id: &str) -> String {
    format!("STAT {}\r\n", id)
}

/// Article number and message-id, as returned by STAT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleInfo {
    /// Article number (0 if message-id was used in the request)
    pub number: u64,
    /// Message identifier, brackets included (e.g., "<abc@example.com>")
    pub message_id: String,
}

/// A full article as returned by ARTICLE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Article number within the selected group
    pub number: u64,
    /// Message identifier, brackets included
    pub message_id: String,
    /// Header and body lines, dot-unstuffed, without line terminators
    pub lines: Vec<String>,
}

impl Article {
    /// The article text with lines joined by `\n`
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Split the "n message-id" part shared by the 220-223 status lines
fn parse_number_and_id(message: &str) -> Result<(u64, String)> {
    let mut parts = message.split_whitespace();

    let number = parts
        .next()
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| NntpError::InvalidResponse(message.to_string()))?;

    let message_id = parts
        .next()
        .ok_or_else(|| NntpError::InvalidResponse(message.to_string()))?;

    Ok((number, message_id.to_string()))
}

/// Parse STAT response (RFC 3977 §6.2.4)
///
/// Response format: "223 n message-id"
pub fn parse_stat_response(response: &NntpResponse) -> Result<ArticleInfo> {
    if !response.is_success() {
        return Err(NntpError::Protocol {
            code: response.code,
            message: response.message.clone(),
        });
    }

    let (number, message_id) = parse_number_and_id(&response.message)?;
    Ok(ArticleInfo { number, message_id })
}

/// Parse ARTICLE response (RFC 3977 §6.2.1)
///
/// Response format: "220 n message-id" followed by the article lines
pub fn parse_article_response(response: NntpResponse) -> Result<Article> {
    if !response.is_success() {
        return Err(NntpError::Protocol {
            code: response.code,
            message: response.message,
        });
    }

    let (number, message_id) = parse_number_and_id(&response.message)?;
    Ok(Article {
        number,
        message_id,
        lines: response.lines,
    })
}
