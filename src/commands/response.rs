//! Status line parsing

use crate::error::{NntpError, Result};
use crate::response::NntpResponse;

/// Longest slice of a garbage line kept in an error message
const MAX_ERROR_EXCERPT: usize = 100;

fn invalid(line: &str) -> NntpError {
    NntpError::InvalidResponse(line.chars().take(MAX_ERROR_EXCERPT).collect())
}

/// Parse an NNTP status line into code and message
///
/// The code must be exactly three ASCII digits. A UTF-8 BOM in front of the
/// line is tolerated, as is a missing space between code and message.
pub fn parse_response_line(line: &str) -> Result<(u16, String)> {
    let line = line.trim_start_matches('\u{FEFF}');
    let bytes = line.as_bytes();

    if bytes.len() < 3 || !bytes[..3].iter().all(u8::is_ascii_digit) {
        return Err(invalid(line));
    }
    if bytes.get(3).is_some_and(u8::is_ascii_digit) {
        return Err(invalid(line));
    }

    let code = line[..3].parse::<u16>().map_err(|_| invalid(line))?;
    let rest = &line[3..];
    let message = rest.strip_prefix(' ').unwrap_or(rest).to_string();

    Ok((code, message))
}

/// Parse single-line NNTP response
pub fn parse_single_response(line: &str) -> Result<NntpResponse> {
    let (code, message) = parse_response_line(line)?;

    Ok(NntpResponse {
        code,
        message,
        lines: vec![],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_line() {
        let (code, msg) = parse_response_line("200 news.gmane.io InterNetNews NNRP server").unwrap();
        assert_eq!(code, 200);
        assert_eq!(msg, "news.gmane.io InterNetNews NNRP server");

        let (code, msg) = parse_response_line("223 54801 <a@b>").unwrap();
        assert_eq!(code, 223);
        assert_eq!(msg, "54801 <a@b>");
    }

    #[test]
    fn test_parse_response_line_invalid() {
        assert!(parse_response_line("abc").is_err());
        assert!(parse_response_line("").is_err());
        assert!(parse_response_line("12").is_err());
        assert!(parse_response_line("2x0 ok").is_err());
    }

    #[test]
    fn test_parse_response_line_code_overflow() {
        assert!(parse_response_line("2000 message").is_err());
        assert!(parse_response_line("99999 message").is_err());
    }

    #[test]
    fn test_parse_response_line_bare_code() {
        let (code, msg) = parse_response_line("205").unwrap();
        assert_eq!(code, 205);
        assert_eq!(msg, "");
    }

    #[test]
    fn test_parse_response_line_bom_and_missing_space() {
        let (code, msg) = parse_response_line("\u{FEFF}201 ready").unwrap();
        assert_eq!(code, 201);
        assert_eq!(msg, "ready");

        let (code, msg) = parse_response_line("200message").unwrap();
        assert_eq!(code, 200);
        assert_eq!(msg, "message");
    }

    #[test]
    fn test_invalid_excerpt_is_truncated() {
        let garbage = "x".repeat(500);
        match parse_response_line(&garbage) {
            Err(NntpError::InvalidResponse(excerpt)) => assert_eq!(excerpt.len(), 100),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
