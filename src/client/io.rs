//! Low-level I/O for NNTP protocol communication
//!
//! Command transmission, single-line status reads and dot-terminated
//! multi-line reads, each bounded by a timeout.

use super::NntpClient;
use crate::commands;
use crate::error::{NntpError, Result};
use crate::response::NntpResponse;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt};
use tokio::time::timeout;
use tracing::trace;

const SINGLE_LINE_TIMEOUT: Duration = Duration::from_secs(60);
const MULTILINE_TIMEOUT: Duration = Duration::from_secs(180);

/// Strip NNTP byte-stuffing from a line (leading ".." becomes ".").
pub(crate) fn strip_byte_stuffing(line: &str) -> &str {
    if line.starts_with("..") {
        &line[1..]
    } else {
        line
    }
}

/// Drop the CRLF (or bare LF) line terminator
fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

impl NntpClient {
    /// Send a command to the server
    pub(super) async fn send_command(&mut self, command: &str) -> Result<()> {
        if command.starts_with("AUTHINFO PASS") {
            trace!("Sending command: AUTHINFO PASS ****");
        } else {
            trace!("Sending command: {}", command.trim_end());
        }
        let stream = self.stream.get_mut();
        stream.write_all(command.as_bytes()).await?;
        stream.flush().await?;
        Ok(())
    }

    /// Read one raw line, lossily decoded, without its terminator
    async fn read_line(&mut self) -> Result<String> {
        let mut line_bytes = Vec::with_capacity(512);
        self.stream.read_until(b'\n', &mut line_bytes).await?;

        if line_bytes.is_empty() {
            return Err(NntpError::ConnectionClosed);
        }

        let line = String::from_utf8_lossy(&line_bytes);
        Ok(trim_line_ending(&line).to_string())
    }

    /// Read a single-line response
    pub(super) async fn read_response(&mut self) -> Result<NntpResponse> {
        let result = timeout(SINGLE_LINE_TIMEOUT, async {
            let line = self.read_line().await?;
            trace!("Received: {}", line);
            commands::parse_single_response(&line)
        })
        .await
        .map_err(|_| NntpError::Timeout)?;

        if let Err(NntpError::InvalidResponse(_)) = &result {
            self.mark_broken();
        }
        result
    }

    /// Read a multi-line response (ending with ".\r\n")
    ///
    /// Error statuses (4xx/5xx) carry no data block and are returned with
    /// empty `lines`.
    pub(super) async fn read_multiline_response(&mut self) -> Result<NntpResponse> {
        let result = timeout(MULTILINE_TIMEOUT, async {
            let first_line = self.read_line().await?;
            trace!("Received: {}", first_line);

            let (code, message) = commands::parse_response_line(&first_line)?;
            if code >= 400 {
                return Ok(NntpResponse {
                    code,
                    message,
                    lines: vec![],
                });
            }

            let mut lines = Vec::with_capacity(64);
            loop {
                let line = self.read_line().await?;
                if line == "." {
                    break;
                }
                lines.push(strip_byte_stuffing(&line).to_string());
            }
            trace!("Received {} data lines", lines.len());

            Ok::<_, NntpError>(NntpResponse {
                code,
                message,
                lines,
            })
        })
        .await
        .map_err(|_| NntpError::Timeout)?;

        if let Err(NntpError::InvalidResponse(_)) = &result {
            self.mark_broken();
        }
        result
    }
}
