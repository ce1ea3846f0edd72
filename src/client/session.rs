//! Session management commands: MODE READER (RFC 3977 §5.3) and QUIT (§5.4)

use super::{ConnectionState, NntpClient};
use crate::commands;
use crate::error::{NntpError, Result};
use crate::response::codes;
use tracing::debug;

impl NntpClient {
    /// Switch to reader mode
    ///
    /// Returns `true` if posting is allowed (code 200), `false` if not (201).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Protocol`] - Server returned an unexpected error
    /// - [`NntpError::Timeout`] - Server did not respond in time
    pub async fn mode_reader(&mut self) -> Result<bool> {
        debug!("Switching to reader mode");

        self.send_command(commands::mode_reader()).await?;
        let response = self.read_response().await?;

        match response.code {
            codes::READY_POSTING_ALLOWED => Ok(true),
            codes::READY_NO_POSTING => Ok(false),
            _ => Err(NntpError::Protocol {
                code: response.code,
                message: response.message,
            }),
        }
    }

    /// Close the session gracefully
    ///
    /// Sending QUIT on an already closed session is a no-op.
    pub async fn quit(&mut self) -> Result<()> {
        if self.state == ConnectionState::Closed {
            return Ok(());
        }
        debug!("Closing NNTP connection");

        self.send_command(commands::quit()).await?;
        let response = self.read_response().await?;
        if response.code != codes::CLOSING_CONNECTION {
            debug!("Unexpected QUIT reply: {}", response.status_line());
        }

        self.state = ConnectionState::Closed;
        self.current_group = None;
        Ok(())
    }
}
