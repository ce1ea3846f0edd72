//! NNTP authentication support (AUTHINFO USER/PASS, RFC 4643)

use super::{ConnectionState, NntpClient};
use crate::commands;
use crate::error::{NntpError, Result};
use crate::response::codes;
use tracing::debug;

impl NntpClient {
    /// Authenticate with the configured username and password
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::AuthFailed`] - No credentials configured, or the server rejected them
    /// - [`NntpError::Protocol`] - Already authenticated
    /// - [`NntpError::ConnectionClosed`] - Server closed the connection
    /// - [`NntpError::Timeout`] - Server did not respond in time
    pub async fn authenticate(&mut self) -> Result<()> {
        if self.state == ConnectionState::Authenticated {
            return Err(NntpError::Protocol {
                code: codes::ACCESS_DENIED,
                message: "Already authenticated".to_string(),
            });
        }

        let (username, password) = match (&self.config.username, &self.config.password) {
            (Some(user), Some(pass)) => (user.clone(), pass.clone()),
            _ => return Err(NntpError::AuthFailed("no credentials configured".to_string())),
        };
        debug!("Authenticating as {}", username);

        self.send_command(&commands::authinfo_user(&username)).await?;
        let mut response = self.read_response().await?;

        // 281 straight away means the server needs no password
        if response.code == codes::AUTH_CONTINUE {
            self.send_command(&commands::authinfo_pass(&password)).await?;
            response = self.read_response().await?;
        }

        if response.code != codes::AUTH_ACCEPTED {
            return Err(NntpError::AuthFailed(response.message));
        }

        self.state = ConnectionState::Authenticated;
        debug!("Authentication successful");
        Ok(())
    }
}
