//! Minimal async NNTP client
//!
//! Just enough of RFC 3977 to resolve an article number to a message-id:
//! connect (plain or TLS), optional AUTHINFO and MODE READER, GROUP, STAT,
//! ARTICLE and QUIT.

mod articles;
mod auth;
mod connection;
mod group_ops;
mod io;
mod session;

use crate::config::ServerConfig;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tracing::debug;

/// Byte stream an [`NntpClient`] can talk over
///
/// Implemented for anything that is `AsyncRead + AsyncWrite`, so a TCP socket,
/// a TLS stream and an in-memory duplex pipe all qualify.
pub trait NntpStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> NntpStream for T {}

/// Authentication/lifecycle state of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnectionState {
    /// Connected and ready for commands (not authenticated)
    Ready,
    /// AUTHINFO accepted
    Authenticated,
    /// QUIT sent
    Closed,
}

/// Async NNTP client
///
/// # Example
///
/// ```no_run
/// use gmane_rescue::{NntpClient, ServerConfig};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut client = NntpClient::connect(Arc::new(ServerConfig::gmane())).await?;
///
/// client.select_group("gmane.comp.version-control.git").await?;
/// let info = client.stat("54801").await?;
/// println!("Article {} is {}", info.number, info.message_id);
///
/// client.quit().await?;
/// # Ok(())
/// # }
/// ```
#[must_use]
pub struct NntpClient {
    /// Buffered transport (plain TCP, TLS, or anything else)
    stream: BufReader<Box<dyn NntpStream>>,
    /// Connection state
    state: ConnectionState,
    /// Server configuration
    config: Arc<ServerConfig>,
    /// Currently selected newsgroup
    current_group: Option<String>,
    /// Whether this connection received garbage and should be discarded
    is_broken: bool,
}

impl NntpClient {
    /// Check if this connection is broken and should be discarded
    pub fn is_broken(&self) -> bool {
        self.is_broken
    }

    fn mark_broken(&mut self) {
        self.is_broken = true;
    }

    /// Get the currently selected newsgroup, if any
    pub fn current_group(&self) -> Option<&str> {
        self.current_group.as_deref()
    }

    /// Check if the client is currently authenticated
    pub fn is_authenticated(&self) -> bool {
        self.state == ConnectionState::Authenticated
    }

    /// Check if QUIT has been sent on this connection
    pub fn is_closed(&self) -> bool {
        self.state == ConnectionState::Closed
    }

    /// Configuration this client was created with
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

impl Drop for NntpClient {
    fn drop(&mut self) {
        debug!("NntpClient dropped");
    }
}
