//! NNTP server configuration

/// Hostname of the NNTP server that still carries the gmane newsgroups
pub const GMANE_NEWS_HOST: &str = "news.gmane.io";

/// Standard port for plain NNTP
pub const NNTP_PORT: u16 = 119;

/// Standard port for NNTP over implicit TLS
pub const NNTPS_PORT: u16 = 563;

/// NNTP server configuration
///
/// Contains all the information needed to connect to an NNTP server.
/// The gmane server is public, so credentials are optional.
///
/// # Example
///
/// ```
/// use gmane_rescue::ServerConfig;
///
/// // The default gmane server over plain NNTP
/// let config = ServerConfig::gmane();
/// assert_eq!(config.port, 119);
///
/// // A private mirror that wants a login
/// let config = ServerConfig::tls("news.example.com").with_credentials("user", "pass");
/// assert!(config.has_credentials());
/// ```
#[must_use]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerConfig {
    /// Server hostname (e.g., "news.gmane.io")
    pub host: String,

    /// Server port (typically 119 for plain, 563 for TLS)
    pub port: u16,

    /// Wrap the connection in TLS right after the TCP handshake
    #[cfg_attr(feature = "serde", serde(default))]
    pub tls: bool,

    /// Allow insecure TLS connections (self-signed certificates, expired certificates)
    ///
    /// **Security Warning:** Setting this to `true` disables certificate validation,
    /// making your connection vulnerable to man-in-the-middle attacks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allow_insecure_tls: bool,

    /// Username for AUTHINFO, if the server wants one
    #[cfg_attr(feature = "serde", serde(default))]
    pub username: Option<String>,

    /// Password for AUTHINFO
    #[cfg_attr(feature = "serde", serde(default))]
    pub password: Option<String>,

    /// Send MODE READER after connecting
    #[cfg_attr(feature = "serde", serde(default))]
    pub reader_mode: bool,
}

impl ServerConfig {
    /// Create a new anonymous server configuration
    pub fn new(host: impl Into<String>, port: u16, tls: bool) -> Self {
        Self {
            host: host.into(),
            port,
            tls,
            allow_insecure_tls: false,
            username: None,
            password: None,
            reader_mode: false,
        }
    }

    /// Create a configuration for a plain connection on the standard port (119)
    pub fn plain(host: impl Into<String>) -> Self {
        Self::new(host, NNTP_PORT, false)
    }

    /// Create a configuration for a TLS connection on the standard secure port (563)
    pub fn tls(host: impl Into<String>) -> Self {
        Self::new(host, NNTPS_PORT, true)
    }

    /// The public gmane server over plain NNTP
    pub fn gmane() -> Self {
        Self::plain(GMANE_NEWS_HOST)
    }

    /// Attach AUTHINFO credentials
    ///
    /// **Warning:** Plain connections transmit credentials in clear text.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Whether both a username and a password are configured
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::gmane()
    }
}
