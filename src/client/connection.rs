//! Connection setup for the NNTP client
//!
//! Resolves and connects the TCP socket, optionally wraps it in TLS, then
//! reads the server greeting.

use crate::config::ServerConfig;
use crate::error::{NntpError, Result};
use crate::response::codes;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::TlsConnector;
use tokio_rustls::rustls::client::danger::{
    HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier,
};
use tokio_rustls::rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use tokio_rustls::rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
use tracing::{debug, warn};

use super::{ConnectionState, NntpClient, NntpStream};

/// TCP connection timeout in seconds
const TCP_CONNECT_TIMEOUT_SECS: u64 = 120;

/// TLS handshake timeout in seconds
const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 60;

/// Certificate verifier that accepts everything, for `allow_insecure_tls`
#[derive(Debug)]
struct AcceptAnyCertificate;

impl ServerCertVerifier for AcceptAnyCertificate {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, tokio_rustls::rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, tokio_rustls::rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, tokio_rustls::rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::ECDSA_NISTP521_SHA512,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::ED25519,
            SignatureScheme::ED448,
        ]
    }
}

fn resolve(config: &ServerConfig) -> Result<SocketAddr> {
    let addr = format!("{}:{}", config.host, config.port);
    addr.to_socket_addrs()
        .map_err(|e| {
            NntpError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Failed to resolve {}: {}", addr, e),
            ))
        })?
        .next()
        .ok_or_else(|| {
            NntpError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("No address resolved for {}", addr),
            ))
        })
}

async fn connect_tcp(socket_addr: SocketAddr) -> Result<TcpStream> {
    use socket2::{Domain, Protocol, Socket, Type};

    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // NNTP is strict request/response; don't let Nagle hold back short commands
    if let Err(e) = socket.set_nodelay(true) {
        warn!("Failed to set TCP_NODELAY: {}", e);
    }

    // socket2's connect blocks, so run it off the runtime thread and only
    // switch to non-blocking once it has succeeded
    let std_stream = timeout(
        Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        tokio::task::spawn_blocking(move || -> std::io::Result<std::net::TcpStream> {
            socket.connect(&socket_addr.into())?;
            socket.set_nonblocking(true)?;
            Ok(socket.into())
        }),
    )
    .await
    .map_err(|_| NntpError::Timeout)?
    .map_err(|e| NntpError::Io(std::io::Error::other(format!("Task join error: {}", e))))??;

    Ok(TcpStream::from_std(std_stream)?)
}

fn tls_connector(config: &ServerConfig) -> TlsConnector {
    use tokio_rustls::rustls::crypto::{CryptoProvider, ring};
    let _ = CryptoProvider::install_default(ring::default_provider());

    let tls_config = if config.allow_insecure_tls {
        warn!("TLS certificate validation disabled - connection vulnerable to MITM attacks");
        ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyCertificate))
            .with_no_client_auth()
    } else {
        let mut root_store = RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth()
    };

    TlsConnector::from(Arc::new(tls_config))
}

impl NntpClient {
    /// Connect to the NNTP server described by `config`
    ///
    /// Uses TLS when `config.tls` is set, plain TCP otherwise. Does not
    /// authenticate or switch modes; see [`open`](Self::open) for that.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::Io`] - Name resolution or the TCP connection fails
    /// - [`NntpError::Tls`] - TLS handshake fails
    /// - [`NntpError::Timeout`] - Connection or handshake times out
    /// - [`NntpError::Protocol`] - Server greeting is not 200/201
    pub async fn connect(config: Arc<ServerConfig>) -> Result<Self> {
        debug!(
            "Connecting to NNTP server {}:{} (tls: {})",
            config.host, config.port, config.tls
        );

        let socket_addr = resolve(&config)?;
        let tcp_stream = connect_tcp(socket_addr).await?;

        if !config.tls {
            return Self::from_stream(tcp_stream, config).await;
        }

        let server_name = ServerName::try_from(config.host.as_str())
            .map_err(|e| NntpError::Tls(format!("Invalid domain: {}", e)))?
            .to_owned();

        let tls_stream = timeout(
            Duration::from_secs(TLS_HANDSHAKE_TIMEOUT_SECS),
            tls_connector(&config).connect(server_name, tcp_stream),
        )
        .await
        .map_err(|_| NntpError::Timeout)?
        .map_err(|e| NntpError::Tls(format!("TLS handshake failed: {}", e)))?;

        Self::from_stream(tls_stream, config).await
    }

    /// Start a session over an already connected stream
    ///
    /// Reads and checks the server greeting. The stream can be anything that
    /// speaks NNTP, which makes this the entry point for in-memory servers.
    pub async fn from_stream(
        stream: impl NntpStream + 'static,
        config: Arc<ServerConfig>,
    ) -> Result<Self> {
        let stream: Box<dyn NntpStream> = Box::new(stream);

        let mut client = Self {
            stream: BufReader::new(stream),
            state: ConnectionState::Ready,
            config,
            current_group: None,
            is_broken: false,
        };

        let greeting = client.read_response().await?;
        debug!("Server greeting: {} {}", greeting.code, greeting.message);

        if greeting.code != codes::READY_POSTING_ALLOWED && greeting.code != codes::READY_NO_POSTING
        {
            return Err(NntpError::Protocol {
                code: greeting.code,
                message: greeting.message,
            });
        }

        Ok(client)
    }

    /// Connect, then authenticate and enter reader mode as configured
    ///
    /// This is the session the rescuer expects: ready for GROUP.
    pub async fn open(config: Arc<ServerConfig>) -> Result<Self> {
        let mut client = Self::connect(config).await?;
        client.prepare().await?;
        Ok(client)
    }

    /// Run the configured post-greeting steps (AUTHINFO, MODE READER)
    pub async fn prepare(&mut self) -> Result<()> {
        if self.config.has_credentials() {
            self.authenticate().await?;
        }
        if self.config.reader_mode {
            self.mode_reader().await?;
        }
        Ok(())
    }
}
