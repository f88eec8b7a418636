//! TCP/TLS Transport Layer
//!
//! Single responsibility: connect a byte stream to the API endpoint and
//! move whole frames across it. No knowledge of commands, login, or
//! sessions.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::{lookup_host, TcpSocket, TcpStream};
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig as TlsConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::VndbError;
use crate::protocol::EOT;

/// A connected byte stream to the API, plain or TLS-wrapped.
///
/// Can only be constructed via [`Transport::connect`].
#[derive(Debug)]
pub enum Transport {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl Transport {
    /// Connect to the endpoint named by the configuration.
    ///
    /// Resolves the host, applies the configured socket buffer sizes, and
    /// performs the TLS handshake when the configuration asks for one.
    pub async fn connect(config: &ClientConfig) -> Result<Self, VndbError> {
        let port = config.effective_port();
        debug!(host = %config.host, port = port, tls = config.tls(), "Connecting");

        let stream = open_stream(config, port).await?;

        if config.tls() {
            let server_name = ServerName::try_from(config.host.clone())
                .map_err(|_| VndbError::InvalidServerName(config.host.clone()))?;
            let stream = tls_connector().connect(server_name, stream).await?;
            debug!(host = %config.host, "TLS handshake complete");
            Ok(Self::Tls(Box::new(stream)))
        } else {
            Ok(Self::Plain(stream))
        }
    }

    /// Send one framed command.
    pub async fn send(&mut self, frame: &[u8]) -> Result<(), VndbError> {
        match self {
            Self::Plain(stream) => stream.write_all(frame).await?,
            Self::Tls(stream) => stream.write_all(frame).await?,
        }
        Ok(())
    }

    /// Read one frame: everything up to and including the terminator.
    ///
    /// A closed stream ends the read early; whatever arrived before the
    /// close is returned without a terminator for the caller to judge.
    pub async fn read_frame(&mut self, chunk_size: usize) -> Result<Vec<u8>, VndbError> {
        let frame = match self {
            Self::Plain(stream) => read_until_eot(stream, chunk_size).await?,
            Self::Tls(stream) => read_until_eot(stream, chunk_size).await?,
        };
        Ok(frame)
    }
}

/// Open the TCP stream with the configured socket buffer sizes, trying
/// each resolved address in order.
async fn open_stream(config: &ClientConfig, port: u16) -> Result<TcpStream, VndbError> {
    let mut last_err = None;
    for addr in lookup_host((config.host.as_str(), port)).await? {
        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4()?,
            SocketAddr::V6(_) => TcpSocket::new_v6()?,
        };
        socket.set_recv_buffer_size(config.receive_buffer_size as u32)?;
        socket.set_send_buffer_size(config.send_buffer_size as u32)?;
        match socket.connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!(addr = %addr, error = %e, "Address failed, trying next");
                last_err = Some(e);
            }
        }
    }

    Err(VndbError::Io(last_err.unwrap_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no addresses resolved for {}", config.host),
        )
    })))
}

/// Accumulate chunks from `reader` until a chunk ends in the terminator
/// or the stream closes.
///
/// The terminator check looks at the last byte actually read in the
/// current chunk, never at stale buffer contents.
async fn read_until_eot<R>(reader: &mut R, chunk_size: usize) -> Result<Vec<u8>, std::io::Error>
where
    R: AsyncRead + Unpin,
{
    let mut frame = Vec::with_capacity(chunk_size);
    let mut chunk = vec![0u8; chunk_size];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        frame.extend_from_slice(&chunk[..n]);
        if chunk[n - 1] == EOT {
            break;
        }
    }
    Ok(frame)
}

/// Build a TLS connector trusting the bundled webpki roots.
fn tls_connector() -> TlsConnector {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let config = TlsConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    TlsConnector::from(Arc::new(config))
}
