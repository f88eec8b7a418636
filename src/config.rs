//! Client configuration

use std::fmt;

/// Default API hostname.
pub const API_HOST: &str = "api.vndb.org";

/// Port for plain TCP connections.
pub const API_PORT: u16 = 19534;

/// Port for TLS connections.
pub const API_TLS_PORT: u16 = 19535;

/// Login credentials for list queries and mutations.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Configuration shared by every session in a pool.
///
/// The connection mode (host, port, TLS, credentials) is fixed for the
/// lifetime of the pool built from this configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API hostname.
    pub host: String,
    /// Port override. `None` selects the standard port for the mode.
    pub port: Option<u16>,
    /// Wrap connections in TLS.
    pub use_tls: bool,
    /// Optional login credentials. Credentials always travel over TLS.
    pub credentials: Option<Credentials>,
    /// Client name reported in the login command.
    pub client_name: String,
    /// Client version reported in the login command.
    pub client_version: String,
    /// Number of pooled sessions. A value of zero is treated as one.
    pub pool_size: usize,
    /// Socket receive buffer size in bytes, also the read chunk size.
    pub receive_buffer_size: usize,
    /// Socket send buffer size in bytes.
    pub send_buffer_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: API_HOST.to_string(),
            port: None,
            use_tls: false,
            credentials: None,
            client_name: env!("CARGO_PKG_NAME").to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
            pool_size: 5,
            receive_buffer_size: 4096,
            send_buffer_size: 4096,
        }
    }
}

impl ClientConfig {
    /// Anonymous configuration over the TLS port.
    pub fn secure() -> Self {
        Self {
            use_tls: true,
            ..Default::default()
        }
    }

    /// Configuration with login credentials, which force TLS.
    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            use_tls: true,
            credentials: Some(Credentials {
                username: username.into(),
                password: password.into(),
            }),
            ..Default::default()
        }
    }

    /// Whether connections are TLS-wrapped. True whenever credentials are
    /// present, regardless of `use_tls`.
    pub fn tls(&self) -> bool {
        self.use_tls || self.credentials.is_some()
    }

    /// The port to connect to, honoring the override.
    pub fn effective_port(&self) -> u16 {
        self.port
            .unwrap_or(if self.tls() { API_TLS_PORT } else { API_PORT })
    }
}
