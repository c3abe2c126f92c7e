//! Where to connect to
//!
//! A check either talks to a local server over a unix socket or to a
//! host/port over TCP. The socket wins if both are configured.

use std::fmt;
use std::path::PathBuf;

use mysql::{Opts, OptsBuilder};

use crate::credentials::Credentials;

/// The range a `--port` must fall strictly inside of
pub const MIN_PORT: u32 = 1;
pub const MAX_PORT: u32 = 65535;

#[derive(Debug, PartialEq)]
pub struct InvalidPort(pub u32);

impl fmt::Display for InvalidPort {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "invalid port, should be a value between {} and {}",
            MIN_PORT, MAX_PORT
        )
    }
}

/// Reject ports at or outside the bounds
///
/// Both bounds are excluded, so 1 and 65535 are refused along with anything
/// that doesn't fit in a u16.
pub fn validate_port(port: u32) -> Result<u16, InvalidPort> {
    if port <= MIN_PORT || port >= MAX_PORT {
        return Err(InvalidPort(port));
    }
    Ok(port as u16)
}

#[derive(Clone, Debug, PartialEq)]
pub enum Endpoint {
    Socket(PathBuf),
    Tcp { host: String, port: u16 },
}

/// Everything needed to open a connection
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub endpoint: Endpoint,
    pub credentials: Credentials,
    pub database: String,
}

impl Target {
    /// Build a target, preferring `socket` over `host`/`port`
    pub fn new(
        socket: Option<PathBuf>,
        host: &str,
        port: u16,
        database: &str,
        credentials: Credentials,
    ) -> Target {
        let endpoint = match socket {
            Some(path) => Endpoint::Socket(path),
            None => Endpoint::Tcp {
                host: host.to_owned(),
                port,
            },
        };
        Target {
            endpoint,
            credentials,
            database: database.to_owned(),
        }
    }

    /// Connection options for the mysql client
    pub fn opts(&self) -> Opts {
        let builder = OptsBuilder::new()
            .user(Some(&self.credentials.user))
            .pass(Some(&self.credentials.password))
            .db_name(Some(&self.database));
        let builder = match &self.endpoint {
            Endpoint::Socket(path) => builder.socket(Some(path.to_string_lossy())),
            Endpoint::Tcp { host, port } => builder
                .ip_or_hostname(Some(host))
                .tcp_port(*port)
                .prefer_socket(false),
        };
        builder.into()
    }
}

/// DSN style rendering with the password masked, for log lines
impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let pass = if self.credentials.password.is_empty() {
            ""
        } else {
            "***"
        };
        write!(f, "{}:{}@", self.credentials.user, pass)?;
        match &self.endpoint {
            Endpoint::Socket(path) => write!(f, "unix({})", path.display())?,
            Endpoint::Tcp { host, port } => write!(f, "tcp({}:{})", host, port)?,
        }
        write!(f, "/{}", self.database)
    }
}
