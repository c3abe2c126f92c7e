//! Reading connection counts from a running server

use std::fmt;

use mysql::prelude::Queryable;
use mysql::Conn;
use tracing::debug;

use crate::target::Target;

pub const MAX_CONNECTIONS_QUERY: &str = "SELECT @@GLOBAL.max_connections";
pub const THREADS_CONNECTED_QUERY: &str = "SELECT VARIABLE_VALUE \
     FROM performance_schema.global_status \
     WHERE variable_name LIKE 'Threads_connected'";

#[derive(Debug)]
pub enum ConnectionsError {
    Connect(mysql::Error),
    MaxConnections(mysql::Error),
    ThreadsConnected(mysql::Error),
    /// The max_connections query succeeded but returned no rows
    NoMaxConnections,
    /// The Threads_connected query succeeded but returned no rows
    NoThreadsConnected,
}

impl fmt::Display for ConnectionsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::ConnectionsError::*;
        match self {
            Connect(e) => write!(f, "error connecting to MySQL: {}", e),
            MaxConnections(e) => write!(f, "error fetching max connections: {}", e),
            ThreadsConnected(e) => write!(f, "error fetching connections: {}", e),
            NoMaxConnections => write!(f, "error fetching max connections: no rows returned"),
            NoThreadsConnected => write!(f, "error fetching connections: no rows returned"),
        }
    }
}

/// Something that can answer a single-value query
///
/// Every `mysql::prelude::Queryable` is one.
pub trait ScalarQuery {
    fn scalar(&mut self, query: &str) -> mysql::Result<Option<u64>>;
}

impl<Q: Queryable> ScalarQuery for Q {
    fn scalar(&mut self, query: &str) -> mysql::Result<Option<u64>> {
        self.query_first(query)
    }
}

/// How many clients are connected, and how many the server allows
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionCounts {
    pub used: u64,
    pub max: u64,
}

impl ConnectionCounts {
    /// Open a connection to `target` and read the counts
    pub fn load(target: &Target) -> Result<ConnectionCounts, ConnectionsError> {
        debug!(%target, "connecting");
        let mut conn = Conn::new(target.opts()).map_err(ConnectionsError::Connect)?;
        ConnectionCounts::query(&mut conn)
    }

    /// Read the counts over an already open connection
    pub fn query<Q: ScalarQuery>(conn: &mut Q) -> Result<ConnectionCounts, ConnectionsError> {
        let max = conn
            .scalar(MAX_CONNECTIONS_QUERY)
            .map_err(ConnectionsError::MaxConnections)?
            .ok_or(ConnectionsError::NoMaxConnections)?;
        let used = conn
            .scalar(THREADS_CONNECTED_QUERY)
            .map_err(ConnectionsError::ThreadsConnected)?
            .ok_or(ConnectionsError::NoThreadsConnected)?;
        debug!(used, max, "read connection counts");
        Ok(ConnectionCounts { used, max })
    }
}
