//! The PCP wire client and the trait seam in front of it.
//!
//! The session adapter talks to the wire through [`Connector`] and
//! [`PcpSession`], so it can run against the real TCP client
//! ([`TcpConnector`]/[`Conn`]) or a scripted fake in tests.

pub mod conn;

pub use conn::{Conn, TcpConnector};

use crate::error::WireResult;
use crate::params::ConnectionParams;
use crate::protocol::types::{BackendInfo, ConfigItem, NodeId};

/// Opens authenticated PCP sessions.
pub trait Connector {
    /// Session type produced by this connector.
    type Session: PcpSession;

    /// Open a session: transport connect, timeout configuration and the
    /// authentication handshake, all from `params`. On error no session
    /// exists and there is nothing to tear down.
    fn connect(&mut self, params: &ConnectionParams) -> WireResult<Self::Session>;
}

/// One open PCP session.
///
/// A session is torn down by dropping it; implementations send their
/// goodbye in `Drop` and ignore errors there. There is no explicit
/// disconnect call to forget.
pub trait PcpSession {
    /// Fetch status of one backend slot.
    fn node_info(&mut self, node_id: NodeId) -> WireResult<BackendInfo>;

    /// Fetch the full pool configuration, in server order.
    fn pool_status(&mut self) -> WireResult<Vec<ConfigItem>>;

    /// Fetch the number of configured backends.
    ///
    /// Returns the wire value verbatim, including the `-1` failure sentinel.
    fn node_count(&mut self) -> WireResult<i32>;
}
