//! The PCP session adapter.
//!
//! [`Admin`] executes exactly one request per session: validate → resolve →
//! connect → request → shape. The session object is dropped when the
//! enclosing scope exits, so the disconnect runs on every path out of the
//! request, including decode failures. No session survives between calls.

use crate::directory::Directory;
use crate::error::{Error, Result, WireError};
use crate::params::Target;
use crate::protocol::types::{MAX_BACKENDS, NodeId};
use crate::report::{ConfigRows, NodeInfoRow};
use crate::wire::{Connector, PcpSession};

/// Entry point for the three PCP admin operations.
///
/// Generic over the wire connector and the endpoint directory; `caller` is
/// the identity used for credential-mapping lookups on named targets.
///
/// Fully synchronous: each operation blocks for the whole round-trip and
/// holds no state afterwards. Callers needing concurrency use independent
/// `Admin` values.
pub struct Admin<C, D> {
    connector: C,
    directory: D,
    caller: String,
}

impl<C: Connector, D: Directory> Admin<C, D> {
    /// Create an adapter over a connector and a directory.
    pub fn new(connector: C, directory: D, caller: impl Into<String>) -> Self {
        Self {
            connector,
            directory,
            caller: caller.into(),
        }
    }

    /// Query the status of one backend slot.
    pub fn node_info(&mut self, target: &Target, node_id: NodeId) -> Result<NodeInfoRow> {
        if !(0..MAX_BACKENDS).contains(&node_id) {
            return Err(Error::NodeIdOutOfRange(node_id));
        }
        let params = target.resolve(&self.caller, &self.directory)?;

        let mut session = self
            .connector
            .connect(&params)
            .map_err(Error::ConnectionFailed)?;
        let info = session
            .node_info(node_id)
            .map_err(Error::NodeInfoUnavailable)?;
        Ok(NodeInfoRow::from(info))
    }

    /// Query the full pool configuration.
    ///
    /// Zero rows is a valid outcome and yields an empty sequence.
    pub fn pool_status(&mut self, target: &Target) -> Result<ConfigRows> {
        let params = target.resolve(&self.caller, &self.directory)?;

        let mut session = self
            .connector
            .connect(&params)
            .map_err(Error::ConnectionFailed)?;
        let rows = session
            .pool_status()
            .map_err(Error::PoolStatusUnavailable)?;
        tracing::debug!(rows = rows.len(), "pool status received");
        Ok(ConfigRows::new(rows))
    }

    /// Query the number of configured backends.
    pub fn node_count(&mut self, target: &Target) -> Result<i32> {
        let params = target.resolve(&self.caller, &self.directory)?;

        let mut session = self
            .connector
            .connect(&params)
            .map_err(Error::ConnectionFailed)?;
        let count = session.node_count().map_err(Error::NodeCountUnavailable)?;
        if count < 0 {
            // The wire reports failure as a count of -1; never surface it as data.
            return Err(Error::NodeCountUnavailable(WireError::Protocol(format!(
                "node count sentinel {count} in reply"
            ))));
        }
        Ok(count)
    }
}
