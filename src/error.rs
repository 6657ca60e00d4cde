//! Error types for pcp-admin.
//!
//! Failures are split into two layers: [`WireError`] for anything that goes
//! wrong on the wire (I/O, framing, authentication, an error frame from the
//! pool) and [`Error`] for the caller-facing taxonomy, which identifies the
//! stage that failed (validation, resolution, connect, or one of the three
//! requests).

use thiserror::Error;

use crate::protocol::types::MAX_BACKENDS;

/// Result type for pcp-admin operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Result type for wire-level operations.
pub type WireResult<T> = core::result::Result<T, WireError>;

/// Transport-layer error from the PCP wire client.
#[derive(Debug, Error)]
pub enum WireError {
    /// I/O error (includes read timeouts)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Protocol error (malformed frame, unexpected reply, bad field)
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Authentication rejected by the PCP server
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Error frame sent by the PCP server
    #[error("server error: {0}")]
    Server(String),
}

impl WireError {
    /// Returns true if the failure happened below the PCP protocol,
    /// i.e. the socket itself is gone or timed out.
    pub fn is_io(&self) -> bool {
        matches!(self, WireError::Io(_))
    }
}

/// Error type for pcp-admin.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrong number of positional arguments
    #[error("wrong number of arguments")]
    InvalidArgumentCount,

    /// Argument text that does not parse as the expected type
    #[error("invalid value {value:?} for {name}")]
    InvalidArgument {
        /// Parameter name
        name: &'static str,
        /// Offending text
        value: String,
    },

    /// Node id outside `[0, MAX_BACKENDS)`
    #[error("node id {0} is out of range (0..{max})", max = MAX_BACKENDS)]
    NodeIdOutOfRange(i32),

    /// Port outside `[0, 65535]`
    #[error("PCP port {0} is out of range")]
    PortOutOfRange(i32),

    /// Negative timeout
    #[error("timeout {0} is out of range")]
    TimeoutOutOfRange(i32),

    /// No user given
    #[error("no user given")]
    MissingUser,

    /// No password given
    #[error("no password given")]
    MissingPassword,

    /// Named endpoint not present in the directory
    #[error("no PCP endpoint named {0:?}")]
    EndpointNotFound(String),

    /// No credential mapping for the caller against the endpoint
    #[error("no credential mapping for {caller:?} on endpoint {endpoint:?}")]
    NoCredentialMapping {
        /// Caller identity used for the lookup
        caller: String,
        /// Endpoint name
        endpoint: String,
    },

    /// Could not open a PCP session (TCP or authentication failure)
    #[error("cannot connect to PCP server")]
    ConnectionFailed(#[source] WireError),

    /// Node info request failed after the session was opened
    #[error("cannot get node information")]
    NodeInfoUnavailable(#[source] WireError),

    /// Pool status request failed after the session was opened
    #[error("cannot get pool status")]
    PoolStatusUnavailable(#[source] WireError),

    /// Node count request failed after the session was opened
    #[error("cannot get node count")]
    NodeCountUnavailable(#[source] WireError),
}

impl Error {
    /// Returns true if the error was raised before any network activity.
    pub fn is_pre_network(&self) -> bool {
        !matches!(
            self,
            Error::ConnectionFailed(_)
                | Error::NodeInfoUnavailable(_)
                | Error::PoolStatusUnavailable(_)
                | Error::NodeCountUnavailable(_)
        )
    }
}
