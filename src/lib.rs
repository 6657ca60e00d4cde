//! A synchronous client for the pgpool-II PCP administrative protocol.
//!
//! # Features
//!
//! - **One session per request**: connect, authenticate, issue one request,
//!   decode, disconnect — teardown is guaranteed on every exit path
//! - **Two target shapes**: explicit host/port/credentials, or a named
//!   endpoint resolved through a pluggable directory catalog
//! - **Three operations**: per-backend node info, full pool configuration,
//!   backend count
//! - **Testable wire seam**: the adapter is generic over the wire client
//!
//! # Example
//!
//! ```no_run
//! use pcp_admin::{Admin, StaticDirectory, Target, TcpConnector};
//!
//! fn main() -> pcp_admin::error::Result<()> {
//!     let mut dir = StaticDirectory::new();
//!     dir.add_endpoint("prod", [("host", "10.0.0.1"), ("port", "9898"), ("timeout", "10")]);
//!     dir.add_mapping("alice", "prod", [("user", "admin"), ("password", "secret")]);
//!
//!     let mut admin = Admin::new(TcpConnector, dir, "alice");
//!
//!     let target = Target::Named { name: "prod".into() };
//!     println!("backends: {}", admin.node_count(&target)?);
//!
//!     for row in admin.pool_status(&target)? {
//!         println!("{} = {}", row.name, row.value);
//!     }
//!     Ok(())
//! }
//! ```

pub mod directory;
pub mod error;
pub mod params;
pub mod protocol;
pub mod report;
pub mod session;
pub mod wire;

pub use directory::{Directory, EndpointDef, StaticDirectory, UserMapping};
pub use error::{Error, Result, WireError};
pub use params::{ConnectionParams, DEFAULT_PORT, Target};
pub use protocol::types::{
    BackendInfo, BackendStatus, ConfigItem, MAX_BACKENDS, NodeId, WEIGHT_SCALE,
};
pub use report::{ConfigRows, NodeInfoRow};
pub use session::Admin;
pub use wire::{Conn, Connector, PcpSession, TcpConnector};
