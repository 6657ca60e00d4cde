//! PCP wire protocol implementation.
//!
//! # Structure
//!
//! - `frontend`: Client → Server frames (encoding)
//! - `backend`: Server → Client frames (parsing)
//! - `codec`: Low-level framing primitives
//! - `types`: Protocol data types (BackendStatus, BackendInfo, ConfigItem)

pub mod backend;
pub mod codec;
pub mod frontend;
pub mod types;

pub use types::{BackendInfo, BackendStatus, ConfigItem, MAX_BACKENDS, NodeId, WEIGHT_SCALE};
