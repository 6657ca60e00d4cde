//! Common PCP protocol types.

use crate::error::{WireError, WireResult};

/// Backend slot identifier. Valid ids are `0..MAX_BACKENDS`.
pub type NodeId = i32;

/// Maximum number of backends a pool can manage (pgpool's `MAX_NUM_BACKENDS`).
pub const MAX_BACKENDS: i32 = 128;

/// Scale the raw protocol weight is expressed in.
///
/// The pool reports weights scaled by the `RAND_MAX` of the client toolchain
/// that built the request (2^31 - 1). The constant is fixed by the wire
/// protocol and must not be re-derived locally.
pub const WEIGHT_SCALE: f64 = 2_147_483_647.0;

/// Status of a backend slot, mirrored 1:1 from the wire status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BackendStatus {
    /// Connection unused
    Unused = 0,
    /// Waiting for connection to start
    ConnectWait = 1,
    /// Connection in use
    Up = 2,
    /// Disconnected
    Down = 3,
}

impl BackendStatus {
    /// Decode a wire status code. Unknown codes are a decode error,
    /// never mapped to a default.
    pub fn from_code(code: i32) -> WireResult<Self> {
        match code {
            0 => Ok(BackendStatus::Unused),
            1 => Ok(BackendStatus::ConnectWait),
            2 => Ok(BackendStatus::Up),
            3 => Ok(BackendStatus::Down),
            _ => Err(WireError::Protocol(format!(
                "unknown backend status code: {code}"
            ))),
        }
    }

    /// Fixed human-readable label for this status.
    pub fn label(self) -> &'static str {
        match self {
            BackendStatus::Unused => "Connection unused",
            BackendStatus::ConnectWait => "Waiting for connection to start",
            BackendStatus::Up => "Connection in use",
            BackendStatus::Down => "Disconnected",
        }
    }
}

/// One backend slot as reported by a node info reply.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendInfo {
    /// Backend hostname
    pub hostname: String,
    /// Backend port
    pub port: u16,
    /// Slot status
    pub status: BackendStatus,
    /// Raw load-balancing weight, scaled by [`WEIGHT_SCALE`]
    pub weight: f64,
}

/// One configuration row from a pool status reply.
///
/// Rows arrive in server-defined order and are never reordered here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigItem {
    /// Parameter name
    pub name: String,
    /// Current value
    pub value: String,
    /// Server-provided description
    pub description: String,
}
