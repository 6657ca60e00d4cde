//! PCP server → client frames (parsing).
//!
//! Reply payloads are short null-terminated text fields. Each parser takes
//! the payload of one frame (after the tag and length) and validates it
//! fully; anything unexpected is a protocol error.

use super::codec::{read_bytes, read_cstr};
use super::types::{BackendInfo, BackendStatus};
use crate::error::{WireError, WireResult};

/// Backend frame tag bytes.
pub mod tag {
    /// Salt reply
    pub const SALT: u8 = b'm';
    /// Authentication result
    pub const AUTH_RESULT: u8 = b'r';
    /// Node info reply
    pub const NODE_INFO: u8 = b'i';
    /// Pool status chunk
    pub const POOL_STATUS: u8 = b'b';
    /// Node count reply
    pub const NODE_COUNT: u8 = b'l';
    /// Server error
    pub const ERROR: u8 = b'e';
}

/// Result marker the server puts in front of completed replies.
const COMMAND_COMPLETE: &str = "CommandComplete";

fn expect_command_complete(payload: &[u8]) -> WireResult<&[u8]> {
    let (marker, rest) = read_cstr(payload)?;
    if marker != COMMAND_COMPLETE {
        return Err(WireError::Protocol(format!(
            "expected CommandComplete, got {marker:?}"
        )));
    }
    Ok(rest)
}

/// Parse a salt reply (`m`): exactly 4 raw bytes.
pub fn parse_salt(payload: &[u8]) -> WireResult<[u8; 4]> {
    let (bytes, rest) = read_bytes(payload, 4)?;
    if !rest.is_empty() {
        return Err(WireError::Protocol(format!(
            "salt reply has {} trailing bytes",
            rest.len()
        )));
    }
    Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Parse an authentication result (`r`). Anything but `AuthenticationOK`
/// is a rejected login.
pub fn parse_auth_result(payload: &[u8]) -> WireResult<()> {
    let (result, _) = read_cstr(payload)?;
    if result == "AuthenticationOK" {
        Ok(())
    } else {
        Err(WireError::Auth(format!(
            "server rejected authentication: {result:?}"
        )))
    }
}

/// Parse a node info reply (`i`): `CommandComplete` followed by one string
/// of four space-separated fields: hostname, port, status code, weight.
pub fn parse_node_info(payload: &[u8]) -> WireResult<BackendInfo> {
    let rest = expect_command_complete(payload)?;
    let (fields, _) = read_cstr(rest)?;

    let mut it = fields.split_ascii_whitespace();
    let hostname = it
        .next()
        .ok_or_else(|| WireError::Protocol("node info reply: missing hostname".into()))?;
    let port = it
        .next()
        .and_then(|s| s.parse::<u16>().ok())
        .ok_or_else(|| WireError::Protocol("node info reply: bad port".into()))?;
    let status_code = it
        .next()
        .and_then(|s| s.parse::<i32>().ok())
        .ok_or_else(|| WireError::Protocol("node info reply: bad status code".into()))?;
    let weight = it
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| WireError::Protocol("node info reply: bad weight".into()))?;

    Ok(BackendInfo {
        hostname: hostname.to_string(),
        port,
        status: BackendStatus::from_code(status_code)?,
        weight,
    })
}

/// Parse a node count reply (`l`): `CommandComplete` followed by the count.
///
/// The count is returned verbatim, including the wire's `-1` failure
/// sentinel; translating the sentinel is the caller's concern.
pub fn parse_node_count(payload: &[u8]) -> WireResult<i32> {
    let rest = expect_command_complete(payload)?;
    let (count, _) = read_cstr(rest)?;
    count
        .parse::<i32>()
        .map_err(|e| WireError::Protocol(format!("node count reply: bad count {count:?}: {e}")))
}

/// One chunk of a pool status reply (`b`).
///
/// The server streams `ArraySize`, then one `ProcessConfig` per
/// configuration row, then `CommandComplete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolStatusChunk {
    /// Number of rows that will follow
    ArraySize(i32),
    /// One configuration row: name, value, description
    ProcessConfig {
        /// Parameter name
        name: String,
        /// Current value
        value: String,
        /// Server-provided description
        description: String,
    },
    /// End of the row stream
    Complete,
}

impl PoolStatusChunk {
    /// Parse one pool status chunk payload.
    pub fn parse(payload: &[u8]) -> WireResult<Self> {
        let (kind, rest) = read_cstr(payload)?;
        match kind {
            "ArraySize" => {
                let (n, _) = read_cstr(rest)?;
                let n = n.parse::<i32>().map_err(|e| {
                    WireError::Protocol(format!("pool status: bad array size {n:?}: {e}"))
                })?;
                Ok(PoolStatusChunk::ArraySize(n))
            }
            "ProcessConfig" => {
                let (name, rest) = read_cstr(rest)?;
                let (value, rest) = read_cstr(rest)?;
                let (description, _) = read_cstr(rest)?;
                Ok(PoolStatusChunk::ProcessConfig {
                    name: name.to_string(),
                    value: value.to_string(),
                    description: description.to_string(),
                })
            }
            COMMAND_COMPLETE => Ok(PoolStatusChunk::Complete),
            _ => Err(WireError::Protocol(format!(
                "pool status: unknown chunk kind {kind:?}"
            ))),
        }
    }
}

/// Parse a server error frame (`e`).
pub fn parse_error(payload: &[u8]) -> WireError {
    match read_cstr(payload) {
        Ok((message, _)) => WireError::Server(message.to_string()),
        Err(_) => WireError::Server(String::from_utf8_lossy(payload).into_owned()),
    }
}
