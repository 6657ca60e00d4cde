//! Synchronous TCP implementation of the PCP wire client.

use std::io::{BufReader, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::error::{WireError, WireResult};
use crate::params::ConnectionParams;
use crate::protocol::backend::{self, PoolStatusChunk};
use crate::protocol::frontend;
use crate::protocol::types::{BackendInfo, ConfigItem, NodeId};

use super::{Connector, PcpSession};

/// Connector producing real TCP sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Session = Conn;

    fn connect(&mut self, params: &ConnectionParams) -> WireResult<Conn> {
        Conn::connect(params)
    }
}

/// One synchronous PCP session over TCP.
///
/// Created authenticated; issues one request at a time; sends the terminate
/// frame when dropped.
pub struct Conn {
    stream: BufReader<TcpStream>,
    read_buffer: Vec<u8>,
    write_buffer: Vec<u8>,
}

impl Conn {
    /// Connect and authenticate.
    ///
    /// The timeout from `params` is applied to this session's socket only
    /// (read and write); `0` leaves the socket blocking indefinitely.
    pub fn connect(params: &ConnectionParams) -> WireResult<Self> {
        tracing::debug!(host = %params.host, port = params.port, "connecting to PCP server");

        let tcp = TcpStream::connect((params.host.as_str(), params.port))?;
        tcp.set_nodelay(true)?;

        let timeout = if params.timeout > 0 {
            Some(Duration::from_secs(params.timeout as u64))
        } else {
            None
        };
        tcp.set_read_timeout(timeout)?;
        tcp.set_write_timeout(timeout)?;

        let mut conn = Self {
            stream: BufReader::new(tcp),
            read_buffer: Vec::with_capacity(512),
            write_buffer: Vec::with_capacity(128),
        };
        conn.authorize(&params.user, &params.pass)?;
        Ok(conn)
    }

    /// Run the md5 challenge-response handshake.
    fn authorize(&mut self, user: &str, pass: &str) -> WireResult<()> {
        self.write_buffer.clear();
        frontend::write_salt_request(&mut self.write_buffer);
        self.send()?;
        let salt = backend::parse_salt(self.expect_frame(backend::tag::SALT)?)?;

        let encrypted = frontend::encrypt_password(user, pass, &salt);
        self.write_buffer.clear();
        frontend::write_authenticate(&mut self.write_buffer, user, &encrypted);
        self.send()?;
        backend::parse_auth_result(self.expect_frame(backend::tag::AUTH_RESULT)?)
    }

    fn send(&mut self) -> WireResult<()> {
        let stream = self.stream.get_mut();
        stream.write_all(&self.write_buffer)?;
        stream.flush()?;
        Ok(())
    }

    /// Read one frame into the read buffer and return the tag byte.
    fn read_frame(&mut self) -> WireResult<u8> {
        let mut tag = [0u8; 1];
        self.stream.read_exact(&mut tag)?;

        let mut length_bytes = [0u8; 4];
        self.stream.read_exact(&mut length_bytes)?;
        let length = i32::from_be_bytes(length_bytes);
        if length < 4 {
            return Err(WireError::Protocol(format!(
                "invalid frame length: {length}"
            )));
        }

        let payload_len = (length - 4) as usize;
        self.read_buffer.clear();
        self.read_buffer.resize(payload_len, 0);
        self.stream.read_exact(&mut self.read_buffer)?;

        Ok(tag[0])
    }

    /// Read one frame, require a specific tag and return its payload.
    /// A server error frame becomes `WireError::Server`.
    fn expect_frame(&mut self, want: u8) -> WireResult<&[u8]> {
        let tag = self.read_frame()?;
        if tag == backend::tag::ERROR {
            return Err(backend::parse_error(&self.read_buffer));
        }
        if tag != want {
            return Err(WireError::Protocol(format!(
                "expected frame '{}', got '{}'",
                want as char, tag as char
            )));
        }
        Ok(&self.read_buffer)
    }
}

impl PcpSession for Conn {
    fn node_info(&mut self, node_id: NodeId) -> WireResult<BackendInfo> {
        self.write_buffer.clear();
        frontend::write_node_info(&mut self.write_buffer, node_id);
        self.send()?;
        backend::parse_node_info(self.expect_frame(backend::tag::NODE_INFO)?)
    }

    fn pool_status(&mut self) -> WireResult<Vec<ConfigItem>> {
        self.write_buffer.clear();
        frontend::write_pool_status(&mut self.write_buffer);
        self.send()?;

        let mut rows: Vec<ConfigItem> = Vec::new();
        let mut announced: Option<i32> = None;
        loop {
            let chunk = PoolStatusChunk::parse(self.expect_frame(backend::tag::POOL_STATUS)?)?;
            match chunk {
                PoolStatusChunk::ArraySize(n) => {
                    if n < 0 {
                        return Err(WireError::Protocol(format!(
                            "pool status: negative array size {n}"
                        )));
                    }
                    rows.reserve(n as usize);
                    announced = Some(n);
                }
                PoolStatusChunk::ProcessConfig {
                    name,
                    value,
                    description,
                } => rows.push(ConfigItem {
                    name,
                    value,
                    description,
                }),
                PoolStatusChunk::Complete => break,
            }
        }

        if let Some(n) = announced
            && n as usize != rows.len()
        {
            return Err(WireError::Protocol(format!(
                "pool status: announced {n} rows, received {}",
                rows.len()
            )));
        }
        Ok(rows)
    }

    fn node_count(&mut self) -> WireResult<i32> {
        self.write_buffer.clear();
        frontend::write_node_count(&mut self.write_buffer);
        self.send()?;
        backend::parse_node_count(self.expect_frame(backend::tag::NODE_COUNT)?)
    }
}

impl Drop for Conn {
    fn drop(&mut self) {
        // Best effort: the session may already be dead.
        self.write_buffer.clear();
        frontend::write_terminate(&mut self.write_buffer);
        let stream = self.stream.get_mut();
        let _ = stream.write_all(&self.write_buffer);
        let _ = stream.flush();
    }
}
