//! PCP wire frame encoding and decoding primitives.
//!
//! PCP frames share the PostgreSQL framing: a 1-byte tag, a 4-byte
//! big-endian length that includes itself, and the payload. All integers on
//! the wire are big-endian.

use crate::error::{WireError, WireResult};

/// Read fixed-length bytes.
#[inline]
pub fn read_bytes(data: &[u8], len: usize) -> WireResult<(&[u8], &[u8])> {
    if data.len() < len {
        return Err(WireError::Protocol(format!(
            "read_bytes: buffer too short: {} < {}",
            data.len(),
            len
        )));
    }
    Ok((&data[..len], &data[len..]))
}

/// Read a null-terminated string.
/// Returns the string bytes (without the null terminator) and remaining data.
#[inline]
pub fn read_cstring(data: &[u8]) -> WireResult<(&[u8], &[u8])> {
    match memchr::memchr(0, data) {
        Some(pos) => Ok((&data[..pos], &data[pos + 1..])),
        None => Err(WireError::Protocol(
            "read_cstring: no null terminator found".into(),
        )),
    }
}

/// Read a null-terminated string as `&str`.
#[inline]
pub fn read_cstr(data: &[u8]) -> WireResult<(&str, &[u8])> {
    let (bytes, rest) = read_cstring(data)?;
    let s = std::str::from_utf8(bytes)
        .map_err(|e| WireError::Protocol(format!("read_cstr: invalid UTF-8: {e}")))?;
    Ok((s, rest))
}

/// Write a null-terminated string.
#[inline]
pub fn write_cstr(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(s.as_bytes());
    out.push(0);
}

/// Frame builder that handles the length field.
///
/// PCP frame format:
/// - Tag byte (1 byte) - NOT included in length
/// - Length (4 bytes) - includes itself
/// - Payload (Length - 4 bytes)
pub struct FrameBuilder<'a> {
    buf: &'a mut Vec<u8>,
    start: usize,
}

impl<'a> FrameBuilder<'a> {
    /// Start building a frame with a tag byte.
    pub fn new(buf: &'a mut Vec<u8>, tag: u8) -> Self {
        buf.push(tag);
        let start = buf.len();
        buf.extend_from_slice(&[0, 0, 0, 0]); // Placeholder for length
        Self { buf, start }
    }

    /// Write raw bytes.
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Write a null-terminated string.
    pub fn write_cstr(&mut self, s: &str) {
        write_cstr(self.buf, s);
    }

    /// Finish building the frame and fill in the length field.
    pub fn finish(self) {
        let len = (self.buf.len() - self.start) as i32;
        self.buf[self.start..self.start + 4].copy_from_slice(&len.to_be_bytes());
    }
}
