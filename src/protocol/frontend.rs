//! PCP client → server frames (encoding).

use super::codec::FrameBuilder;
use super::types::NodeId;

/// Frontend frame tag bytes.
pub mod tag {
    /// Salt request (first frame after TCP connect)
    pub const SALT_REQUEST: u8 = b'M';
    /// Authenticate with user + encrypted password
    pub const AUTHENTICATE: u8 = b'R';
    /// Node info request
    pub const NODE_INFO: u8 = b'I';
    /// Pool status request
    pub const POOL_STATUS: u8 = b'B';
    /// Node count request
    pub const NODE_COUNT: u8 = b'L';
    /// Terminate the session (no reply)
    pub const TERMINATE: u8 = b'X';
}

/// Write a salt request frame. The server answers with a 4-byte salt.
pub fn write_salt_request(buf: &mut Vec<u8>) {
    let frame = FrameBuilder::new(buf, tag::SALT_REQUEST);
    frame.finish();
}

/// Write an authenticate frame: user name plus the salted password digest.
pub fn write_authenticate(buf: &mut Vec<u8>, user: &str, encrypted: &str) {
    let mut frame = FrameBuilder::new(buf, tag::AUTHENTICATE);
    frame.write_cstr(user);
    frame.write_cstr(encrypted);
    frame.finish();
}

/// Write a node info request for one backend slot.
pub fn write_node_info(buf: &mut Vec<u8>, node_id: NodeId) {
    let mut frame = FrameBuilder::new(buf, tag::NODE_INFO);
    frame.write_cstr(&node_id.to_string());
    frame.finish();
}

/// Write a pool status request.
pub fn write_pool_status(buf: &mut Vec<u8>) {
    let frame = FrameBuilder::new(buf, tag::POOL_STATUS);
    frame.finish();
}

/// Write a node count request.
pub fn write_node_count(buf: &mut Vec<u8>) {
    let frame = FrameBuilder::new(buf, tag::NODE_COUNT);
    frame.finish();
}

/// Write a terminate frame. The server closes the session without replying.
pub fn write_terminate(buf: &mut Vec<u8>) {
    let frame = FrameBuilder::new(buf, tag::TERMINATE);
    frame.finish();
}

/// Compute the PCP password digest.
///
/// PCP format: hex of `md5(md5(password + username) + salt)`, where the
/// inner digest is hex-encoded before the second hash.
pub fn encrypt_password(username: &str, password: &str, salt: &[u8; 4]) -> String {
    use md5::{Digest, Md5};

    // First hash: md5(password + username)
    let mut hasher = Md5::new();
    hasher.update(password.as_bytes());
    hasher.update(username.as_bytes());
    let first_hash = hasher.finalize();
    let first_hash_hex = format!("{:x}", first_hash);

    // Second hash: md5(first_hash_hex + salt)
    let mut hasher = Md5::new();
    hasher.update(first_hash_hex.as_bytes());
    hasher.update(salt);
    let second_hash = hasher.finalize();

    format!("{:x}", second_hash)
}
