//! End-to-end tests for the real TCP wire client against a scripted
//! in-process PCP server.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::JoinHandle;

use pcp_admin::error::Error;
use pcp_admin::protocol::frontend::encrypt_password;
use pcp_admin::{Admin, StaticDirectory, Target, TcpConnector};

const SALT: [u8; 4] = [0x11, 0x22, 0x33, 0x44];
const USER: &str = "admin";
const PASS: &str = "secret";

fn read_frame(stream: &mut TcpStream) -> Option<(u8, Vec<u8>)> {
    let mut tag = [0u8; 1];
    stream.read_exact(&mut tag).ok()?;
    let mut len = [0u8; 4];
    stream.read_exact(&mut len).ok()?;
    let len = i32::from_be_bytes(len) as usize - 4;
    let mut payload = vec![0u8; len];
    stream.read_exact(&mut payload).ok()?;
    Some((tag[0], payload))
}

fn write_frame(stream: &mut TcpStream, tag: u8, payload: &[u8]) {
    stream.write_all(&[tag]).unwrap();
    stream
        .write_all(&(payload.len() as i32 + 4).to_be_bytes())
        .unwrap();
    stream.write_all(payload).unwrap();
    stream.flush().unwrap();
}

/// Run the server side of the handshake, verifying the client's digest.
fn serve_handshake(stream: &mut TcpStream, accept: bool) {
    let (tag, _) = read_frame(stream).unwrap();
    assert_eq!(tag, b'M');
    write_frame(stream, b'm', &SALT);

    let (tag, payload) = read_frame(stream).unwrap();
    assert_eq!(tag, b'R');
    let mut fields = payload.split(|b| *b == 0);
    let user = std::str::from_utf8(fields.next().unwrap()).unwrap();
    let digest = std::str::from_utf8(fields.next().unwrap()).unwrap();
    assert_eq!(user, USER);
    assert_eq!(digest, encrypt_password(USER, PASS, &SALT));

    if accept {
        write_frame(stream, b'r', b"AuthenticationOK\0");
    } else {
        write_frame(stream, b'r', b"md5 authentication failed\0");
    }
}

/// Spawn a one-session server. `serve_request` handles frames after the
/// handshake; the thread returns whether a terminate frame arrived.
fn spawn_server(
    accept_auth: bool,
    serve_request: impl Fn(u8, &mut TcpStream) + Send + 'static,
) -> (u16, JoinHandle<bool>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        serve_handshake(&mut stream, accept_auth);
        let mut terminated = false;
        while let Some((tag, _payload)) = read_frame(&mut stream) {
            if tag == b'X' {
                terminated = true;
                break;
            }
            serve_request(tag, &mut stream);
        }
        terminated
    });
    (port, handle)
}

fn explicit_target(port: u16) -> Target {
    Target::Explicit {
        host: "127.0.0.1".into(),
        timeout: 5,
        port: i32::from(port),
        user: USER.into(),
        pass: PASS.into(),
    }
}

fn admin() -> Admin<TcpConnector, StaticDirectory> {
    Admin::new(TcpConnector, StaticDirectory::new(), "tester")
}

#[test]
fn node_count_round_trip() {
    let (port, server) = spawn_server(true, |tag, stream| {
        assert_eq!(tag, b'L');
        write_frame(stream, b'l', b"CommandComplete\03\0");
    });

    let count = admin().node_count(&explicit_target(port)).unwrap();
    assert_eq!(count, 3);
    assert!(server.join().unwrap(), "terminate frame not received");
}

#[test]
fn node_info_round_trip() {
    let (port, server) = spawn_server(true, |tag, stream| {
        assert_eq!(tag, b'I');
        write_frame(stream, b'i', b"CommandComplete\0n1 5432 2 1073741823\0");
    });

    let row = admin().node_info(&explicit_target(port), 0).unwrap();
    assert_eq!(row.hostname, "n1");
    assert_eq!(row.port, 5432);
    assert_eq!(row.status, "Connection in use");
    assert!((row.weight - 0.5).abs() < 1e-9);
    assert!(server.join().unwrap());
}

#[test]
fn pool_status_round_trip_preserves_order() {
    let (port, server) = spawn_server(true, |tag, stream| {
        assert_eq!(tag, b'B');
        write_frame(stream, b'b', b"ArraySize\02\0");
        write_frame(
            stream,
            b'b',
            b"ProcessConfig\0listen_addresses\0*\0host(s) to listen on\0",
        );
        write_frame(stream, b'b', b"ProcessConfig\0port\09999\0pgpool port\0");
        write_frame(stream, b'b', b"CommandComplete\0");
    });

    let rows: Vec<_> = admin()
        .pool_status(&explicit_target(port))
        .unwrap()
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "listen_addresses");
    assert_eq!(rows[0].value, "*");
    assert_eq!(rows[1].name, "port");
    assert_eq!(rows[1].description, "pgpool port");
    assert!(server.join().unwrap());
}

#[test]
fn pool_status_with_zero_rows() {
    let (port, server) = spawn_server(true, |tag, stream| {
        assert_eq!(tag, b'B');
        write_frame(stream, b'b', b"ArraySize\00\0");
        write_frame(stream, b'b', b"CommandComplete\0");
    });

    let rows = admin().pool_status(&explicit_target(port)).unwrap();
    assert_eq!(rows.len(), 0);
    assert!(server.join().unwrap());
}

#[test]
fn rejected_auth_is_a_connection_failure() {
    let (port, server) = spawn_server(false, |_tag, _stream| {});

    let err = admin().node_count(&explicit_target(port)).unwrap_err();
    assert!(matches!(err, Error::ConnectionFailed(_)));
    // The half-open session still says goodbye on drop.
    server.join().unwrap();
}

#[test]
fn server_error_frame_surfaces_as_request_failure() {
    let (port, server) = spawn_server(true, |tag, stream| {
        assert_eq!(tag, b'L');
        write_frame(stream, b'e', b"BackendError\0");
    });

    let err = admin().node_count(&explicit_target(port)).unwrap_err();
    assert!(matches!(err, Error::NodeCountUnavailable(_)));
    assert!(server.join().unwrap(), "terminate frame not received");
}

#[test]
fn unknown_status_code_is_a_decode_failure_with_teardown() {
    let (port, server) = spawn_server(true, |tag, stream| {
        assert_eq!(tag, b'I');
        write_frame(stream, b'i', b"CommandComplete\0n1 5432 9 0\0");
    });

    let err = admin().node_info(&explicit_target(port), 0).unwrap_err();
    assert!(matches!(err, Error::NodeInfoUnavailable(_)));
    assert!(server.join().unwrap(), "terminate frame not received");
}

#[test]
fn unreachable_server_fails_to_connect() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let err = admin().node_count(&explicit_target(port)).unwrap_err();
    assert!(matches!(&err, Error::ConnectionFailed(src) if src.is_io()));
}
