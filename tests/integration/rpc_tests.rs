//! RPC round trips over real loopback TCP.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;

use breadoven::config::OvenConfig;
use breadoven::error::Error;
use breadoven::fsm::Phase;
use breadoven::oven::Oven;
use breadoven::rpc::client::OvenClient;
use breadoven::rpc::codec::{FrameDecoder, encode_frame};
use breadoven::rpc::messages::{self, Call, ErrorCode, Reply, Request, Response, UNKNOWN_REQUEST_ID};
use breadoven::rpc::server::RpcServer;

use crate::mock_clock::{RecordingClock, RecordingSink};
use crate::mock_transport::LoopbackTransport;

fn make_oven() -> Oven {
    Oven::new(
        OvenConfig::default(),
        Arc::new(RecordingClock::new()),
        Box::new(RecordingSink::new()),
    )
}

/// Start a server on an ephemeral port; the accept thread is left running.
fn start_server(oven: Oven) -> SocketAddr {
    let server = RpcServer::bind("127.0.0.1:0", oven).unwrap();
    let addr = server.local_addr().unwrap();
    thread::spawn(move || server.serve());
    addr
}

fn read_response(stream: &mut TcpStream) -> Response {
    let mut decoder = FrameDecoder::new();
    let mut buf = [0u8; 256];
    loop {
        let n = stream.read(&mut buf).unwrap();
        assert!(n > 0, "server closed the connection");
        let mut got = None;
        decoder.feed(&buf[..n], |p| got = Some(messages::decode::<Response>(p).unwrap()));
        if let Some(response) = got {
            return response;
        }
    }
}

#[test]
fn client_drives_a_full_cycle_over_tcp() {
    let oven = make_oven();
    let addr = start_server(oven.clone());
    let mut client = OvenClient::connect(addr).unwrap();

    assert_eq!(client.get_oven_state().unwrap(), Phase::Loading);
    assert!(!client.heat(2).unwrap());
    assert!(client.load(30).unwrap());
    assert!(client.load(20).unwrap());

    oven.tick();
    assert_eq!(client.get_oven_state().unwrap(), Phase::Heating);
    assert!(!client.load(1).unwrap());
    assert!(client.heat(4).unwrap());

    let snap = client.snapshot().unwrap();
    assert_eq!(snap.phase, Phase::Heating);
    assert_eq!(snap.item_count, 50);
    assert_eq!(snap.temperature, 4);
    assert_eq!(snap, oven.snapshot());
}

#[test]
fn two_clients_share_one_oven() {
    let oven = make_oven();
    let addr = start_server(oven);
    let mut a = OvenClient::connect(addr).unwrap();
    let mut b = OvenClient::connect(addr).unwrap();

    assert!(a.load(25).unwrap());
    assert!(b.load(25).unwrap());
    assert_eq!(a.snapshot().unwrap().item_count, 50);
}

#[test]
fn malformed_request_gets_error_and_connection_survives() {
    let addr = start_server(make_oven());
    let mut stream = TcpStream::connect(addr).unwrap();

    let mut wire = Vec::new();
    encode_frame(&[0xff; 6], &mut wire).unwrap();
    stream.write_all(&wire).unwrap();
    let response = read_response(&mut stream);
    assert_eq!(response.id, UNKNOWN_REQUEST_ID);
    assert_eq!(response.reply, Reply::Error(ErrorCode::Malformed));

    let payload = messages::encode(&Request {
        id: 9,
        call: Call::GetOvenState,
    })
    .unwrap();
    let mut wire = Vec::new();
    encode_frame(&payload, &mut wire).unwrap();
    stream.write_all(&wire).unwrap();
    let response = read_response(&mut stream);
    assert_eq!(response.id, 9);
    assert_eq!(response.reply, Reply::State(Phase::Loading));
}

#[test]
fn oversized_header_is_skipped() {
    let addr = start_server(make_oven());
    let mut stream = TcpStream::connect(addr).unwrap();

    let payload = messages::encode(&Request { id: 3, call: Call::Load(5) }).unwrap();
    let mut wire = 10_000u32.to_le_bytes().to_vec();
    encode_frame(&payload, &mut wire).unwrap();
    stream.write_all(&wire).unwrap();

    let response = read_response(&mut stream);
    assert_eq!(response.id, 3);
    assert_eq!(response.reply, Reply::Accepted(true));
}

#[test]
fn client_reports_closed_peer() {
    let oven = make_oven();
    let mut client = OvenClient::new(LoopbackTransport::failing_after(oven, 1));
    assert_eq!(client.get_oven_state().unwrap(), Phase::Loading);
    assert!(matches!(client.load(1), Err(Error::Io(_))));
}

#[test]
fn loopback_transport_round_trips() {
    let oven = make_oven();
    let mut client = OvenClient::new(LoopbackTransport::new(oven.clone()));
    assert!(client.load(50).unwrap());
    oven.tick();
    assert_eq!(client.get_oven_state().unwrap(), Phase::Heating);
    assert!(matches!(
        client.snapshot(),
        Ok(s) if s.item_count == 50
    ));
}
