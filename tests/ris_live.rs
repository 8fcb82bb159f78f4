//! Integration tests running whole sessions against fixture files and a loopback HTTP server.
use bgpkit_rislive::*;
use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread;

fn testdata(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/testdata")
        .join(name)
        .to_string_lossy()
        .to_string()
}

/// Serve one HTTP response on a loopback port; the thread returns the request head it received.
fn serve_once(status: &'static str, body: String) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut request = String::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            request.push_str(&line);
        }
        write!(
            stream,
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n{}",
            status, body
        )
        .unwrap();
        request
    });
    (format!("http://{}/v1/stream/?format=json", addr), handle)
}

fn run(config: RisLiveConfig) -> (Result<usize, RisLiveError>, ListenerState, Vec<RisLiveMessage>) {
    let (mut ris_live, receiver) = RisLive::new(config);
    let result = ris_live.listen();
    let state = ris_live.state();
    drop(ris_live);
    (result, state, receiver.iter().collect())
}

fn expected_first_msg() -> RisLiveMessage {
    RisLiveMessage {
        msg_type: "ris_message".to_string(),
        data: Some(RisMessageData {
            timestamp: 1558620047.08,
            peer: "196.60.9.165".to_string(),
            peer_asn: "57695".to_string(),
            id: "196.60.9.165-1558620047.08-11924763".to_string(),
            host: "rrc19".to_string(),
            msg_type: "UPDATE".to_string(),
            path: vec![json!(57695), json!(37650)],
            digested_path: vec![57695, 37650],
            community: vec![(57695, 12000), (57695, 12001)],
            origin: "igp".to_string(),
            announcements: vec![Announcement {
                next_hop: "196.60.9.165".to_string(),
                prefixes: vec!["196.50.70.0/24".to_string()],
            }],
            raw: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF003E02000000234001010040020A02020000E15F00009312400304C43C09A5E00808E15F2EE0E15F2EE118C43246".to_string(),
            ..Default::default()
        }),
    }
}

#[test]
fn read_one_message_from_file() {
    let config = RisLiveConfig::default().with_file(&testdata("1-msg")).with_buffer(10);
    let (result, state, msgs) = run(config);
    assert_eq!(result.unwrap(), 1);
    assert_eq!(state, ListenerState::Closed);
    assert_eq!(msgs, vec![expected_first_msg()]);
}

#[test]
fn read_sixth_of_ten_messages() {
    let config = RisLiveConfig::default().with_file(&testdata("10-msg")).with_buffer(10);
    let (result, _, msgs) = run(config);
    assert_eq!(result.unwrap(), 10);
    assert_eq!(msgs.len(), 10);

    let sixth = msgs[5].data.as_ref().unwrap();
    assert_eq!(sixth.id, "2001:7f8:d:ff::226-1558620047.06-51675230");
    assert_eq!(sixth.digested_path, vec![24482, 6453, 174, 513, 513, 12654]);
    assert_eq!(sixth.community.len(), 12);
    assert_eq!(sixth.announcements.len(), 2);
    assert_eq!(sixth.announcements[1].next_hop, "fe80::2a0:a500:0:3e6");
    assert!(sixth.raw.starts_with("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00AD"));
    assert!(sixth.raw.ends_with("0030200107FBFE04"));

    // input order is kept and every path is digested
    let timestamps = msgs
        .iter()
        .map(|m| m.data.as_ref().unwrap().timestamp)
        .collect::<Vec<_>>();
    assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
    assert!(msgs.iter().all(|m| !m.data.as_ref().unwrap().digested_path.is_empty()));
}

#[test]
fn read_as_set_path() {
    let config = RisLiveConfig::default().with_file(&testdata("fail-as-set"));
    let (result, _, msgs) = run(config);
    assert_eq!(result.unwrap(), 1);
    let data = msgs[0].data.as_ref().unwrap();
    assert_eq!(data.path[4], json!([13340]));
    assert_eq!(data.digested_path, vec![2497, 6453, 18705, 26281, 13340]);
    assert!(data.community.is_empty());
}

#[test]
fn stop_at_word_path() {
    let config = RisLiveConfig::default().with_file(&testdata("word-path")).with_buffer(10);
    let (result, state, msgs) = run(config);
    assert!(matches!(result, Err(RisLiveError::Digest(_))));
    assert_eq!(state, ListenerState::Failed);
    assert_eq!(msgs.len(), 2);
}

#[test]
fn filter_ten_messages() {
    let filter = FilterConfig::default().add_filter("as_path", "6453,174").unwrap();
    let config = RisLiveConfig::default()
        .with_file(&testdata("10-msg"))
        .with_filter(filter);
    let (_, _, msgs) = run(config);
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].data.as_ref().unwrap().peer_asn, "24482");

    let filter = FilterConfig::default()
        .add_filter("prefix", "2000::/3")
        .unwrap()
        .add_filter("origin", "igp")
        .unwrap();
    let config = RisLiveConfig::default()
        .with_file(&testdata("10-msg"))
        .with_filter(filter);
    let (_, _, msgs) = run(config);
    let hosts = msgs
        .iter()
        .map(|m| m.data.as_ref().unwrap().host.as_str())
        .collect::<Vec<_>>();
    assert_eq!(hosts, vec!["rrc04", "rrc07"]);

    let filter = FilterConfig::default().add_filter("invalid_transit_as", "3356").unwrap();
    let config = RisLiveConfig::default()
        .with_file(&testdata("10-msg"))
        .with_filter(filter);
    let (_, _, msgs) = run(config);
    let peers = msgs
        .iter()
        .map(|m| m.data.as_ref().unwrap().peer_asn.as_str())
        .collect::<Vec<_>>();
    assert_eq!(peers, vec!["34549", "6762"]);
}

#[test]
fn read_gzip_capture() {
    let content = std::fs::read(testdata("10-msg")).unwrap();
    let file = tempfile::Builder::new().suffix(".gz").tempfile().unwrap();
    let mut encoder = flate2::write::GzEncoder::new(file.as_file(), flate2::Compression::default());
    encoder.write_all(&content).unwrap();
    encoder.finish().unwrap();

    let config = RisLiveConfig::default().with_file(file.path().to_str().unwrap());
    let (result, _, msgs) = run(config);
    assert_eq!(result.unwrap(), 10);
    assert_eq!(msgs.len(), 10);
}

#[test]
fn missing_file_is_an_empty_feed() {
    let config = RisLiveConfig::default().with_file(&testdata("does-not-exist"));
    let (result, state, msgs) = run(config);
    assert_eq!(result.unwrap(), 0);
    assert_eq!(state, ListenerState::Closed);
    assert!(msgs.is_empty());
}

#[test]
fn read_one_message_over_http() {
    let body = std::fs::read_to_string(testdata("1-msg")).unwrap();
    let (url, server) = serve_once("200 OK", body);

    let config = RisLiveConfig::default()
        .with_url(&url)
        .with_client("rislive-test-client")
        .with_buffer(10);
    let (result, state, msgs) = run(config);
    assert_eq!(result.unwrap(), 1);
    assert_eq!(state, ListenerState::Closed);
    assert_eq!(msgs, vec![expected_first_msg()]);

    let request = server.join().unwrap().to_lowercase();
    assert!(request.starts_with("get /v1/stream/?format=json"));
    assert!(request.contains("user-agent: rislive-test-client"));
}

#[test]
fn read_ten_messages_over_http() {
    let body = std::fs::read_to_string(testdata("10-msg")).unwrap();
    let (url, server) = serve_once("200 OK", body);

    let (ris_live, receiver) = RisLive::new(RisLiveConfig::default().with_url(&url).with_buffer(1));
    let handle = ris_live.spawn().unwrap();
    let msgs = receiver.iter().collect::<Vec<_>>();
    assert_eq!(handle.join().unwrap().unwrap(), 10);
    assert_eq!(msgs.len(), 10);
    assert_eq!(
        msgs[5].data.as_ref().unwrap().digested_path,
        vec![24482, 6453, 174, 513, 513, 12654]
    );
    server.join().unwrap();
}

#[test]
fn http_error_status_is_an_empty_feed() {
    let (url, server) = serve_once("500 Internal Server Error", String::new());
    let (result, state, msgs) = run(RisLiveConfig::default().with_url(&url));
    assert_eq!(result.unwrap(), 0);
    assert_eq!(state, ListenerState::Closed);
    assert!(msgs.is_empty());
    server.join().unwrap();
}

#[test]
fn connection_failure_is_an_empty_feed() {
    // grab a free port and release it so nothing is listening there
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = RisLiveConfig::default().with_url(&format!("http://127.0.0.1:{}/", port));
    let (result, state, msgs) = run(config);
    assert_eq!(result.unwrap(), 0);
    assert_eq!(state, ListenerState::Closed);
    assert!(msgs.is_empty());
}
