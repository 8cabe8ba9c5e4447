//! End-to-end test over real TCP connections.
//!
//! # Design
//! Starts a throwaway connection handler on a random port that buffers each
//! request, hands it to the codec, and writes the serialized response back.
//! Requests come from ureq, so the codec is checked against an independent
//! HTTP/1.1 client implementation. One case uses a raw socket to send a
//! request line no real client would produce.

use std::io::{Read, Write};
use std::net::SocketAddr;

use httpcodec_core::{factory, parse_request_bytes, Method, Request, Response, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing_subscriber::EnvFilter;

fn content_length(req: &Request) -> usize {
    req.headers
        .get("Content-Length")
        .or_else(|| req.headers.get("content-length"))
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn route(buffer: &[u8]) -> Response {
    let response = match parse_request_bytes(buffer) {
        Ok(req) => match (req.method, req.target.as_str()) {
            (Method::Get, "/hello") => factory::ok(Value::object([("hello", "world")])),
            (Method::Post, "/echo") => factory::created(Value::object([
                ("body", Value::from(req.body.clone())),
                ("length", Value::from(req.body.len() as i64)),
            ])),
            _ => factory::not_found(Value::Null),
        },
        Err(e) => factory::bad_request(Value::object([("error", e.to_string())])),
    };
    let length = response.body.len().to_string();
    response
        .with_header("Content-Length", length)
        .with_header("Connection", "close")
}

/// Buffer until the header block is complete and the declared body has
/// arrived, or the peer stops sending.
async fn handle(mut stream: TcpStream) -> std::io::Result<()> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
        if !buffer.windows(4).any(|w| w == b"\r\n\r\n") {
            continue;
        }
        match parse_request_bytes(&buffer) {
            Ok(req) if req.body.len() < content_length(&req) => continue,
            _ => break,
        }
    }
    stream.write_all(&route(&buffer).to_bytes()).await?;
    stream.shutdown().await
}

fn start_server() -> SocketAddr {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = TcpListener::from_std(std_listener).unwrap();
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                tokio::spawn(async move {
                    let _ = handle(stream).await;
                });
            }
        })
    });

    addr
}

fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

#[test]
fn get_returns_json_body() {
    let addr = start_server();
    let mut response = agent()
        .get(&format!("http://{addr}/hello"))
        .call()
        .expect("HTTP transport error");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    let body = response.body_mut().read_to_string().unwrap();
    assert_eq!(body, r#"{"hello":"world"}"#);
}

#[test]
fn post_body_reaches_the_parser() {
    let addr = start_server();
    let mut response = agent()
        .post(&format!("http://{addr}/echo"))
        .content_type("text/plain")
        .send("line \"one\"\nline two".as_bytes())
        .expect("HTTP transport error");

    assert_eq!(response.status().as_u16(), 201);
    let body = response.body_mut().read_to_string().unwrap();
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["body"], "line \"one\"\nline two");
    assert_eq!(json["length"], 19);
}

#[test]
fn unknown_route_is_404_with_null_body() {
    let addr = start_server();
    let mut response = agent()
        .delete(&format!("http://{addr}/missing"))
        .call()
        .expect("HTTP transport error");

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(response.body_mut().read_to_string().unwrap(), "null");
}

#[test]
fn bad_version_is_reported_as_400() {
    let addr = start_server();
    let mut stream = std::net::TcpStream::connect(addr).unwrap();
    stream.write_all(b"GET / HTTP/x.y\r\n\r\n").unwrap();

    let mut reply = String::new();
    stream.read_to_string(&mut reply).unwrap();
    assert!(
        reply.starts_with("HTTP/1.1 400 Bad Request\r\n"),
        "unexpected reply: {reply}"
    );
    let (_, body) = reply.split_once("\r\n\r\n").unwrap();
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("major"));
}
