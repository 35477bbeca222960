use std::net::SocketAddr;
use std::time::Duration;

use kube_probes::app;
use kube_probes::clock::ProcessClock;
use kube_probes::probe::{Probe, ProbeEndpoint};
use kube_probes::Server;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

struct Reply {
    status: u16,
    headers: String,
    body: String,
}

async fn spawn(probe: Probe) -> (SocketAddr, JoinHandle<()>) {
    let server = Server::bind("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr().unwrap();
    let router = app::router(ProbeEndpoint::new(probe, ProcessClock::start()));
    let task = tokio::spawn(async move {
        let _ = server.serve(router).await;
    });
    (addr, task)
}

async fn request(addr: SocketAddr, method: &str, path: &str) -> Reply {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let head = format!("{method} {path} HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n");
    stream.write_all(head.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8(raw).unwrap();

    let (headers, body) = raw.split_once("\r\n\r\n").unwrap();
    let status = headers
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .unwrap();
    Reply { status, headers: headers.to_ascii_lowercase(), body: body.to_owned() }
}

#[tokio::test]
async fn liveness_service_while_warm() {
    let (addr, task) = spawn(Probe::LIVENESS).await;

    let health = request(addr, "GET", "/health").await;
    assert_eq!((health.status, health.body.as_str()), (200, "OK"));
    assert!(health.headers.contains("content-type: text/plain; charset=utf-8"));

    let home = request(addr, "GET", "/").await;
    assert_eq!((home.status, home.body.as_str()), (200, "App is running"));

    task.abort();
}

#[tokio::test]
async fn readiness_service_while_warm() {
    let (addr, task) = spawn(Probe::READINESS).await;

    let ready = request(addr, "GET", "/ready").await;
    assert_eq!((ready.status, ready.body.as_str()), (200, "READY"));

    let home = request(addr, "GET", "/").await;
    assert_eq!((home.status, home.body.as_str()), (200, "App is running"));

    task.abort();
}

#[tokio::test]
async fn cold_services_fail_their_probe_but_keep_serving_home() {
    let (live, live_task) = spawn(Probe::LIVENESS.with_threshold(Duration::ZERO)).await;
    let (ready, ready_task) = spawn(Probe::READINESS.with_threshold(Duration::ZERO)).await;
    tokio::time::sleep(Duration::from_millis(10)).await;

    let health = request(live, "GET", "/health").await;
    assert_eq!((health.status, health.body.as_str()), (500, "UNHEALTHY"));

    let not_ready = request(ready, "GET", "/ready").await;
    assert_eq!((not_ready.status, not_ready.body.as_str()), (503, "NOT READY"));

    for addr in [live, ready] {
        let home = request(addr, "GET", "/").await;
        assert_eq!((home.status, home.body.as_str()), (200, "App is running"));
    }

    live_task.abort();
    ready_task.abort();
}

#[tokio::test]
async fn cold_stays_cold() {
    let (addr, task) = spawn(Probe::READINESS.with_threshold(Duration::from_millis(50))).await;

    let mut seen_cold = false;
    for _ in 0..10 {
        let reply = request(addr, "GET", "/ready").await;
        match reply.status {
            503 => seen_cold = true,
            200 => assert!(!seen_cold, "ready again after going cold"),
            other => panic!("unexpected status {other}"),
        }
        tokio::time::sleep(Duration::from_millis(15)).await;
    }
    assert!(seen_cold);

    task.abort();
}

#[tokio::test]
async fn unknown_paths_and_methods() {
    let (addr, task) = spawn(Probe::LIVENESS).await;

    assert_eq!(request(addr, "GET", "/ready").await.status, 404);
    assert_eq!(request(addr, "GET", "/health/").await.status, 404);

    let post = request(addr, "POST", "/health").await;
    assert_eq!(post.status, 405);
    assert!(post.headers.contains("allow: get, head, options"));

    let head = request(addr, "HEAD", "/health").await;
    assert_eq!(head.status, 200);
    assert!(head.body.is_empty());

    task.abort();
}
