//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use visit_locator::config::ServiceConfig;
use visit_locator::http::HttpServer;
use visit_locator::lifecycle::Shutdown;

/// Request paths seen by a mock upstream, in arrival order.
pub type SeenPaths = Arc<Mutex<Vec<String>>>;

/// Start a programmable mock geolocation API on an ephemeral port.
///
/// `f` receives the request path and returns the status and body to send.
#[allow(dead_code)]
pub async fn start_mock_upstream<F, Fut>(f: F) -> (SocketAddr, SeenPaths)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen: SeenPaths = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let seen_by_server = seen.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    let seen = seen_by_server.clone();
                    tokio::spawn(async move {
                        let (read_half, mut write_half) = socket.into_split();
                        let mut reader = BufReader::new(read_half);

                        let mut request_line = String::new();
                        if reader.read_line(&mut request_line).await.is_err() {
                            return;
                        }
                        let path = request_line
                            .split_whitespace()
                            .nth(1)
                            .unwrap_or_default()
                            .to_string();

                        // Drain the header block.
                        loop {
                            let mut line = String::new();
                            match reader.read_line(&mut line).await {
                                Ok(0) | Err(_) => break,
                                Ok(_) if line == "\r\n" => break,
                                Ok(_) => {}
                            }
                        }

                        seen.lock().unwrap().push(path.clone());
                        let (status, body) = f(path).await;

                        let response = format!(
                            "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            body.len(),
                            body
                        );
                        let _ = write_half.write_all(response.as_bytes()).await;
                        let _ = write_half.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, seen)
}

/// Mock upstream that always answers with the same status and body.
#[allow(dead_code)]
pub async fn start_fixed_upstream(status: u16, body: &'static str) -> (SocketAddr, SeenPaths) {
    start_mock_upstream(move |_| async move { (status, body.to_string()) }).await
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Default config pointed at `upstream` with an ephemeral bind address.
#[allow(dead_code)]
pub fn config_for(upstream: SocketAddr) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.geolocation.base_url = format!("http://{}/json", upstream);
    config.geolocation.timeout_secs = Some(5);
    config
}

/// Run the local server in the background; returns its address.
#[allow(dead_code)]
pub async fn start_service(config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// Client that never goes through an environment proxy.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
