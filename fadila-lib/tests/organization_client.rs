//! OrganizationClient against a one-shot local HTTP server.

use fadila_lib::OrganizationClient;
use fadila_lib::error::ApiError;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

/// Serves a single response and returns the request line it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let n = socket.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).to_string();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request.lines().next().unwrap_or_default().to_string()
    });

    (base, handle)
}

#[tokio::test]
async fn test_fetch_success() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"success":true,"data":[{"id":"cp-a","level":"CP","students":24},{"id":"cp-b","level":"CP","students":22}]}"#,
    )
    .await;

    let client = OrganizationClient::new(&base).unwrap();
    let records = client.fetch_organization().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("students").unwrap().to_string(), "24");
    assert_eq!(
        server.await.unwrap(),
        "GET /api/students/organization HTTP/1.1"
    );
}

#[tokio::test]
async fn test_fetch_remote_failure() {
    let (base, _server) =
        serve_once("200 OK", r#"{"success":false,"error":"base indisponible"}"#).await;

    let client = OrganizationClient::new(&base).unwrap();
    let err = client.fetch_organization().await.unwrap_err();

    assert!(matches!(err, ApiError::Remote(ref m) if m == "base indisponible"));
}

#[tokio::test]
async fn test_fetch_http_error() {
    let (base, _server) = serve_once("503 Service Unavailable", r#"{"success":false}"#).await;

    let client = OrganizationClient::new(&base).unwrap();
    let err = client.fetch_organization().await.unwrap_err();

    assert_eq!(err.status_code(), Some(503));
}

#[tokio::test]
async fn test_fetch_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = OrganizationClient::new(&base).unwrap();
    let err = client.fetch_organization().await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}
