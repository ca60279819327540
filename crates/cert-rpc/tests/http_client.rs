use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use cert_rpc::{ContractClient, HttpContractClient, NetworkConfig, QueryError};

/// Servidor de una sola conexión: responde `status` con `body` y devuelve el
/// cuerpo JSON de la petición recibida.
async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<Value>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    let response = format!("HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                           body.len());
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
        let length: usize = headers.lines()
                                   .find_map(|l| l.strip_prefix("content-length:"))
                                   .map(|v| v.trim().parse().unwrap())
                                   .unwrap_or(0);
        while buf.len() < header_end + length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before body");
            buf.extend_from_slice(&chunk[..n]);
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        serde_json::from_slice(&buf[header_end..header_end + length]).unwrap()
    });
    (url, handle)
}

fn client(rpc_url: String) -> HttpContractClient {
    let network = NetworkConfig { rpc_url,
                                  network_passphrase: "Test SDF Network ; September 2015".into(),
                                  contract_id: "CDEMO".into() };
    HttpContractClient::new(network, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn invoke_posts_contract_call_and_returns_result() {
    let (url, server) = serve_once("200 OK", r#"{"jsonrpc":"2.0","id":1,"result":["Hello","Dev"]}"#).await;
    let payload = client(url).invoke("hello", json!({"to": "Dev"})).await.unwrap();
    assert_eq!(payload, json!(["Hello", "Dev"]));

    let request = server.await.unwrap();
    assert_eq!(request["jsonrpc"], "2.0");
    assert_eq!(request["method"], "invokeContract");
    assert_eq!(request["params"]["function"], "hello");
    assert_eq!(request["params"]["contractId"], "CDEMO");
    assert_eq!(request["params"]["args"], json!({"to": "Dev"}));
}

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
    let (url, server) = serve_once("500 Internal Server Error", r#"{"message":"boom"}"#).await;
    let err = client(url).invoke("hello", json!({"to": "Dev"})).await.unwrap_err();
    match err {
        QueryError::Transport(message) => {
            assert!(message.contains("500"), "{message}");
            assert!(message.contains("boom"), "{message}");
        }
        other => panic!("expected transport error, got {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn error_object_becomes_rpc_error() {
    let body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"host trapped"}}"#;
    let (url, server) = serve_once("200 OK", body).await;
    let err = client(url).invoke("verify_certification", json!({"cert_id": "CERT-1"})).await.unwrap_err();
    assert_eq!(err, QueryError::Rpc { code: -32000, message: "host trapped".into() });
    server.await.unwrap();
}

#[tokio::test]
async fn response_without_result_is_a_decode_error() {
    let (url, server) = serve_once("200 OK", r#"{"jsonrpc":"2.0","id":1}"#).await;
    let err = client(url).invoke("hello", json!({"to": "Dev"})).await.unwrap_err();
    assert!(matches!(err, QueryError::Decode(_)), "{err:?}");
    server.await.unwrap();
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let (url, server) = serve_once("200 OK", "not json").await;
    let err = client(url).invoke("hello", json!({"to": "Dev"})).await.unwrap_err();
    assert!(matches!(err, QueryError::Decode(_)), "{err:?}");
    server.await.unwrap();
}
