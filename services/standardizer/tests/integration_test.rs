use std::time::Duration;

use anyhow::Result;
use phdi_standardizer::{create_router, ErrorResponse, StandardizerConfig};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::timeout;

struct TestServer {
    addr: String,
    base_url: String,
    client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    async fn start() -> Result<Self> {
        Self::start_with(StandardizerConfig::default()).await
    }

    async fn start_with(config: StandardizerConfig) -> Result<Self> {
        let config = StandardizerConfig {
            server_port: 0,
            log_level: "warn".to_string(),
            ..config
        };
        let listener = TcpListener::bind(config.listen_addr()).await?;
        let addr = listener.local_addr()?;
        let router = create_router(&config);
        let handle = tokio::spawn(async move {
            axum::serve(listener, router.into_make_service())
                .await
                .expect("server failed");
        });

        Ok(Self {
            addr: addr.to_string(),
            base_url: format!("http://{addr}"),
            client: Client::new(),
            handle,
        })
    }

    async fn post(&self, path: &str, body: &Value) -> Result<(StatusCode, Value)> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        let status = response.status();
        let body = response.json().await?;
        Ok((status, body))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn patient() -> Value {
    json!({
        "resourceType": "Patient",
        "id": "some-uuid",
        "name": [{ "family": " doe2 ", "given": ["John ", " Danger1"] }],
        "telecom": [{ "system": "phone", "value": "(555) 654-1234" }],
        "address": [{ "country": "US" }]
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn health_check_returns_ok() -> Result<()> {
    let server = TestServer::start().await?;
    let response = server.client.get(format!("{}/", server.base_url)).send().await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let body: Value = response.json().await?;
    assert_eq!(body, json!({ "status": "OK" }));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn request_id_is_propagated() -> Result<()> {
    let server = TestServer::start().await?;
    let response = server
        .client
        .get(format!("{}/", server.base_url))
        .header("x-request-id", "trace-123")
        .send()
        .await?;

    assert_eq!(response.headers()["x-request-id"], "trace-123");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_standardizations_return_document_unchanged() -> Result<()> {
    let server = TestServer::start().await?;
    let (status, body) = server
        .post(
            "/standardize",
            &json!({ "data": patient(), "standardizations": {} }),
        )
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, patient());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn standardize_names_applies_defaults() -> Result<()> {
    let server = TestServer::start().await?;
    let (status, body) = server
        .post("/standardize_names", &json!({ "data": patient() }))
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"][0]["family"], "DOE");
    assert_eq!(body["name"][0]["given"], json!(["JOHN", "DANGER"]));
    assert_eq!(body["telecom"][0]["value"], "(555) 654-1234");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn standardize_names_honours_parameters() -> Result<()> {
    let server = TestServer::start().await?;
    let (status, body) = server
        .post(
            "/standardize_names",
            &json!({
                "data": patient(),
                "case": "title",
                "trim": false,
                "remove_numbers": false
            }),
        )
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"][0]["family"], " Doe2 ");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn standardize_phones_formats_e164() -> Result<()> {
    let server = TestServer::start().await?;
    let (status, body) = server
        .post("/standardize_phones", &json!({ "data": patient() }))
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["telecom"][0]["value"], "+15556541234");
    assert_eq!(body["name"], patient()["name"]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn dispatch_matches_sequential_single_calls() -> Result<()> {
    let server = TestServer::start().await?;
    let (status, combined) = server
        .post(
            "/standardize",
            &json!({
                "data": patient(),
                "standardizations": {
                    "standardize_names": { "case": "lower" },
                    "standardize_phones": {}
                }
            }),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (_, names) = server
        .post(
            "/standardize_names",
            &json!({ "data": patient(), "case": "lower" }),
        )
        .await?;
    let (_, sequential) = server
        .post("/standardize_phones", &json!({ "data": names }))
        .await?;

    assert_eq!(combined, sequential);
    assert_eq!(combined["name"][0]["family"], "doe");
    assert_eq!(combined["telecom"][0]["value"], "+15556541234");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_resource_type_is_rejected_everywhere() -> Result<()> {
    let server = TestServer::start().await?;
    let data = json!({ "id": "no-type", "name": [{ "family": "doe" }] });

    for (path, body) in [
        ("/standardize", json!({ "data": data, "standardizations": {} })),
        ("/standardize_names", json!({ "data": data })),
        ("/standardize_phones", json!({ "data": data })),
        (
            "/standardize",
            json!({ "data": { "resourceType": null }, "standardizations": {} }),
        ),
    ] {
        let (status, body) = server.post(path, &body).await?;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{path}");
        let error: ErrorResponse = serde_json::from_value(body)?;
        assert_eq!(error.code, "MISSING_RESOURCE_TYPE");
        assert_eq!(error.details, Some(json!({ "field": "data.resourceType" })));
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unsupported_standardization_runs_nothing() -> Result<()> {
    let server = TestServer::start().await?;
    let (status, body) = server
        .post(
            "/standardize",
            &json!({
                "data": patient(),
                "standardizations": {
                    "standardize_names": {},
                    "standardize_addresses": {}
                }
            }),
        )
        .await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_value(body)?;
    assert_eq!(error.code, "UNSUPPORTED_STANDARDIZATION");
    assert_eq!(
        error.details,
        Some(json!({
            "field": "standardizations.standardize_addresses",
            "supported": ["standardize_names", "standardize_phones"]
        }))
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_parameters_are_rejected() -> Result<()> {
    let server = TestServer::start().await?;
    let (status, body) = server
        .post(
            "/standardize",
            &json!({
                "data": patient(),
                "standardizations": { "standardize_names": { "case": "sentence" } }
            }),
        )
        .await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_value(body)?;
    assert_eq!(error.code, "INVALID_PARAMETERS");
    assert_eq!(
        error.details.as_ref().and_then(|d| d.get("field")),
        Some(&json!("standardizations.standardize_names"))
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_body_uses_error_envelope() -> Result<()> {
    let server = TestServer::start().await?;
    let response = server
        .client
        .post(format!("{}/standardize", server.base_url))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = response.json().await?;
    assert_eq!(error.code, "INVALID_BODY");

    let (status, body) = server
        .post("/standardize", &json!({ "data": patient() }))
        .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_BODY");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_document_is_a_server_error() -> Result<()> {
    let server = TestServer::start().await?;
    let (status, body) = server
        .post(
            "/standardize_names",
            &json!({
                "data": { "resourceType": "Patient", "name": [{ "family": 7 }] }
            }),
        )
        .await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "STANDARDIZATION_FAILED");
    assert_eq!(body["details"]["path"], "name[0].family");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn oversized_body_is_rejected() -> Result<()> {
    let server = TestServer::start_with(StandardizerConfig {
        max_body_size_bytes: 64,
        ..StandardizerConfig::default()
    })
    .await?;

    let body = json!({
        "data": {
            "resourceType": "Patient",
            "name": [{ "family": "x".repeat(200) }]
        }
    });
    let (status, body) = server.post("/standardize_names", &body).await?;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["code"], "INVALID_BODY");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn stalled_request_times_out() -> Result<()> {
    let server = TestServer::start_with(StandardizerConfig {
        request_timeout_secs: 1,
        ..StandardizerConfig::default()
    })
    .await?;

    // Promise a body that never fully arrives.
    let mut stream = TcpStream::connect(&server.addr).await?;
    stream
        .write_all(
            b"POST /standardize HTTP/1.1\r\nHost: localhost\r\n\
              Content-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"data\"",
        )
        .await?;

    let mut response = Vec::new();
    let mut buffer = [0u8; 1024];
    let read = timeout(Duration::from_secs(5), async {
        loop {
            let n = stream.read(&mut buffer).await?;
            if n == 0 {
                break;
            }
            response.extend_from_slice(&buffer[..n]);
            if response.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        Ok::<_, std::io::Error>(())
    })
    .await;

    assert!(read.is_ok(), "server did not answer a stalled request");
    let head = String::from_utf8_lossy(&response);
    assert!(head.starts_with("HTTP/1.1 408"), "unexpected response: {head}");
    Ok(())
}
