//! Gateway transport.
//!
//! The `Transport` trait is the only place the sender touches the network.
//! `HttpsTransport` opens a fresh connection for every send and never keeps
//! one idle, so a failed attempt cannot leave state behind for the next.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONNECTION, CONTENT_TYPE};
use reqwest::Client;

use crate::config::GatewayConfig;
use crate::error::{Error, Result};

/// Status and body exactly as the gateway returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: reason.into(),
            body: body.into(),
        }
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends one encoded payload to the push gateway.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `payload` authorised with `api_key`.
    ///
    /// Connection, handshake and timeout failures are `Error::Transport`.
    /// Any HTTP status, including 4xx/5xx, is a successful send.
    async fn send(&self, api_key: &str, payload: Vec<u8>) -> Result<RawResponse>;
}

/// HTTPS transport backed by reqwest.
///
/// The URL scheme is not enforced: `http://` URLs work and exist for pointing
/// tests at a local mock gateway. Production gateway URLs are `https://`.
pub struct HttpsTransport {
    http_client: Client,
    url: String,
    timeout: Duration,
}

impl HttpsTransport {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        Self::with_timeout(&config.url, config.timeout())
    }

    /// `timeout` bounds each send end to end and must be non-zero.
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(Error::Config("gateway timeout must be greater than zero".to_string()));
        }

        let http_client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| Error::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            url: url.to_string(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn describe(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            format!("no response from {} within {:?}", self.url, self.timeout)
        } else if err.is_connect() {
            format!("could not connect to {}: {}", self.url, err)
        } else {
            format!("request to {} failed: {}", self.url, err)
        }
    }
}

#[async_trait]
impl Transport for HttpsTransport {
    async fn send(&self, api_key: &str, payload: Vec<u8>) -> Result<RawResponse> {
        tracing::debug!("Sending {} byte payload to {}", payload.len(), self.url);

        let response = self
            .http_client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("key={}", api_key))
            .header(CONNECTION, "close")
            .body(payload)
            .send()
            .await
            .map_err(|e| Error::Transport(self.describe(&e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(self.describe(&e)))?;

        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_posts_headers_and_body() {
        let server = MockServer::start().await;
        let payload = json!({"data": {"k": "v"}, "registration_ids": ["t"]});

        Mock::given(method("POST"))
            .and(path("/gcm/send"))
            .and(header("Content-Type", "application/json"))
            .and(header("Authorization", "key=secret"))
            .and(body_json(&payload))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"success":1,"failure":0}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/gcm/send", server.uri());
        let transport = HttpsTransport::with_timeout(&url, Duration::from_secs(5)).unwrap();
        let raw = transport
            .send("secret", serde_json::to_vec(&payload).unwrap())
            .await
            .unwrap();

        assert_eq!(raw.status, 200);
        assert_eq!(raw.reason, "OK");
        assert_eq!(raw.body_text(), r#"{"success":1,"failure":0}"#);
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("<html>Unauthorized</html>"))
            .mount(&server)
            .await;

        let transport =
            HttpsTransport::with_timeout(&server.uri(), Duration::from_secs(5)).unwrap();
        let raw = transport.send("bad", b"{}".to_vec()).await.unwrap();

        assert_eq!(raw.status, 401);
        assert_eq!(raw.reason, "Unauthorized");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = format!("http://127.0.0.1:{}/send", port);

        let transport = HttpsTransport::with_timeout(&url, Duration::from_secs(2)).unwrap();
        let err = transport.send("key", b"{}".to_vec()).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"success":1,"failure":0}"#)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let transport =
            HttpsTransport::with_timeout(&server.uri(), Duration::from_millis(200)).unwrap();
        let err = transport.send("key", b"{}".to_vec()).await.unwrap_err();

        match err {
            Error::Transport(message) => assert!(message.contains("no response")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = HttpsTransport::with_timeout("https://gateway.test/send", Duration::ZERO)
            .err()
            .unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_new_from_config() {
        let config = GatewayConfig::default();
        let transport = HttpsTransport::new(&config).unwrap();
        assert_eq!(transport.url(), "https://android.googleapis.com/gcm/send");
        assert_eq!(transport.timeout, Duration::from_secs(10));
    }
}
