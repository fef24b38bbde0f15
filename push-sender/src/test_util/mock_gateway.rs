use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SEND_PATH: &str = "/gcm/send";

pub fn success_body() -> String {
    json!({
        "multicast_id": 5254487224946218513u64,
        "success": 1,
        "failure": 0,
        "canonical_ids": 0,
        "results": [{"message_id": "0:1458671337%921c249af9fd7ecd"}]
    })
    .to_string()
}

pub fn failure_body(error: &str) -> String {
    json!({
        "multicast_id": 5254487224946218514u64,
        "success": 0,
        "failure": 1,
        "canonical_ids": 0,
        "results": [{"error": error}]
    })
    .to_string()
}

/// Mock gateway answering every authorised send with `body`.
pub async fn start(api_key: &str, status: u16, body: String) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(header("Authorization", format!("key={}", api_key).as_str()))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

pub fn send_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), SEND_PATH)
}
