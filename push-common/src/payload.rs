//! Gateway wire types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Namespace used for the reserved data keys unless configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "urbanairship";

/// Reserved data key carrying the alert text, e.g. `com.urbanairship.push.ALERT`.
pub fn alert_key(namespace: &str) -> String {
    format!("com.{}.push.ALERT", namespace)
}

/// Reserved data key carrying the per-transmission push id.
pub fn push_id_key(namespace: &str) -> String {
    format!("com.{}.push.PUSH_ID", namespace)
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PayloadError {
    #[error("Failed to encode {}: {message}", key.as_deref().unwrap_or("payload"))]
    Encode {
        key: Option<String>,
        message: String,
    },
}

/// Body of one send request to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushPayload {
    pub data: Map<String, Value>,
    /// Always exactly one token; batching is not supported.
    pub registration_ids: Vec<String>,
    #[serde(skip)]
    push_id: String,
}

impl PushPayload {
    /// Payload with only the reserved keys set and a fresh push id.
    pub fn new(namespace: &str, alert: &str, recipient: &str) -> Self {
        let push_id = uuid::Uuid::new_v4().to_string();
        let mut data = Map::new();
        data.insert(alert_key(namespace), Value::String(alert.to_string()));
        data.insert(push_id_key(namespace), Value::String(push_id.clone()));

        Self {
            data,
            registration_ids: vec![recipient.to_string()],
            push_id,
        }
    }

    /// Merge caller data. Existing keys, reserved ones included, are overwritten.
    pub fn merge_extras(mut self, extras: &Map<String, Value>) -> Self {
        for (key, value) in extras {
            self.data.insert(key.clone(), value.clone());
        }
        self
    }

    /// The id generated for this payload, independent of any extras override.
    pub fn push_id(&self) -> &str {
        &self.push_id
    }

    pub fn encode(&self) -> Result<Vec<u8>, PayloadError> {
        serde_json::to_vec(self).map_err(|e| PayloadError::Encode {
            key: None,
            message: e.to_string(),
        })
    }
}

/// Reply from the gateway's send endpoint.
///
/// Only `success` and `failure` drive classification; the rest is kept for
/// reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    #[serde(default)]
    pub success: Option<i64>,
    #[serde(default)]
    pub failure: Option<i64>,
    /// Kept as raw JSON; gateways emit ids wider than `i64`.
    #[serde(default)]
    pub multicast_id: Option<Value>,
    #[serde(default)]
    pub canonical_ids: Option<i64>,
    #[serde(default)]
    pub results: Vec<GatewayResult>,
}

/// Per-recipient entry of [`GatewayResponse::results`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayResult {
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub registration_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl GatewayResponse {
    /// First per-recipient error reported by the gateway, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.results.iter().find_map(|r| r.error.as_deref())
    }
}
