//! Builds gateway payloads from push requests.

use push_common::{PushPayload, PushRequest};

use crate::config::PayloadConfig;
use crate::error::{Error, Result};

/// Turns a [`PushRequest`] into the gateway's payload shape.
///
/// Stateless apart from its configuration; every call produces a new push id.
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    namespace: String,
    max_payload_bytes: Option<usize>,
}

impl PayloadBuilder {
    pub fn new(config: &PayloadConfig) -> Self {
        Self {
            namespace: config.namespace.clone(),
            max_payload_bytes: config.max_payload_bytes,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Build a fresh payload for one transmission.
    ///
    /// Extras are merged after the reserved alert and push id keys, so a
    /// colliding extras key replaces the reserved value.
    pub fn build(&self, request: &PushRequest) -> Result<PushPayload> {
        let payload = PushPayload::new(&self.namespace, &request.alert, &request.recipient)
            .merge_extras(&request.extras);

        let reserved = [
            push_common::alert_key(&self.namespace),
            push_common::push_id_key(&self.namespace),
        ];
        let overridden: Vec<&str> = reserved
            .iter()
            .filter(|k| request.extras.contains_key(k.as_str()))
            .map(String::as_str)
            .collect();
        if !overridden.is_empty() {
            tracing::debug!(keys = ?overridden, "Extras override reserved payload keys");
        }

        Ok(payload)
    }

    /// Build and encode in one step, returning the push id alongside the bytes.
    ///
    /// An encoded body over `max_payload_bytes` is a serialization error.
    pub fn build_encoded(&self, request: &PushRequest) -> Result<(String, Vec<u8>)> {
        let payload = self.build(request)?;
        let bytes = payload.encode()?;

        if let Some(limit) = self.max_payload_bytes {
            if bytes.len() > limit {
                return Err(Error::Serialization(format!(
                    "encoded payload is {} bytes, limit is {}",
                    bytes.len(),
                    limit
                )));
            }
        }

        Ok((payload.push_id().to_string(), bytes))
    }
}

impl Default for PayloadBuilder {
    fn default() -> Self {
        Self::new(&PayloadConfig::default())
    }
}
