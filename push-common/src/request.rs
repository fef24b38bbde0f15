//! Push request as supplied by the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::PayloadError;

/// A single logical push: one alert for one recipient.
///
/// The request file uses camelCase keys (`apiKey`, `alert`, `recipient`).
/// `registrationId` is accepted as an alias for `recipient`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushRequest {
    pub api_key: String,
    pub alert: String,
    #[serde(alias = "registrationId")]
    pub recipient: String,
    /// Custom data merged into the payload after the reserved keys.
    #[serde(default)]
    pub extras: Map<String, Value>,
}

impl PushRequest {
    pub fn new(
        api_key: impl Into<String>,
        alert: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            alert: alert.into(),
            recipient: recipient.into(),
            extras: Map::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    /// Encode an arbitrary value into the extras map.
    ///
    /// Fails for values serde_json cannot represent, such as maps with
    /// non-string keys.
    pub fn insert_extra<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<(), PayloadError> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|e| PayloadError::Encode {
            key: Some(key.clone()),
            message: e.to_string(),
        })?;
        self.extras.insert(key, value);
        Ok(())
    }

    /// Names of required fields that are missing or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.trim().is_empty() {
            missing.push("apiKey");
        }
        if self.alert.trim().is_empty() {
            missing.push("alert");
        }
        if self.recipient.trim().is_empty() {
            missing.push("recipient");
        }
        missing
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
