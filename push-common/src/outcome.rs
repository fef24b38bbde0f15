//! Classified result of one transmission attempt.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "body")]
pub enum Classification {
    /// Gateway accepted the push for the recipient.
    Success,
    /// Gateway answered but reported a failure.
    Failure,
    /// Delivery outcome could not be determined; carries the raw body.
    ParseError(String),
}

impl Classification {
    pub fn is_success(&self) -> bool {
        matches!(self, Classification::Success)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Success => write!(f, "success"),
            Classification::Failure => write!(f, "failure"),
            Classification::ParseError(_) => write!(f, "parse_error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushOutcome {
    pub status: u16,
    pub reason: String,
    pub classification: Classification,
    /// First per-recipient error string from the gateway, for reporting only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_error: Option<String>,
}

impl PushOutcome {
    pub fn new(status: u16, reason: impl Into<String>, classification: Classification) -> Self {
        Self {
            status,
            reason: reason.into(),
            classification,
            gateway_error: None,
        }
    }

    pub fn with_gateway_error(mut self, error: Option<String>) -> Self {
        self.gateway_error = error;
        self
    }

    /// `"200 OK"` style line for reports.
    pub fn status_line(&self) -> String {
        format!("{} {}", self.status, self.reason)
    }
}
