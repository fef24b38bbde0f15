//! Push Common Types
//!
//! Shared types for push dispatch: the caller's request, the gateway payload
//! and reply, and the classified outcome of each attempt.

pub mod outcome;
pub mod payload;
pub mod request;

pub use outcome::{Classification, PushOutcome};
pub use payload::{
    alert_key, push_id_key, GatewayResponse, GatewayResult, PayloadError, PushPayload,
    DEFAULT_NAMESPACE,
};
pub use request::PushRequest;
