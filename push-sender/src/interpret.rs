//! Classification of gateway replies.

use push_common::{Classification, GatewayResponse, PushOutcome};

use crate::transport::RawResponse;

/// Classify a raw gateway reply.
///
/// Pure: the same input always yields the same outcome. Malformed bodies
/// become `Classification::ParseError` instead of an error. The HTTP status
/// is reported but does not affect the classification.
pub fn interpret(raw: &RawResponse) -> PushOutcome {
    let (classification, gateway_error) = match parse(&raw.body) {
        Some(response) => (classify(&response, raw), response.first_error().map(String::from)),
        None => (Classification::ParseError(raw.body_text()), None),
    };

    PushOutcome::new(raw.status, raw.reason.clone(), classification)
        .with_gateway_error(gateway_error)
}

/// Only a JSON object counts as a gateway response; arrays are not mapped
/// positionally onto the struct.
fn parse(body: &[u8]) -> Option<GatewayResponse> {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value @ serde_json::Value::Object(_)) => match serde_json::from_value(value) {
            Ok(response) => Some(response),
            Err(e) => {
                tracing::debug!("Gateway response has unexpected field types: {}", e);
                None
            }
        },
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Gateway body is not JSON: {}", e);
            None
        }
    }
}

fn classify(response: &GatewayResponse, raw: &RawResponse) -> Classification {
    match (response.success, response.failure) {
        (Some(success), Some(failure)) if success > 0 && failure == 0 => Classification::Success,
        (Some(_), Some(_)) => Classification::Failure,
        _ => Classification::ParseError(raw.body_text()),
    }
}
