pub mod mock_gateway;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use push_common::PushRequest;

use crate::config::{Config, GatewayConfig};
use crate::error::Result;
use crate::transport::{RawResponse, Transport};

pub fn test_request() -> PushRequest {
    PushRequest::new("test-api-key", "Test alert", "test-registration-id")
}

pub fn test_config(gateway_url: &str) -> Config {
    Config {
        gateway: GatewayConfig {
            url: gateway_url.to_string(),
            timeout_secs: 5,
        },
        ..Default::default()
    }
}

/// Transport stub that replays a fixed script of responses.
///
/// Once the script runs out every further send succeeds. Records what it
/// was asked to send.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<RawResponse>>>,
    sent: Mutex<Vec<(String, Vec<u8>)>>,
    calls: AtomicU32,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<RawResponse>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            sent: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn always_success() -> Self {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn bodies(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().iter().map(|(_, b)| b.clone()).collect()
    }

    pub fn api_keys(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(k, _)| k.clone()).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, api_key: &str, payload: Vec<u8>) -> Result<RawResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent
            .lock()
            .unwrap()
            .push((api_key.to_string(), payload));

        let next = self.script.lock().unwrap().pop_front();
        // Give timers a chance to fire between attempts
        tokio::task::yield_now().await;
        next.unwrap_or_else(|| Ok(RawResponse::new(200, "OK", mock_gateway::success_body())))
    }
}
