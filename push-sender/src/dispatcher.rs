//! Sequential dispatch of repeated push attempts.
//!
//! Each attempt builds a fresh payload, sends it and classifies the reply.
//! Reports are handed to the caller as soon as each attempt finishes. A
//! failed attempt never stops the loop; only an invalid request does, and
//! that is checked before anything is sent.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use push_common::{Classification, PushOutcome, PushRequest};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::interpret::interpret;
use crate::payload::PayloadBuilder;
use crate::transport::{HttpsTransport, Transport};

/// Result of a single transmission attempt.
#[derive(Debug, Clone)]
pub struct AttemptReport {
    /// 1-based attempt number.
    pub attempt: u32,
    /// Push id carried by the payload; `None` if no payload was built.
    pub push_id: Option<String>,
    pub sent_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub result: Result<PushOutcome>,
}

impl AttemptReport {
    pub fn is_success(&self) -> bool {
        matches!(&self.result, Ok(outcome) if outcome.classification.is_success())
    }
}

/// Totals for one dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub requested: u32,
    pub attempted: u32,
    pub succeeded: u32,
    pub failed: u32,
    pub unparsed: u32,
    /// Attempts that ended with a serialization or transport error.
    pub errored: u32,
    /// The loop stopped early because the cancellation token fired.
    pub cancelled: bool,
}

impl DispatchSummary {
    fn new(requested: u32) -> Self {
        Self {
            requested,
            ..Default::default()
        }
    }

    fn record(&mut self, report: &AttemptReport) {
        self.attempted += 1;
        match &report.result {
            Ok(outcome) => match outcome.classification {
                Classification::Success => self.succeeded += 1,
                Classification::Failure => self.failed += 1,
                Classification::ParseError(_) => self.unparsed += 1,
            },
            Err(_) => self.errored += 1,
        }
    }

    /// Every requested attempt ran.
    pub fn is_complete(&self) -> bool {
        self.attempted == self.requested
    }
}

/// Drives PayloadBuilder, Transport and the response interpreter.
///
/// Holds no per-dispatch state, so one dispatcher can serve concurrent
/// dispatches; each still runs its own attempts one at a time.
pub struct Dispatcher {
    builder: PayloadBuilder,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(builder: PayloadBuilder, transport: Arc<dyn Transport>) -> Self {
        Self { builder, transport }
    }

    /// Dispatcher sending over HTTPS to the configured gateway.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpsTransport::new(&config.gateway)?;
        Ok(Self::new(PayloadBuilder::new(&config.payload), Arc::new(transport)))
    }

    /// Check the request and attempt count before any attempt is made.
    pub fn validate(request: &PushRequest, attempts: u32) -> Result<()> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(Error::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }
        if attempts == 0 {
            return Err(Error::Validation("attempt count must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Run `attempts` sends and collect every report.
    ///
    /// Reports accumulate as attempts finish; nothing is reserved up front
    /// from `attempts`.
    pub async fn dispatch(
        &self,
        request: &PushRequest,
        attempts: u32,
    ) -> Result<Vec<AttemptReport>> {
        let mut reports = Vec::new();
        self.dispatch_with(request, attempts, &CancellationToken::new(), |report| {
            reports.push(report)
        })
        .await?;
        Ok(reports)
    }

    /// Run up to `attempts` sends, passing each report to `on_report` as
    /// soon as it is available.
    ///
    /// `cancel` is checked before every attempt; an attempt already in
    /// flight is allowed to finish and is reported.
    pub async fn dispatch_with<F>(
        &self,
        request: &PushRequest,
        attempts: u32,
        cancel: &CancellationToken,
        mut on_report: F,
    ) -> Result<DispatchSummary>
    where
        F: FnMut(AttemptReport),
    {
        Self::validate(request, attempts)?;

        tracing::info!(
            recipient = %request.recipient,
            attempts,
            "Starting push dispatch"
        );

        let mut summary = DispatchSummary::new(attempts);
        for attempt in 1..=attempts {
            if cancel.is_cancelled() {
                tracing::warn!(
                    completed = summary.attempted,
                    requested = attempts,
                    "Dispatch cancelled"
                );
                summary.cancelled = true;
                break;
            }

            let report = self.attempt(request, attempt).await;
            summary.record(&report);
            on_report(report);
        }

        tracing::info!(
            attempted = summary.attempted,
            succeeded = summary.succeeded,
            failed = summary.failed,
            unparsed = summary.unparsed,
            errored = summary.errored,
            "Push dispatch finished"
        );

        Ok(summary)
    }

    async fn attempt(&self, request: &PushRequest, attempt: u32) -> AttemptReport {
        let sent_at = Utc::now();
        let start = Instant::now();

        let (push_id, result) = match self.builder.build_encoded(request) {
            Ok((push_id, body)) => {
                let result = self
                    .transport
                    .send(&request.api_key, body)
                    .await
                    .map(|raw| interpret(&raw));
                (Some(push_id), result)
            }
            Err(e) => (None, Err(e)),
        };

        let elapsed = start.elapsed();
        match &result {
            Ok(outcome) => tracing::info!(
                attempt,
                push_id = push_id.as_deref().unwrap_or("-"),
                status = outcome.status,
                classification = %outcome.classification,
                duration_ms = elapsed.as_millis() as u64,
                "Push attempt completed"
            ),
            Err(e) => tracing::warn!(
                attempt,
                push_id = push_id.as_deref().unwrap_or("-"),
                error_kind = e.kind(),
                error = %e,
                duration_ms = elapsed.as_millis() as u64,
                "Push attempt failed"
            ),
        }

        AttemptReport {
            attempt,
            push_id,
            sent_at,
            elapsed,
            result,
        }
    }
}
