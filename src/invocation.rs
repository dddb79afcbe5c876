use serde_json::Value;

use crate::handshake::{VerificationRequest, SIGNATURE_HEADER, TIMESTAMP_HEADER};

/// What triggered this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Signed HTTP call from the chat platform.
    Webhook(VerificationRequest),
    /// Scheduled feed reconciliation.
    Scheduled,
}

impl Invocation {
    /// Classifies a raw Lambda payload. HTTP events (API Gateway, Function
    /// URLs) carry a `headers` object; anything else is the schedule.
    pub fn from_event(event: &Value) -> Self {
        let Some(headers) = event.get("headers").and_then(Value::as_object) else {
            return Self::Scheduled;
        };

        let header = |name: &str| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .and_then(|(_, value)| value.as_str())
                .unwrap_or_default()
                .to_string()
        };

        Self::Webhook(VerificationRequest {
            timestamp: header(TIMESTAMP_HEADER),
            signature: header(SIGNATURE_HEADER),
            raw_body: event
                .get("body")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
    }
}
