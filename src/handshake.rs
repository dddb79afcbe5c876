use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde_json::{json, Value};

use crate::error::ConfigError;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Interaction type Discord uses for its liveness ping.
const PING: u64 = 1;

/// A signed inbound webhook call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationRequest {
    pub timestamp: String,
    pub signature: String,
    pub raw_body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status_code: u16,
    pub body: String,
}

impl WebhookResponse {
    fn message(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: json!(message).to_string(),
        }
    }
}

/// Only an object whose numeric `type` equals the ping type counts.
fn is_ping(interaction: &Value) -> bool {
    interaction
        .as_object()
        .and_then(|object| object.get("type"))
        .and_then(Value::as_f64)
        == Some(PING as f64)
}

/// Checks Ed25519 request signatures against the application public key.
#[derive(Debug, Clone)]
pub struct HandshakeVerifier {
    key: VerifyingKey,
}

impl HandshakeVerifier {
    pub fn new(key: VerifyingKey) -> Self {
        Self { key }
    }

    /// Parses a hex-encoded 32 byte public key.
    pub fn from_hex(public_key: &str) -> Result<Self, ConfigError> {
        let bytes = hex::decode(public_key.trim())
            .map_err(|err| ConfigError::InvalidPublicKey(err.to_string()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| ConfigError::InvalidPublicKey("expected 32 bytes".to_string()))?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|err| ConfigError::InvalidPublicKey(err.to_string()))?;
        Ok(Self::new(key))
    }

    /// True iff `signature_hex` signs `timestamp` followed by `raw_body`.
    pub fn verify(&self, raw_body: &str, signature_hex: &str, timestamp: &str) -> bool {
        let Ok(bytes) = hex::decode(signature_hex) else {
            return false;
        };
        let Ok(signature) = Signature::from_slice(&bytes) else {
            return false;
        };

        let mut message = Vec::with_capacity(timestamp.len() + raw_body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(raw_body.as_bytes());

        self.key.verify(&message, &signature).is_ok()
    }

    /// Answers an inbound webhook call. The signature is checked before the
    /// body is looked at.
    pub fn handle(&self, request: &VerificationRequest) -> WebhookResponse {
        if !self.verify(&request.raw_body, &request.signature, &request.timestamp) {
            tracing::warn!("rejecting webhook call with invalid signature");
            return WebhookResponse::message(401, "invalid request signature");
        }

        match serde_json::from_str::<Value>(&request.raw_body) {
            Ok(interaction) if is_ping(&interaction) => {
                tracing::info!("answering ping");
                WebhookResponse {
                    status_code: 200,
                    body: json!({ "type": PING }).to_string(),
                }
            }
            Ok(interaction) => {
                tracing::warn!(kind = ?interaction.get("type"), "unhandled interaction type");
                WebhookResponse::message(400, "unhandled request type")
            }
            Err(err) => {
                tracing::warn!(error = %err, "webhook body is not a JSON interaction");
                WebhookResponse::message(400, "unhandled request type")
            }
        }
    }
}
