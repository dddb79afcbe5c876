use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::encodings::Body;
use lambda_runtime::Error;
use serde_json::{json, Value};

use crate::feed::FeedSource;
use crate::handshake::{HandshakeVerifier, WebhookResponse};
use crate::invocation::Invocation;
use crate::notifier::Notifier;
use crate::pipeline::ReconcilePipeline;
use crate::store::SeenStore;

pub const SCHEDULED_OK: &str = "EventBridge trigger handled successfully";

/// Everything one invocation needs, built once per cold start.
pub struct App<S, F, N> {
    pub verifier: HandshakeVerifier,
    pub store: S,
    pub feed: F,
    pub notifier: N,
}

impl<S, F, N> App<S, F, N>
where
    S: SeenStore,
    F: FeedSource,
    N: Notifier,
{
    /// Handles a raw Lambda payload and renders the proxy response.
    ///
    /// A feed failure on the scheduled path is returned as an error so the
    /// invocation is recorded as failed.
    pub async fn handle(&self, payload: &Value) -> Result<Value, Error> {
        let response = match Invocation::from_event(payload) {
            Invocation::Webhook(request) => self.verifier.handle(&request),
            Invocation::Scheduled => {
                ReconcilePipeline::new(&self.store, &self.feed, &self.notifier)
                    .run()
                    .await?;

                WebhookResponse {
                    status_code: 200,
                    body: json!(SCHEDULED_OK).to_string(),
                }
            }
        };

        proxy_response(response)
    }
}

fn proxy_response(response: WebhookResponse) -> Result<Value, Error> {
    let response = ApiGatewayProxyResponse {
        status_code: i64::from(response.status_code),
        body: Some(Body::Text(response.body)),
        ..Default::default()
    };
    Ok(serde_json::to_value(response)?)
}
