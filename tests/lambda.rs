mod common;

use ed25519_dalek::{Signer, SigningKey};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{feed, BrokenFeed, MemoryStore, RecordingNotifier, StaticFeed};
use feed_relay::lambda::App;
use feed_relay::HandshakeVerifier;

const TIMESTAMP: &str = "1760745600";

fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[3u8; 32])
}

fn app<F>(
    store: MemoryStore,
    feed: F,
    notifier: RecordingNotifier,
) -> App<MemoryStore, F, RecordingNotifier> {
    App {
        verifier: HandshakeVerifier::new(signing_key().verifying_key()),
        store,
        feed,
        notifier,
    }
}

fn webhook_event(body: &str, signature: &str) -> Value {
    json!({
        "headers": {
            "content-type": "application/json",
            "x-signature-ed25519": signature,
            "x-signature-timestamp": TIMESTAMP,
        },
        "body": body,
    })
}

fn schedule_event() -> Value {
    json!({
        "source": "aws.events",
        "detail-type": "Scheduled Event",
        "detail": {},
    })
}

fn status_and_body(response: &Value) -> (i64, &str) {
    (
        response["statusCode"].as_i64().expect("status code"),
        response["body"].as_str().expect("text body"),
    )
}

#[tokio::test]
async fn signed_ping_gets_ping_reply() {
    let body = r#"{"type":1}"#;
    let signature = signing_key().sign(format!("{TIMESTAMP}{body}").as_bytes());
    let app = app(MemoryStore::default(), feed(), RecordingNotifier::default());

    let response = app
        .handle(&webhook_event(body, &hex::encode(signature.to_bytes())))
        .await
        .expect("webhook calls never fail");

    assert_eq!(status_and_body(&response), (200, r#"{"type":1}"#));
    assert!(app.notifier.attempts().is_empty());
    assert_eq!(app.store.saves(), 0);
}

#[tokio::test]
async fn bad_signature_is_unauthorized() {
    let app = app(MemoryStore::default(), feed(), RecordingNotifier::default());

    let response = app
        .handle(&webhook_event(r#"{"type":1}"#, &"00".repeat(64)))
        .await
        .expect("webhook calls never fail");

    assert_eq!(
        status_and_body(&response),
        (401, r#""invalid request signature""#)
    );
}

#[tokio::test]
async fn schedule_runs_pipeline_and_reports_success() {
    let app = app(
        MemoryStore::with(&["https://a/1"]),
        feed(),
        RecordingNotifier::default(),
    );

    let response = app.handle(&schedule_event()).await.expect("run ok");

    assert_eq!(
        status_and_body(&response),
        (200, r#""EventBridge trigger handled successfully""#)
    );
    assert_eq!(app.notifier.attempts(), vec!["https://a/2".to_string()]);
    assert_eq!(app.store.saves(), 1);
}

#[tokio::test]
async fn schedule_succeeds_despite_publish_and_save_failures() {
    let store = MemoryStore {
        fail_save: true,
        ..MemoryStore::default()
    };
    let app = app(
        store,
        feed(),
        RecordingNotifier::failing_on(&["https://a/1", "https://a/2"]),
    );

    let response = app.handle(&schedule_event()).await.expect("run ok");

    assert_eq!(
        status_and_body(&response),
        (200, r#""EventBridge trigger handled successfully""#)
    );
    assert_eq!(app.notifier.attempts().len(), 2);
}

#[tokio::test]
async fn schedule_with_empty_feed_succeeds() {
    let app = app(
        MemoryStore::default(),
        StaticFeed(Vec::new()),
        RecordingNotifier::default(),
    );

    let response = app.handle(&schedule_event()).await.expect("run ok");

    assert_eq!(status_and_body(&response).0, 200);
}

#[tokio::test]
async fn feed_failure_fails_the_invocation() {
    let app = app(
        MemoryStore::with(&["https://a/1"]),
        BrokenFeed,
        RecordingNotifier::default(),
    );

    let err = app.handle(&schedule_event()).await.unwrap_err();

    assert!(err.to_string().contains("502"));
    assert_eq!(app.store.saves(), 0);
}
