use dotenv::dotenv;
use feed_relay::lambda::App;
use feed_relay::{
    logging, Config, DiscordNotifier, HandshakeVerifier, HttpFeedSource, S3SeenStore,
};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use reqwest::Client;
use serde_json::Value;

type RelayApp = App<S3SeenStore, HttpFeedSource, DiscordNotifier>;

async fn build(config: &Config) -> Result<RelayApp, Error> {
    let client = Client::new();

    Ok(App {
        verifier: HandshakeVerifier::from_hex(&config.discord_public_key)?,
        store: S3SeenStore::from_config(config).await,
        feed: HttpFeedSource::new(client.clone(), &config.feed_url),
        notifier: DiscordNotifier::from_config(client, config),
    })
}

async fn handler(app: &RelayApp, event: LambdaEvent<Value>) -> Result<Value, Error> {
    app.handle(&event.payload).await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv().ok();
    logging::init();

    let config = Config::from_env()?;
    let app = build(&config).await?;
    let app = &app;

    lambda_runtime::run(service_fn(move |event| async move { handler(app, event).await })).await
}
