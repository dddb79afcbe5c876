use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Lambda stamps each line itself, so the
/// output carries neither timestamps nor colors.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .init();
}
