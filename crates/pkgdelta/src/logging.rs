use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Overrides the log filter, e.g. `PKGDELTA_LOG=pkgdelta_operations=trace`.
pub(crate) const LOG_ENV: &str = "PKGDELTA_LOG";

fn default_directive(debug: bool) -> &'static str {
    if debug { "debug" } else { "warn" }
}

/// Logs go to stderr so stdout carries only pipeline variables.
pub(crate) fn init(debug: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
