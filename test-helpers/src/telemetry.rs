//! Log output for the stub server while tests run.

use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

/// Compact subscriber whose output the test harness captures per test.
/// `RUST_LOG` overrides `default_filter`.
pub fn test_subscriber(default_filter: &str) -> impl Subscriber + Sync + Send {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let captured = fmt::Layer::new()
        .compact()
        .with_target(false)
        .with_test_writer()
        .with_span_events(fmt::format::FmtSpan::CLOSE);
    Registry::default().with(env_filter).with(captured)
}
