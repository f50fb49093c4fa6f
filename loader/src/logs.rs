//! Logging to the javascript console, or to stderr outside the browser.

use tracing_subscriber::{EnvFilter, prelude::*};

const DEFAULT_FILTER: &str = "error,loader=debug";

/// Initialize logging. Later calls leave the first subscriber in place.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    use tracing_web::MakeWebConsoleWriter;

    let env_filter = EnvFilter::new(DEFAULT_FILTER);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_ansi(false) // Only partially supported across browsers
        .without_time() // std::time is not available in browsers
        .with_writer(MakeWebConsoleWriter::new().with_pretty_level())
        .with_level(false);

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();

    if installed.is_ok() {
        tracing::info!("Initialized logs");
    }
}

/// Initialize logging, honoring `RUST_LOG` if it is set. Later calls leave
/// the first subscriber in place.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_writer(std::io::stderr);

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();

    if installed.is_ok() {
        tracing::info!("Initialized logs");
    }
}
