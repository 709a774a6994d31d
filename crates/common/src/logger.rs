use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoUtc;

/// Installs the global stdout subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` is used.
pub fn setup_logger(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_timer(ChronoUtc::rfc_3339())
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .compact()
        .with_env_filter(filter)
        .init();
}
