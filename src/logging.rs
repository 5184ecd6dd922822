use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "paintwand=info";

/// Installs the global fmt subscriber. Honors `RUST_LOG`; later calls are no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
