use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. `SUBTRACK_LOG` wins over `RUST_LOG`; default is `warn`.
pub fn init(default_directive: &str) {
    let filter = std::env::var("SUBTRACK_LOG")
        .ok()
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
