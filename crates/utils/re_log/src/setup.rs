//! Function to setup logging in binaries and tests.

/// The `RUST_LOG` filter used when none is set: `info`, with a few chatty crates toned down.
pub fn default_log_filter() -> String {
    let mut rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned());

    const LOUD_CRATES: [&str; 1] = [
        // Arrow's FFI layer logs every schema it imports at debug level.
        "arrow",
    ];
    for loud_crate in LOUD_CRATES {
        if !rust_log.contains(&format!("{loud_crate}=")) {
            rust_log += &format!(",{loud_crate}=warn");
        }
    }

    rust_log
}

/// Directs [`log`] calls to stderr.
///
/// Safe to call more than once: only the first call installs a logger.
pub fn setup_logging() {
    use std::sync::Once;
    static START: Once = Once::new();

    START.call_once(|| {
        let env = env_logger::Env::default().default_filter_or(default_log_filter());
        env_logger::Builder::from_env(env)
            .format_timestamp_millis()
            .try_init()
            .ok(); // a test harness may have installed a logger already
    });
}
