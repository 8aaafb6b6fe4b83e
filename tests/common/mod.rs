use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a test subscriber once per test binary; honors `RUST_LOG` the way
/// library consumers would.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    });
}
