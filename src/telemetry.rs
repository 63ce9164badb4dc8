use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Compact, verbose output for local runs and tests.
pub fn init_dbg_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .without_time()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_env_filter(env_filter(filter))
        .compact()
        .init();
}

pub fn init_production_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter))
        // disable printing the name of the module in every log line.
        .with_target(false)
        // CloudWatch adds the ingestion time.
        .without_time()
        .with_ansi(false)
        .init();
}

/// `RUST_LOG` wins over the configured filter.
fn env_filter(filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter))
}
