use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "dompet_cli=info,dompet_ingest=info,tower_http=info";

/// Install the global subscriber. Logs go to stderr so `import --format json` stays parseable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
