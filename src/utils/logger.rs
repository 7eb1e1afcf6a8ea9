use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize logging system. Call once at process start.
///
/// Full request/response traffic goes to the log file at the configured
/// level (debug by default); stdout only sees info and above. `RUST_LOG`
/// overrides the configured level.
pub fn init_logger(level: &str, log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("Failed to open log file");

        registry
            .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
            .with(fmt::layer().with_filter(LevelFilter::INFO))
            .init();
    } else {
        registry
            .with(fmt::layer().with_filter(LevelFilter::INFO))
            .init();
    }
}

/// Initialize logger from config
pub fn init_from_config(config: &crate::utils::config::LoggingConfig) {
    let log_file = if config.file_path.is_empty() {
        None
    } else {
        Some(Path::new(&config.file_path))
    };

    init_logger(&config.level, log_file);
}
