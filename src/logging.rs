//! Tracing setup for the console client

use tracing_subscriber::EnvFilter;

/// Initialize the stdout tracing subscriber with an optional base level.
/// reqwest and hyper stay at warn so request logging does not drown the
/// console surface.
pub fn init_tracing(log_level: Option<&str>) {
    let base_level = log_level.unwrap_or("info");
    let filter = format!("ndvi_webgis={base_level},reqwest=warn,hyper=warn");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
