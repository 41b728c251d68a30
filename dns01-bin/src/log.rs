#[allow(unused_imports)]
pub use tracing::{debug, error, info, warn};

/// Crates whose events are emitted
const LOG_TARGETS: &[&str] = &["dns01_notify", "dns01_lib", "dns01_auth"];

pub fn init_logger(verbose: bool) {
  use tracing_subscriber::{fmt, prelude::*, EnvFilter};

  let format_layer = fmt::layer()
    .with_writer(std::io::stdout)
    .with_line_number(false)
    .with_thread_ids(false)
    .with_thread_names(false)
    .with_target(false)
    .with_level(true)
    .compact();

  // `-v` always wins, otherwise RUST_LOG or info
  let level_string = if verbose {
    "debug".to_string()
  } else {
    std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| "info".to_string())
  };
  let directives = LOG_TARGETS
    .iter()
    .map(|target| format!("{target}={level_string}"))
    .collect::<Vec<_>>()
    .join(",");
  let filter_layer = EnvFilter::new(directives);

  tracing_subscriber::registry()
    .with(format_layer)
    .with(filter_layer)
    .init();
}
