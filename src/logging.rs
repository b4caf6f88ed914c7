// 📝 Logging - tracing subscriber for the CLI
//
// Library code only emits `tracing` events; the binary installs this
// subscriber once at startup.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the console subscriber. `RUST_LOG` wins over the default level.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "hr_ingest=debug" } else { "hr_ingest=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // try_init: a second call (tests, embedding) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
