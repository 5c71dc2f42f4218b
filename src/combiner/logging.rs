use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::combiner::error::{CombineError, Result};

/// Installs a stderr `fmt` subscriber. `RUST_LOG` wins over `verbosity`,
/// which maps 0/1/2+ to `warn`/`info`/`debug`.
pub fn init_logging(verbosity: u8) -> Result<()> {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| CombineError::Logging(error.to_string()))
}
