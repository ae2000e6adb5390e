use tracing_subscriber::EnvFilter;

use super::errors::*;

/// Installs the global log subscriber. The filter is read from
/// `RUST_LOG`, falling back to `default_filter`. Logs go to stderr so
/// they never mix with command output.
pub fn init(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| ErrorKind::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(::std::io::stderr)
        .try_init()
        .map_err(|e| ErrorKind::Logging(e.to_string()).into())
}
