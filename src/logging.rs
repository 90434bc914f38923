use tracing_subscriber::EnvFilter;

use crate::error::ShellError;
use crate::flags::Flags;

/// Installs the global subscriber. Diagnostics go to stderr so they never
/// mix with command output; `RUST_LOG` takes precedence over the flags.
pub fn init(flags: &Flags) -> Result<(), ShellError> {
    let default_level = if flags.is_set("debug") { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fileman={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| ShellError::Logging(e.to_string()))
}
