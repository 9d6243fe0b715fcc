//! Tracing setup shared by the server and the command-line tools.

use tracing_subscriber::EnvFilter;

/// Directives used by the API server when `RUST_LOG` is unset.
pub const DEFAULT_SERVER_DIRECTIVES: &str = "backend_api=debug,ai=debug,ai_client=info,tower_http=debug";

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` wins over `default_directives`. Calling this more than once is
/// harmless: later calls return `false` and leave the first subscriber in place.
pub fn init(default_directives: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok()
}
