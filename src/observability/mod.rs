//! Observability for token lifecycle operations.
//!
//! Structured spans are always emitted through `tracing`. Enable the `subscriber` feature
//! to install a console subscriber at provider bootstrap:
//!
//! ```toml
//! slack-token = { version = "0.1", features = ["subscriber"] }
//! ```

mod spans;

pub use spans::RemoteCallSpan;

#[cfg(feature = "subscriber")]
use crate::provider::ProviderConfig;

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `debug` for debug providers and `info`
/// for the rest. Returns `false` if a global subscriber was already installed.
#[cfg(feature = "subscriber")]
pub fn init_tracing(config: &ProviderConfig) -> bool {
    use tracing_subscriber::EnvFilter;

    let default_level = if config.debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .try_init()
        .is_ok()
}
