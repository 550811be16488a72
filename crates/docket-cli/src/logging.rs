//! Diagnostic logging setup.

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Map the `-v` count to a default level.
const fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Install the stderr subscriber.
///
/// `RUST_LOG` overrides the level derived from `verbose`.
pub fn init(verbose: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbose).into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}
