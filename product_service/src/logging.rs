use std::net::SocketAddr;
use std::thread;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber. `RUST_LOG` wins when set;
/// otherwise `DEBUG` selects between `debug` and `info`.
pub fn init(debug: bool) {
    let fallback = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // a second init (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

pub fn thread_logging(str: &str, peer: SocketAddr) {
    let thread_id = thread::current().id();
    debug!("{}{:?} ({})", str, thread_id, peer);
}
