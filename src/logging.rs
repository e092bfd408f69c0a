use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn default_level(verbose: bool) -> Level {
    match verbose {
        true => Level::DEBUG,
        false => Level::INFO,
    }
}

/// Install the process-wide subscriber.
///
/// `RUST_LOG` directives still apply. A subscriber that is already installed is kept.
pub fn init_logger(verbose: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(verbose).into())
        .from_env_lossy();
    let res = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init();
    if res.is_err() {
        tracing::debug!("logger already installed");
    }
}
