use std::io;

use tracing_subscriber::EnvFilter;

/// Send log output to stderr, leaving stdout free.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks the level.
pub fn configure_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_level},reqwest=warn,hyper=warn")));

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
