//! Console logging using env_logger
//!
//! Logs go to stderr so patches on stdout stay machine readable.
//! `RUST_LOG` takes precedence over the `-v` count.

use log::LevelFilter;

/// Level selected by repeated `-v` flags
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize stderr logging
pub fn init(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(verbosity))
        .target(env_logger::Target::Stderr)
        .format_timestamp_millis();

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if let Err(e) = builder.try_init() {
        eprintln!("Failed to initialize logger: {}", e);
    }
}
