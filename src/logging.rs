use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug messages are printed as well. `RUST_LOG`
/// takes precedence over both.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());

    // only fails when a logger is already installed, which is fine for tests
    let _ = Builder::from_env(env).format_timestamp_millis().try_init();
}
