use log::LevelFilter;

/// Initialize the logger with the specified level.
///
/// Logs go to stderr so that PPM written to stdout stays clean.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .init();
}
