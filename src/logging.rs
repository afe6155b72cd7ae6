//! Logger setup for the `fontbake` binary.
//!
//! Records go to stderr through `env_logger`. The filter is chosen in this
//! order: the `--log-level` flag, then `RUST_LOG`, then `warn`.

use fontbake_config::LogLevel;

/// Filter directive for the given flag and `RUST_LOG` value.
pub fn filter_spec(cli_level: Option<LogLevel>, rust_log: Option<&str>) -> String {
    if let Some(level) = cli_level {
        return level.to_level_filter().to_string();
    }
    match rust_log.map(str::trim) {
        Some(spec) if !spec.is_empty() => spec.to_string(),
        _ => LogLevel::default().to_level_filter().to_string(),
    }
}

/// Install the global logger. Calling this twice keeps the first logger.
pub fn init(cli_level: Option<LogLevel>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let spec = filter_spec(cli_level, rust_log.as_deref());

    let result = env_logger::Builder::new()
        .parse_filters(&spec)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init();
    if result.is_err() {
        log::debug!("Logger already initialized, keeping existing filter");
    }
}
