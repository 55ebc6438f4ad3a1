use log::LevelFilter;

/// Environment variable that overrides the level chosen by `--verbose`,
/// in `env_logger` filter syntax (e.g. `READLOG_LOG=readlog::store=debug`).
const LOG_ENV: &str = "READLOG_LOG";

/// Installs `env_logger` on stderr: warnings by default, debug when verbose.
pub(super) fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // A logger may already be set when running under a test harness
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_env(LOG_ENV)
        .format_timestamp(None)
        .try_init();
}
