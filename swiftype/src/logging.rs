use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a full filter directive, e.g. `cadence=debug`
pub const LOG_ENV: &str = "SWIFTYPE_LOG";

/// Install the global subscriber, writing to stderr
///
/// The filter is taken from [`LOG_ENV`] if set, else from the `-v` count, else from the
/// configured level.
pub fn init(verbosity: u8, configured: &str) {
    let (filter, rejected) = match std::env::var(LOG_ENV) {
        Ok(directives) => (EnvFilter::new(directives), None),
        Err(_) => match level_from_verbosity(verbosity) {
            Some(level) => (EnvFilter::default().add_directive(level.into()), None),
            None => match EnvFilter::try_new(configured) {
                Ok(filter) => (filter, None),
                Err(_) => (
                    EnvFilter::default().add_directive(LevelFilter::WARN.into()),
                    Some(configured),
                ),
            },
        },
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok();

    if let (true, Some(level)) = (installed, rejected) {
        tracing::warn!(level, "ignoring invalid log_level setting");
    }
}

fn level_from_verbosity(verbosity: u8) -> Option<LevelFilter> {
    match verbosity {
        0 => None,
        1 => Some(LevelFilter::INFO),
        2 => Some(LevelFilter::DEBUG),
        _ => Some(LevelFilter::TRACE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_from_verbosity(0), None);
        assert_eq!(level_from_verbosity(1), Some(LevelFilter::INFO));
        assert_eq!(level_from_verbosity(2), Some(LevelFilter::DEBUG));
        assert_eq!(level_from_verbosity(9), Some(LevelFilter::TRACE));
    }
}
