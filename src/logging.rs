//! Diagnostic logging setup
//!
//! Reports go to stdout; every diagnostic event goes to stderr so the two
//! never interleave in redirected output.

use std::io;

use tracing_subscriber::EnvFilter;

/// Default filter when neither `RUST_LOG` nor a CLI level is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Build the filter: `RUST_LOG` wins, then `level`, then [`DEFAULT_LOG_LEVEL`].
pub fn env_filter(level: Option<&str>) -> EnvFilter {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(from_env.as_deref(), level)
}

fn filter_from(from_env: Option<&str>, level: Option<&str>) -> EnvFilter {
    from_env
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(level.unwrap_or(DEFAULT_LOG_LEVEL)).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Install the global stderr subscriber.
///
/// Calling this twice is harmless; the second call keeps the first subscriber.
pub fn init(level: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_level_argument_applies_without_env() {
        assert_eq!(
            filter_from(None, Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(filter_from(None, None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(
            filter_from(Some("  "), Some("info")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn test_env_directives_win_over_level() {
        assert_eq!(
            filter_from(Some("trace"), Some("error")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
        // unparseable env directives fall back to the level argument
        assert_eq!(
            filter_from(Some("stride_log=notalevel"), Some("error")).max_level_hint(),
            Some(LevelFilter::ERROR)
        );
    }
}
