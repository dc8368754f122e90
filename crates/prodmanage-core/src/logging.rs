//! Tracing subscriber setup.
//!
//! Filter resolution: `PRODMANAGE_LOG`, then `log.level` from config, then `warn`.
//! Output goes to stderr so stdout stays clean for command output.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogConfig, paths};

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "PRODMANAGE_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Keeps the file writer alive; drop it last so buffered lines are flushed.
#[must_use]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Installs the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(config: &LogConfig) -> LogGuard {
    let filter = build_filter(config.level.as_deref());

    let (file_layer, guard) = if config.file {
        let appender = tracing_appender::rolling::daily(paths::logs_dir(), "prodmanage.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_ansi(false).with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();

    LogGuard { _file: guard }
}

fn build_filter(configured: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }

    configured
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configured_level_falls_back() {
        let filter = build_filter(Some("info,storage=notalevel"));
        assert!(filter.to_string().contains("warn"));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let config = LogConfig::default();
        let _first = init(&config);
        let _second = init(&config);
    }
}
