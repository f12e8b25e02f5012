use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILE_PREFIX: &str = "mentor-engine.log";
const DEFAULT_LOG_DIR: &str = "./logs";

/// Cron scheduler internals log every tick at debug.
const QUIET_TARGETS: &[&str] = &["tokio_cron_scheduler=warn"];

pub struct FileLogGuard {
    _guard: WorkerGuard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLogSettings {
    pub dir: String,
    pub file_prefix: String,
}

impl FileLogSettings {
    /// `None` unless `ENABLE_FILE_LOGS` is `true` or `1`.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let enabled = lookup("ENABLE_FILE_LOGS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        if !enabled {
            return None;
        }

        Some(Self {
            dir: lookup("LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()),
            file_prefix: lookup("LOG_FILE_PREFIX")
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FILE_PREFIX.to_string()),
        })
    }
}

fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(filter_directives(log_level)).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Directives for `log_level`, with scheduler chatter capped unless the caller names it.
fn filter_directives(log_level: &str) -> String {
    let mut directives = log_level.trim().to_string();
    for quiet in QUIET_TARGETS {
        let target = quiet.split('=').next().unwrap_or_default();
        if !directives.contains(target) {
            if !directives.is_empty() {
                directives.push(',');
            }
            directives.push_str(quiet);
        }
    }
    directives
}

/// Installs the global subscriber. A second call leaves the first one in place.
pub fn init_tracing(log_level: &str) -> Option<FileLogGuard> {
    let env_filter = build_filter(log_level);
    let stdout_layer = fmt::layer().with_target(true);

    let file = FileLogSettings::from_env().and_then(|settings| {
        match std::fs::create_dir_all(&settings.dir) {
            Ok(()) => Some(settings),
            Err(err) => {
                eprintln!("failed to create log directory {}: {err}", settings.dir);
                None
            }
        }
    });

    let Some(settings) = file else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stdout_layer)
            .try_init()
            .unwrap_or_else(|err| eprintln!("tracing already initialised: {err}"));
        return None;
    };

    let appender = RollingFileAppender::new(Rotation::DAILY, &settings.dir, &settings.file_prefix);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .unwrap_or_else(|err| eprintln!("tracing already initialised: {err}"));

    Some(FileLogGuard { _guard: guard })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn file_logging_off_by_default() {
        assert_eq!(FileLogSettings::from_lookup(lookup(&[])), None);
        assert_eq!(
            FileLogSettings::from_lookup(lookup(&[("ENABLE_FILE_LOGS", "no")])),
            None
        );
    }

    #[test]
    fn file_prefix_override_and_fallback() {
        let settings = FileLogSettings::from_lookup(lookup(&[
            ("ENABLE_FILE_LOGS", "1"),
            ("LOG_DIR", "/tmp/mentor"),
            ("LOG_FILE_PREFIX", "session.log"),
        ]))
        .unwrap();
        assert_eq!(settings.dir, "/tmp/mentor");
        assert_eq!(settings.file_prefix, "session.log");

        let settings = FileLogSettings::from_lookup(lookup(&[
            ("ENABLE_FILE_LOGS", "true"),
            ("LOG_FILE_PREFIX", "  "),
        ]))
        .unwrap();
        assert_eq!(settings.dir, DEFAULT_LOG_DIR);
        assert_eq!(settings.file_prefix, DEFAULT_FILE_PREFIX);
    }

    #[test]
    fn scheduler_target_quieted_unless_named() {
        assert_eq!(filter_directives("debug"), "debug,tokio_cron_scheduler=warn");
        assert_eq!(
            filter_directives("info,tokio_cron_scheduler=trace"),
            "info,tokio_cron_scheduler=trace"
        );
        assert_eq!(filter_directives(""), "tokio_cron_scheduler=warn");
    }
}
