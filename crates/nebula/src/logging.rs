//! File logging. The terminal belongs to the UI, so logs go to
//! `nebula.log` in the platform data directory.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "nebula=info";
const LOG_FILE: &str = "nebula.log";

/// Pick the filter directive: `RUST_LOG` wins, then the config's
/// `log_level`, then the default. Empty or unparsable candidates are skipped.
fn directive(env: Option<String>, log_level: Option<&str>) -> String {
    env.into_iter()
        .chain(log_level.map(str::to_owned))
        .find(|d| !d.trim().is_empty() && EnvFilter::try_new(d).is_ok())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_owned())
}

fn filter(log_level: Option<&str>) -> EnvFilter {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    EnvFilter::new(directive(env, log_level))
}

/// Install the global subscriber. Returns the log file path, or `None` when
/// no writable location exists and logging stays disabled.
pub fn init(log_level: Option<&str>) -> Option<PathBuf> {
    let dir = nebula_config::log_dir().ok()?;
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(log_level))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .ok()?;
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_directive_wins() {
        assert_eq!(directive(Some("warn".into()), Some("nebula=debug")), "warn");
    }

    #[test]
    fn test_config_level_used_without_env() {
        assert_eq!(directive(None, Some("nebula=debug")), "nebula=debug");
        assert_eq!(directive(Some("  ".into()), Some("nebula=debug")), "nebula=debug");
    }

    #[test]
    fn test_bad_directive_falls_back() {
        assert_eq!(
            directive(Some("nebula=loud".into()), Some("nebula=trace")),
            "nebula=trace"
        );
        assert_eq!(directive(None, Some("nebula=loud")), DEFAULT_DIRECTIVE);
        assert_eq!(directive(None, None), DEFAULT_DIRECTIVE);
    }
}
