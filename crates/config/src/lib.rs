pub mod schema;
pub mod watcher;

pub use schema::{MonitorConfig, SamplingConfig, ThemeConfig, WindowConfig};
pub use watcher::ConfigWatcher;

use std::path::{Path, PathBuf};
use sysmon_core::{MonitorError, Result};

/// Load configuration from a TOML file.  Returns `MonitorConfig::default()` if
/// the file doesn't exist so the monitor always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<MonitorConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(MonitorConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| MonitorError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse a config document.  Unset keys take their defaults.
pub fn parse(raw: &str) -> Result<MonitorConfig> {
    toml::from_str(raw).map_err(|e| MonitorError::Config(format!("TOML parse error: {e}")))
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("sysmon").join("sysmon.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.sampling, SamplingConfig::default());
        assert_eq!(cfg.window.title, "System Monitor");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = parse(
            r##"
            [sampling]
            interval_ms = 1000

            [theme]
            accent = "#ff0000"
            "##,
        )
        .unwrap();
        assert_eq!(cfg.sampling.interval_ms, 1000);
        assert_eq!(cfg.sampling.history_len, 60);
        assert_eq!(cfg.sampling.top_n, 5);
        assert_eq!(cfg.theme.accent, "#ff0000");
        assert_eq!(cfg.theme.background, "#121212");
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let err = parse("[sampling\ninterval_ms = ").unwrap_err();
        assert!(matches!(err, MonitorError::Config(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load("/nonexistent/sysmon/sysmon.toml").unwrap();
        assert_eq!(cfg.sampling.interval_ms, 4000);
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        assert!(default_path().ends_with("sysmon/sysmon.toml"));
    }
}
