//! # Settings Loader
//!
//! Centralized configuration loading for the finance coach server. Settings
//! come from an optional JSON file (`settings.json` by default) and are then
//! overridden by environment variables.
//!
//! ## Features
//!
//! - Load settings from specified file paths
//! - Load settings from default location (`settings.json`)
//! - Fall back to built-in defaults when no settings file is present
//! - Apply `HOST`, `PORT`, `DATA_DIR` and `AI_*` environment overrides
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! // Load settings from a specific path
//! let settings = settings_loader::load_settings("config/settings.json")?;
//!
//! // File (if any) plus environment overrides
//! let path = Some(PathBuf::from("settings.json"));
//! let settings = settings_loader::load_from_env(path.as_ref())?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! The AI API key is never read from a settings file; it only comes from
//! the `AI_API_KEY` environment variable.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use models::{ProviderKind, Settings};

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Loads settings from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    Ok(settings)
}

/// Loads settings from a default location (settings.json in the current directory)
pub fn load_default_settings() -> Result<Settings> {
    load_settings(DEFAULT_SETTINGS_FILE)
}

/// Loads the settings file at `path`, or the default file, or built-in defaults.
///
/// A file that exists but cannot be parsed is an error. A missing file is not.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<Settings> {
    if let Some(settings_path) = path {
        if settings_file_exists(settings_path) {
            return load_settings(settings_path);
        }
        tracing::warn!(path = %settings_path.display(), "Settings file not found, trying defaults");
    }

    if default_settings_exist() {
        return load_default_settings();
    }

    Ok(Settings::default())
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}

/// Checks if the default settings file (settings.json) exists
pub fn default_settings_exist() -> bool {
    settings_file_exists(DEFAULT_SETTINGS_FILE)
}

/// Applies environment overrides using `lookup` to read variables.
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(mut settings: Settings, lookup: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(host) = var("HOST") {
        settings.server.host = host;
    }
    if let Some(port) = var("PORT") {
        match port.parse() {
            Ok(port) => settings.server.port = port,
            Err(_) => tracing::warn!(value = %port, "Ignoring unparsable PORT"),
        }
    }
    if let Some(dir) = var("DATA_DIR") {
        settings.storage.data_dir = dir;
    }
    if let Some(provider) = var("AI_PROVIDER") {
        settings.ai.provider = provider.parse::<ProviderKind>().map_err(|e| anyhow!(e))?;
    }
    if let Some(model) = var("AI_MODEL") {
        settings.ai.model = Some(model);
    }
    if let Some(url) = var("AI_API_URL") {
        settings.ai.api_url = Some(url);
    }
    if let Some(url) = var("OLLAMA_BASE_URL") {
        settings.ai.ollama_base_url = Some(url);
    }
    if let Some(secs) = var("AI_TIMEOUT_SECS") {
        match secs.parse() {
            Ok(secs) => settings.ai.timeout_secs = secs,
            Err(_) => tracing::warn!(value = %secs, "Ignoring unparsable AI_TIMEOUT_SECS"),
        }
    }

    Ok(settings)
}

/// Loads settings from `path` (see [`load_settings_with_fallback`]) and
/// applies the process environment on top.
pub fn load_from_env(path: Option<&PathBuf>) -> Result<Settings> {
    let settings = load_settings_with_fallback(path)?;
    apply_env_overrides(settings, |name| std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_load_settings_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"server": {{"port": 8081}}, "ai": {{"provider": "ollama"}}}}"#).unwrap();

        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.ai.provider, ProviderKind::Ollama);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let path = file.path().to_path_buf();
        assert!(load_settings(&path).is_err());
        assert!(load_settings_with_fallback(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(!settings_file_exists(&path));

        let settings = load_settings_with_fallback(Some(&path)).unwrap();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.storage.data_dir, "data");
    }

    #[test]
    fn test_env_overrides() {
        let settings = apply_env_overrides(
            Settings::default(),
            env(&[
                ("HOST", "0.0.0.0"),
                ("PORT", "8080"),
                ("DATA_DIR", "/var/lib/coach"),
                ("AI_PROVIDER", "HuggingFace"),
                ("AI_MODEL", "mistral"),
                ("AI_TIMEOUT_SECS", "10"),
                ("AI_API_URL", "  "),
            ]),
        )
        .unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.storage.data_dir, "/var/lib/coach");
        assert_eq!(settings.ai.provider, ProviderKind::HuggingFace);
        assert_eq!(settings.ai.model.as_deref(), Some("mistral"));
        assert_eq!(settings.ai.timeout_secs, 10);
        assert!(settings.ai.api_url.is_none());
    }

    #[test]
    fn test_unparsable_numbers_keep_previous_values() {
        let settings =
            apply_env_overrides(Settings::default(), env(&[("PORT", "http"), ("AI_TIMEOUT_SECS", "-1")])).unwrap();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.ai.timeout_secs, 30);
    }

    #[test]
    fn test_unknown_provider_is_an_error() {
        assert!(apply_env_overrides(Settings::default(), env(&[("AI_PROVIDER", "openai")])).is_err());
    }
}
