use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use client_core::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use screens::chat::DEFAULT_REPLY_DELAY;
use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE: &str = "comanda.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub api_timeout: Duration,
    pub token_path: PathBuf,
    pub chat_reply_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            api_timeout: DEFAULT_TIMEOUT,
            token_path: PathBuf::from("./data/session.json"),
            chat_reply_delay: DEFAULT_REPLY_DELAY,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    api_timeout_secs: Option<u64>,
    token_path: Option<PathBuf>,
    chat_reply_delay_ms: Option<u64>,
}

pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_with(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file if present, then environment variables.
pub fn load_settings_with(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        let file_cfg: FileSettings = toml::from_str(&raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?;
        if let Some(v) = file_cfg.api_url {
            settings.api_url = v;
        }
        if let Some(v) = file_cfg.api_timeout_secs {
            settings.api_timeout = Duration::from_secs(v);
        }
        if let Some(v) = file_cfg.token_path {
            settings.token_path = v;
        }
        if let Some(v) = file_cfg.chat_reply_delay_ms {
            settings.chat_reply_delay = Duration::from_millis(v);
        }
    }

    if let Some(v) = env("COMANDA_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = env("APP__API_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(secs) => settings.api_timeout = Duration::from_secs(secs),
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__API_TIMEOUT_SECS"),
        }
    }

    if let Some(v) = env("APP__TOKEN_PATH") {
        settings.token_path = PathBuf::from(v);
    }

    if let Some(v) = env("APP__CHAT_REPLY_DELAY_MS") {
        match v.parse::<u64>() {
            Ok(ms) => settings.chat_reply_delay = Duration::from_millis(ms),
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__CHAT_REPLY_DELAY_MS"),
        }
    }

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
