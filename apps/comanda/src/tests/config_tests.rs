use super::*;

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_without_file_or_env() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings =
        load_settings_with(&dir.path().join("absent.toml"), env_from(&[])).expect("settings");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.api_url, "http://192.168.0.10:5000");
    assert_eq!(settings.api_timeout, Duration::from_secs(10));
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("comanda.toml");
    fs::write(
        &path,
        "api_url = \"http://localhost:5000\"\napi_timeout_secs = 3\nchat_reply_delay_ms = 250\n",
    )
    .expect("write");

    let settings = load_settings_with(&path, env_from(&[])).expect("settings");

    assert_eq!(settings.api_url, "http://localhost:5000");
    assert_eq!(settings.api_timeout, Duration::from_secs(3));
    assert_eq!(settings.chat_reply_delay, Duration::from_millis(250));
    assert_eq!(settings.token_path, Settings::default().token_path);
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("comanda.toml");
    fs::write(&path, "api_url = \"http://from-file\"\n").expect("write");

    let settings = load_settings_with(
        &path,
        env_from(&[
            ("COMANDA_API_URL", "http://from-env"),
            ("APP__API_URL", "http://from-app-env"),
            ("APP__TOKEN_PATH", "/tmp/token.json"),
        ]),
    )
    .expect("settings");

    assert_eq!(settings.api_url, "http://from-app-env");
    assert_eq!(settings.token_path, PathBuf::from("/tmp/token.json"));
}

#[test]
fn non_numeric_env_values_are_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_with(
        &dir.path().join("absent.toml"),
        env_from(&[
            ("APP__API_TIMEOUT_SECS", "soon"),
            ("APP__CHAT_REPLY_DELAY_MS", "5"),
        ]),
    )
    .expect("settings");

    assert_eq!(settings.api_timeout, DEFAULT_TIMEOUT);
    assert_eq!(settings.chat_reply_delay, Duration::from_millis(5));
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("comanda.toml");
    fs::write(&path, "api_timeout_secs = \"ten\"\n").expect("write");

    let err = load_settings_with(&path, env_from(&[])).expect_err("bad type");
    assert!(err.to_string().contains("invalid settings file"));
}
