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
fn reads_explicit_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.toml");
    fs::write(&path, "max_attempts = 3\ntick_interval_ms = 50\n").expect("write config");

    let settings = read_config_file(&path).expect("load");

    assert_eq!(settings.max_attempts, 3);
    assert_eq!(settings.tick_interval_ms, 50);
    assert_eq!(settings.auto_reset_delay_ms, 1_000);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");

    let err = load_settings(Some(path.as_path())).expect_err("missing file");
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn malformed_file_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "max_attempts = \"many\"").expect("write config");

    let err = read_config_file(&path).expect_err("bad value");
    match err {
        ConfigError::Parse { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn environment_overrides_file_values() {
    let mut settings = EngineConfig {
        max_attempts: 3,
        ..EngineConfig::default()
    };

    apply_env_overrides(
        &mut settings,
        env_from(&[
            (ENV_MAX_ATTEMPTS, "7"),
            (ENV_AUTO_RESET_DELAY_MS, " 0 "),
        ]),
    );

    assert_eq!(settings.max_attempts, 7);
    assert_eq!(settings.tick_interval_ms, 100);
    assert_eq!(settings.auto_reset_delay_ms, 0);
}

#[test]
fn unparseable_environment_values_are_ignored() {
    let mut settings = EngineConfig::default();

    apply_env_overrides(
        &mut settings,
        env_from(&[(ENV_MAX_ATTEMPTS, "five"), (ENV_TICK_INTERVAL_MS, "-1")]),
    );

    assert_eq!(settings, EngineConfig::default());
}
