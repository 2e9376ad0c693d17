use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(name: &str, contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("tasks_config_{name}_{suffix}.toml"));
    fs::write(&path, contents).expect("write config");
    path
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_are_unconfigured() {
    let settings = Settings::default();
    assert_eq!(settings.table, "tasks");
    assert_eq!(
        settings.store_config().unwrap_err(),
        ConfigError::Missing("store url")
    );
}

#[test]
fn missing_file_keeps_defaults() {
    let path = env::temp_dir().join("tasks_config_test_does_not_exist.toml");
    let settings = load_settings_with(&path, no_env).expect("load");
    assert_eq!(settings, Settings::default());
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config(
        "file_values",
        r#"
store_url = "https://demo.supabase.co"
anon_key = "file-key"
"#,
    );

    let settings = load_settings_with(&path, no_env).expect("load");
    fs::remove_file(&path).expect("cleanup");

    assert_eq!(settings.store_url, "https://demo.supabase.co");
    assert_eq!(settings.anon_key, "file-key");
    assert_eq!(settings.table, "tasks");
    assert!(settings.store_config().is_ok());
}

#[test]
fn environment_overrides_file_and_app_prefix_wins() {
    let path = temp_config(
        "env_override",
        "store_url = \"https://file.supabase.co\"\ntable = \"todo\"\n",
    );
    let vars: HashMap<&str, &str> = HashMap::from([
        ("SUPABASE_URL", "https://env.supabase.co"),
        ("APP__STORE_URL", "https://app.supabase.co"),
        ("SUPABASE_ANON_KEY", "env-key"),
    ]);

    let settings = load_settings_with(&path, |name| vars.get(name).map(|v| v.to_string()))
        .expect("load");
    fs::remove_file(&path).expect("cleanup");

    assert_eq!(settings.store_url, "https://app.supabase.co");
    assert_eq!(settings.anon_key, "env-key");
    assert_eq!(settings.table, "todo");
}

#[test]
fn malformed_file_is_an_error() {
    let path = temp_config("malformed", "store_url = [unterminated");
    let err = load_settings_with(&path, no_env).expect_err("must fail");
    fs::remove_file(&path).expect("cleanup");
    assert!(err.to_string().contains("failed to parse config file"));
}
