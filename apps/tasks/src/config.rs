use std::{fs, path::Path};

use anyhow::Context;
use client_core::{
    store::{PLACEHOLDER_ANON_KEY, PLACEHOLDER_STORE_URL},
    ConfigError, StoreConfig,
};
use serde::Deserialize;
use shared::protocol::DEFAULT_TABLE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store_url: String,
    pub anon_key: String,
    pub table: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_url: PLACEHOLDER_STORE_URL.into(),
            anon_key: PLACEHOLDER_ANON_KEY.into(),
            table: DEFAULT_TABLE.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    store_url: Option<String>,
    anon_key: Option<String>,
    table: Option<String>,
}

impl Settings {
    pub fn store_config(&self) -> Result<StoreConfig, ConfigError> {
        StoreConfig::new(&self.store_url, &self.anon_key, &self.table)
    }

    fn apply_file(&mut self, raw: &str) -> anyhow::Result<()> {
        let file_cfg: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file_cfg.store_url {
            self.store_url = v;
        }
        if let Some(v) = file_cfg.anon_key {
            self.anon_key = v;
        }
        if let Some(v) = file_cfg.table {
            self.table = v;
        }
        Ok(())
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("SUPABASE_URL") {
            self.store_url = v;
        }
        if let Some(v) = var("APP__STORE_URL") {
            self.store_url = v;
        }

        if let Some(v) = var("SUPABASE_ANON_KEY") {
            self.anon_key = v;
        }
        if let Some(v) = var("APP__ANON_KEY") {
            self.anon_key = v;
        }

        if let Some(v) = var("APP__TABLE") {
            self.table = v;
        }
    }
}

/// Defaults, then the config file (a missing file is fine), then environment.
pub fn load_settings(config_path: &Path) -> anyhow::Result<Settings> {
    load_settings_with(config_path, |name| std::env::var(name).ok())
}

fn load_settings_with(
    config_path: &Path,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        settings
            .apply_file(&raw)
            .with_context(|| format!("failed to parse config file '{}'", config_path.display()))?;
    }

    settings.apply_env(var);
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
