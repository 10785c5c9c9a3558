use std::{collections::HashMap, fs};

use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub gemini_model: String,
    pub gemini_temperature: f32,
    pub wikipedia_api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:5000".into(),
            gemini_api_key: None,
            gemini_api_url: "https://generativelanguage.googleapis.com".into(),
            gemini_model: "gemini-2.5-flash".into(),
            gemini_temperature: 0.7,
            wikipedia_api_url: "https://en.wikipedia.org/w/api.php".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file_overrides(&mut settings, &raw);
    }

    let env: HashMap<String, String> = std::env::vars().collect();
    apply_env_overrides(&mut settings, &env);

    settings
}

pub(crate) fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!(file = SETTINGS_FILE, error = %err, "ignoring unreadable settings file");
            return;
        }
    };

    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("gemini_api_url") {
        settings.gemini_api_url = v.clone();
    }
    if let Some(v) = file_cfg.get("gemini_model") {
        settings.gemini_model = v.clone();
    }
    if let Some(v) = file_cfg.get("gemini_temperature") {
        set_temperature(settings, v);
    }
    if let Some(v) = file_cfg.get("wikipedia_api_url") {
        settings.wikipedia_api_url = v.clone();
    }
}

pub(crate) fn apply_env_overrides(settings: &mut Settings, env: &HashMap<String, String>) {
    if let Some(v) = env.get("SERVER_BIND") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = env.get("APP__BIND_ADDR") {
        settings.server_bind = v.clone();
    }

    if let Some(v) = env.get("GEMINI_API_KEY").filter(|v| !v.trim().is_empty()) {
        settings.gemini_api_key = Some(v.trim().to_string());
    }

    if let Some(v) = env.get("APP__GEMINI_API_URL") {
        settings.gemini_api_url = v.clone();
    }
    if let Some(v) = env.get("APP__GEMINI_MODEL") {
        settings.gemini_model = v.clone();
    }
    if let Some(v) = env.get("APP__GEMINI_TEMPERATURE") {
        set_temperature(settings, v);
    }

    if let Some(v) = env.get("APP__WIKIPEDIA_API_URL") {
        settings.wikipedia_api_url = v.clone();
    }
}

fn set_temperature(settings: &mut Settings, raw: &str) {
    match raw.trim().parse::<f32>() {
        Ok(parsed) if (0.0..=2.0).contains(&parsed) => settings.gemini_temperature = parsed,
        _ => warn!(value = raw, "ignoring invalid gemini temperature"),
    }
}

/// Key with the middle elided, for startup logs.
pub fn obfuscate_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
