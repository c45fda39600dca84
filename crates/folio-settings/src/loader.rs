//! Settings loading: defaults ← file (deep merge) ← environment overrides.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::{Result, SettingsError};
use crate::types::{FolioSettings, MailSettings};

/// Default settings file name, resolved relative to the working directory.
const SETTINGS_FILE: &str = "folio.json";

/// Resolve the settings file path.
///
/// `FOLIO_SETTINGS` overrides the default `folio.json`.
pub fn settings_path() -> PathBuf {
    std::env::var("FOLIO_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(SETTINGS_FILE))
}

/// Load settings from the default path with env overrides applied.
///
/// A missing file is not an error: defaults are used and only the
/// environment layer applies.
pub fn load_settings() -> Result<FolioSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific file path with env overrides applied.
pub fn load_settings_from_path(path: &Path) -> Result<FolioSettings> {
    let mut settings = if path.exists() {
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let overlay: Value =
            serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        let base = serde_json::to_value(FolioSettings::default())
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        let merged = deep_merge(base, overlay);
        serde_json::from_value(merged).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })?
    } else {
        FolioSettings::default()
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings.validate();
    Ok(settings)
}

/// Recursively merge `overlay` into `base`.
///
/// Objects merge key-by-key; any other overlay value replaces the base value.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                let _ = base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Apply `FOLIO_*` environment overrides (highest priority layer).
///
/// `lookup` abstracts `std::env::var` so tests can inject values without
/// mutating process environment.
pub fn apply_env_overrides(
    settings: &mut FolioSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(host) = lookup("FOLIO_HOST") {
        settings.server.host = host;
    }
    if let Some(port) = lookup("FOLIO_PORT") {
        match port.parse::<u16>() {
            Ok(port) => settings.server.port = port,
            Err(_) => tracing::warn!(value = %port, "FOLIO_PORT is not a valid port, ignoring"),
        }
    }
    if let Some(site_dir) = lookup("FOLIO_SITE_DIR") {
        settings.server.site_dir = site_dir;
    }
    if let Some(username) = lookup("FOLIO_GITHUB_USERNAME") {
        settings.github.username = username;
    }
    if let Some(endpoint) = lookup("FOLIO_MAIL_ENDPOINT") {
        let mail = settings.mail.get_or_insert_with(MailSettings::default);
        mail.endpoint = endpoint;
    }
    if let Some(token) = lookup("FOLIO_MAIL_TOKEN") {
        if let Some(mail) = settings.mail.as_mut() {
            mail.token = Some(token);
        }
    }
    if let Some(to) = lookup("FOLIO_NOTIFY_TO") {
        if let Some(mail) = settings.mail.as_mut() {
            mail.to = Some(to);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
