// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./keel.toml` > `~/.config/keel/keel.toml` > `/etc/keel/keel.toml`
//! with environment variable overrides via `KEEL_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::KeelConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/keel/keel.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "keel.toml";

/// Top-level sections that `KEEL_*` variables may address.
const SECTIONS: &[&str] = &["service", "logging", "host", "install"];

/// Path of the per-user config file, if a config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("keel").join("keel.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/keel/keel.toml` (system-wide)
/// 3. `~/.config/keel/keel.toml` (user XDG config)
/// 4. `./keel.toml` (local directory)
/// 5. `KEEL_*` environment variables
pub fn load_config() -> Result<KeelConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a specific TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<KeelConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeelConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
///
/// Unlike the XDG lookup, a missing file here is an error.
pub fn load_config_from_path(path: &Path) -> Result<KeelConfig, figment::Error> {
    if !path.is_file() {
        return Err(figment::Error::from(format!(
            "config file `{}` does not exist",
            path.display()
        )));
    }
    tracing::debug!(path = %path.display(), "loading explicit config file");
    Figment::new()
        .merge(Serialized::defaults(KeelConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for XDG config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(KeelConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider with explicit section mapping.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `KEEL_HOST_USR1_COMMAND` maps to `host.usr1_command`.
fn env_provider() -> Env {
    Env::prefixed("KEEL_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped env var name to a dotted config key.
///
/// Figment passes the name with its original case, so matching is done on
/// the lowercased name. Names that do not start with a known section are
/// passed through and rejected later by `deny_unknown_fields`.
pub fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section)
            && let Some(field) = rest.strip_prefix('_')
            && !field.is_empty()
        {
            return format!("{section}.{field}");
        }
    }
    key
}
