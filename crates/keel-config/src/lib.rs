// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Keel service host.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and diagnostic
//! error rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use keel_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Service name: {}", config.service.name);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, SourceFile, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    HostConfig, InstallConfig, KeelConfig, LoggingConfig, ServiceAccount, ServiceConfig,
    StartType,
};

/// Load configuration from the XDG hierarchy and validate it.
///
/// On a Figment error, returns diagnostics with typo suggestions and
/// source spans; otherwise runs post-deserialization validation.
pub fn load_and_validate() -> Result<KeelConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(ConfigError::from_figment(err, &collect_toml_sources())),
    }
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<KeelConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let shown = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
            let sources: Vec<SourceFile> = std::fs::read_to_string(path)
                .map(|content| SourceFile::new(shown.display().to_string(), content))
                .into_iter()
                .collect();
            Err(ConfigError::from_figment(err, &sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<KeelConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = [SourceFile::new("<inline>", toml_content)];
            Err(ConfigError::from_figment(err, &sources))
        }
    }
}

/// Render a configuration as TOML, e.g. to show the effective settings.
pub fn to_toml(config: &KeelConfig) -> Result<String, ConfigError> {
    toml::to_string_pretty(config).map_err(|e| ConfigError::Other(e.to_string()))
}

/// Read back every config file that exists, for span lookup in diagnostics.
fn collect_toml_sources() -> Vec<SourceFile> {
    let local = std::env::current_dir()
        .map(|dir| dir.join(loader::LOCAL_CONFIG_FILE))
        .unwrap_or_else(|_| loader::LOCAL_CONFIG_FILE.into());

    [
        Some(Path::new(loader::SYSTEM_CONFIG_PATH).to_path_buf()),
        loader::user_config_path(),
        Some(local),
    ]
    .into_iter()
    .flatten()
    .filter_map(|path| {
        let content = std::fs::read_to_string(&path).ok()?;
        Some(SourceFile::new(path.display().to_string(), content))
    })
    .collect()
}
