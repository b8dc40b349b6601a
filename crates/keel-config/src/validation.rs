// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as service name rules and custom command ranges.

use std::ops::RangeInclusive;

use keel_core::validate_service_name;

use crate::diagnostic::ConfigError;
use crate::model::{KeelConfig, ServiceAccount};

/// Accepted values for `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Custom command codes a service manager reserves for user-defined controls.
pub const CUSTOM_COMMAND_RANGE: RangeInclusive<u32> = 128..=255;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &KeelConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Err(reason) = validate_service_name(&config.service.name) {
        errors.push(ConfigError::validation(format!("service.name: {reason}")));
    }

    if config.service.display_name.trim().is_empty() {
        errors.push(ConfigError::validation(
            "service.display_name must not be empty",
        ));
    }

    if let ServiceAccount::User(user) = &config.service.account
        && user.trim().is_empty()
    {
        errors.push(ConfigError::validation(
            "service.account user name must not be empty",
        ));
    }

    let level = config.logging.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "logging.level `{}` is not one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        )));
    }

    for (key, code) in [
        ("host.usr1_command", config.host.usr1_command),
        ("host.usr2_command", config.host.usr2_command),
    ] {
        if !CUSTOM_COMMAND_RANGE.contains(&code) {
            errors.push(ConfigError::validation(format!(
                "{key} must be within {}..={}, got {code}",
                CUSTOM_COMMAND_RANGE.start(),
                CUSTOM_COMMAND_RANGE.end()
            )));
        }
    }

    if config.host.usr1_command == config.host.usr2_command {
        errors.push(ConfigError::validation(format!(
            "host.usr1_command and host.usr2_command must differ, both are {}",
            config.host.usr1_command
        )));
    }

    if config.install.unit_dir.trim().is_empty() {
        errors.push(ConfigError::validation(
            "install.unit_dir must not be empty",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
