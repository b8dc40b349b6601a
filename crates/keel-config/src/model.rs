// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Keel service host.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level Keel configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KeelConfig {
    /// Service identity and registration settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Signal host settings.
    #[serde(default)]
    pub host: HostConfig,

    /// Service manager unit generation settings.
    #[serde(default)]
    pub install: InstallConfig,
}

/// Service identity and registration configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Name the service is registered under.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Human-readable name shown by service managers.
    #[serde(default = "default_display_name")]
    pub display_name: String,

    /// Longer description written into the unit file.
    #[serde(default = "default_description")]
    pub description: String,

    /// Account the service runs under.
    #[serde(default)]
    pub account: ServiceAccount,

    /// How the service manager starts the service.
    #[serde(default)]
    pub start_type: StartType,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            display_name: default_display_name(),
            description: default_description(),
            account: ServiceAccount::default(),
            start_type: StartType::default(),
        }
    }
}

fn default_service_name() -> String {
    "ExampleServer".to_string()
}

fn default_display_name() -> String {
    "Keel Example Service".to_string()
}

fn default_description() -> String {
    "Example resource hosted by the Keel service adapter".to_string()
}

/// Account a service runs under.
///
/// In TOML: `account = "network_service"` or `account = { user = "svc" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceAccount {
    /// Fully privileged system account.
    LocalSystem,
    /// Unprivileged local account without network identity.
    LocalService,
    /// Unprivileged account that needs the network.
    #[default]
    NetworkService,
    /// A named user account.
    User(String),
}

impl fmt::Display for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalSystem => f.write_str("local_system"),
            Self::LocalService => f.write_str("local_service"),
            Self::NetworkService => f.write_str("network_service"),
            Self::User(name) => write!(f, "user:{name}"),
        }
    }
}

/// Start mode registered with the service manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartType {
    /// Started only on request.
    #[default]
    Manual,
    /// Started at boot.
    Automatic,
    /// Registered but never started.
    Disabled,
}

/// Log output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Signal host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    /// Custom command code delivered on SIGUSR1.
    #[serde(default = "default_usr1_command")]
    pub usr1_command: u32,

    /// Custom command code delivered on SIGUSR2.
    #[serde(default = "default_usr2_command")]
    pub usr2_command: u32,

    /// Map SIGTSTP/SIGCONT to pause/continue.
    #[serde(default = "default_true")]
    pub pause_on_sigtstp: bool,

    /// Send readiness and stopping notifications to systemd.
    #[serde(default = "default_true")]
    pub notify_systemd: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            usr1_command: default_usr1_command(),
            usr2_command: default_usr2_command(),
            pause_on_sigtstp: true,
            notify_systemd: true,
        }
    }
}

fn default_usr1_command() -> u32 {
    128
}

fn default_usr2_command() -> u32 {
    129
}

fn default_true() -> bool {
    true
}

/// Service manager unit generation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InstallConfig {
    /// Directory unit files are written to.
    #[serde(default = "default_unit_dir")]
    pub unit_dir: String,

    /// Extra arguments appended to `ExecStart`.
    #[serde(default)]
    pub exec_args: Vec<String>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            unit_dir: default_unit_dir(),
            exec_args: Vec::new(),
        }
    }
}

fn default_unit_dir() -> String {
    "/etc/systemd/system".to_string()
}
