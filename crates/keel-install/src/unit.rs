// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of systemd unit files from `[service]` config.

use std::fmt::Write as _;
use std::path::Path;

use keel_config::{KeelConfig, ServiceAccount, StartType};

/// Boot target automatic services are attached to.
pub const AUTOMATIC_TARGET: &str = "multi-user.target";

/// Target network-dependent services wait for.
pub const NETWORK_TARGET: &str = "network-online.target";

/// Render the unit file for `config.service`, started as `<exe> run`.
pub fn render_unit(config: &KeelConfig, exe: &Path) -> String {
    let service = &config.service;
    let mut unit = String::new();

    let _ = writeln!(
        unit,
        "# Generated by keel {}. Remove with `keel uninstall`.",
        env!("CARGO_PKG_VERSION")
    );
    if !service.description.trim().is_empty() {
        let _ = writeln!(unit, "# {}", service.description.trim());
    }

    unit.push_str("\n[Unit]\n");
    let _ = writeln!(unit, "Description={}", service.display_name.trim());
    if service.account == ServiceAccount::NetworkService {
        let _ = writeln!(unit, "Wants={NETWORK_TARGET}");
        let _ = writeln!(unit, "After={NETWORK_TARGET}");
    }

    unit.push_str("\n[Service]\n");
    let service_type = if config.host.notify_systemd {
        "notify"
    } else {
        "simple"
    };
    let _ = writeln!(unit, "Type={service_type}");
    let _ = writeln!(unit, "ExecStart={}", exec_start(exe, &config.install.exec_args));
    match &service.account {
        ServiceAccount::LocalSystem => unit.push_str("User=root\n"),
        ServiceAccount::LocalService | ServiceAccount::NetworkService => {
            unit.push_str("DynamicUser=yes\n");
        }
        ServiceAccount::User(name) => {
            let _ = writeln!(unit, "User={}", name.trim());
        }
    }

    match service.start_type {
        StartType::Automatic => {
            unit.push_str("\n[Install]\n");
            let _ = writeln!(unit, "WantedBy={AUTOMATIC_TARGET}");
        }
        StartType::Manual => {}
        StartType::Disabled => {
            unit.push_str("\n# Disabled: no install target, start explicitly or edit the config.\n");
        }
    }

    unit
}

/// The `ExecStart` command line: `<exe> run [extra args...]`.
pub fn exec_start(exe: &Path, extra: &[String]) -> String {
    let exe = exe.display().to_string();
    std::iter::once(exe.as_str())
        .chain(std::iter::once("run"))
        .chain(extra.iter().map(String::as_str))
        .map(quote_arg)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote one `ExecStart` word the way systemd parses it.
///
/// `%` is always doubled since systemd expands specifiers inside quotes too.
fn quote_arg(arg: &str) -> String {
    let escaped = arg.replace('%', "%%");
    let needs_quotes = escaped.is_empty()
        || escaped
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\' | ';'));
    if !needs_quotes {
        return escaped;
    }
    let mut quoted = String::with_capacity(escaped.len() + 2);
    quoted.push('"');
    for c in escaped.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
