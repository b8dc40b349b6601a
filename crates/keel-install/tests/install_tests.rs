// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unit generation and install/uninstall against a temporary unit directory.

use std::fs;
use std::path::Path;

use keel_config::{KeelConfig, ServiceAccount, StartType};
use keel_core::ServiceError;
use keel_install::{Installer, render_unit};

const EXE: &str = "/usr/local/bin/keel";

fn config_with(account: ServiceAccount, start_type: StartType) -> KeelConfig {
    let mut config = KeelConfig::default();
    config.service.account = account;
    config.service.start_type = start_type;
    config
}

#[test]
fn default_config_renders_manual_network_service() {
    let unit = render_unit(&KeelConfig::default(), Path::new(EXE));

    assert!(unit.contains("Description=Keel Example Service\n"));
    assert!(unit.contains("After=network-online.target\n"));
    assert!(unit.contains("DynamicUser=yes\n"));
    assert!(unit.contains("Type=notify\n"));
    assert!(unit.contains("ExecStart=/usr/local/bin/keel run\n"));
    assert!(!unit.contains("[Install]"), "manual services have no target");
}

#[test]
fn local_system_runs_as_root() {
    let unit = render_unit(
        &config_with(ServiceAccount::LocalSystem, StartType::Manual),
        Path::new(EXE),
    );
    assert!(unit.contains("User=root\n"));
    assert!(!unit.contains("DynamicUser"));
    assert!(!unit.contains("network-online.target"));
}

#[test]
fn local_service_uses_dynamic_user_without_network() {
    let unit = render_unit(
        &config_with(ServiceAccount::LocalService, StartType::Manual),
        Path::new(EXE),
    );
    assert!(unit.contains("DynamicUser=yes\n"));
    assert!(!unit.contains("network-online.target"));
}

#[test]
fn named_user_account() {
    let unit = render_unit(
        &config_with(ServiceAccount::User("indexer".into()), StartType::Manual),
        Path::new(EXE),
    );
    assert!(unit.contains("User=indexer\n"));
}

#[test]
fn automatic_start_is_wanted_by_multi_user() {
    let unit = render_unit(
        &config_with(ServiceAccount::NetworkService, StartType::Automatic),
        Path::new(EXE),
    );
    assert!(unit.contains("[Install]\nWantedBy=multi-user.target\n"));
}

#[test]
fn disabled_start_has_comment_and_no_target() {
    let unit = render_unit(
        &config_with(ServiceAccount::NetworkService, StartType::Disabled),
        Path::new(EXE),
    );
    assert!(!unit.contains("WantedBy"));
    assert!(unit.contains("# Disabled"));
}

#[test]
fn exec_args_and_simple_type() {
    let mut config = KeelConfig::default();
    config.install.exec_args = vec!["--config".into(), "/etc/keel/alt.toml".into()];
    config.host.notify_systemd = false;
    let unit = render_unit(&config, Path::new(EXE));
    assert!(unit.contains("ExecStart=/usr/local/bin/keel run --config /etc/keel/alt.toml\n"));
    assert!(unit.contains("Type=simple\n"));
}

#[test]
fn install_then_uninstall_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let installer = Installer::new(dir.path().join("units"), EXE);
    let config = KeelConfig::default();

    assert!(!installer.is_installed("ExampleServer"));
    let path = installer.install(&config).unwrap();
    assert_eq!(path, dir.path().join("units/ExampleServer.service"));
    assert!(installer.is_installed("ExampleServer"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        render_unit(&config, Path::new(EXE))
    );

    let removed = installer.uninstall("ExampleServer").unwrap();
    assert_eq!(removed, path);
    assert!(!path.exists());
}

#[test]
fn install_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let installer = Installer::new(dir.path(), EXE);
    let config = KeelConfig::default();

    installer.install(&config).unwrap();
    let before = fs::read_to_string(installer.unit_path("ExampleServer")).unwrap();

    let mut changed = config.clone();
    changed.service.display_name = "Changed".into();
    let err = installer.install(&changed).unwrap_err();
    assert!(matches!(err, ServiceError::Install { .. }));
    assert!(err.to_string().contains("already installed"));

    let after = fs::read_to_string(installer.unit_path("ExampleServer")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn uninstall_missing_unit_fails() {
    let dir = tempfile::tempdir().unwrap();
    let installer = Installer::new(dir.path(), EXE);
    let err = installer.uninstall("ExampleServer").unwrap_err();
    assert!(err.to_string().contains("not installed"));
}

#[test]
fn invalid_names_are_rejected_before_touching_disk() {
    let dir = tempfile::tempdir().unwrap();
    let installer = Installer::new(dir.path(), EXE);
    let mut config = KeelConfig::default();
    config.service.name = "../escape".into();

    assert!(matches!(
        installer.install(&config),
        Err(ServiceError::Construction(_))
    ));
    assert!(matches!(
        installer.uninstall("../escape"),
        Err(ServiceError::Construction(_))
    ));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
