// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Writing and removing unit files.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use keel_config::KeelConfig;
use keel_core::{ServiceError, validate_service_name};
use tracing::{debug, info};

use crate::unit::render_unit;

/// Registers services by writing `<name>.service` into a unit directory.
#[derive(Debug, Clone)]
pub struct Installer {
    unit_dir: PathBuf,
    exe: PathBuf,
}

impl Installer {
    pub fn new(unit_dir: impl Into<PathBuf>, exe: impl Into<PathBuf>) -> Self {
        Self {
            unit_dir: unit_dir.into(),
            exe: exe.into(),
        }
    }

    /// Installer for the running executable, writing to `install.unit_dir`.
    pub fn for_current_exe(config: &KeelConfig) -> Result<Self, ServiceError> {
        let exe = std::env::current_exe().map_err(|e| ServiceError::Install {
            message: "cannot locate the running executable".to_string(),
            source: Some(Box::new(e)),
        })?;
        Ok(Self::new(&config.install.unit_dir, exe))
    }

    pub fn unit_dir(&self) -> &Path {
        &self.unit_dir
    }

    /// Path of the unit file for `name`.
    pub fn unit_path(&self, name: &str) -> PathBuf {
        self.unit_dir.join(format!("{name}.service"))
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.unit_path(name).is_file()
    }

    /// Write the unit for `config.service`. Refuses to overwrite.
    pub fn install(&self, config: &KeelConfig) -> Result<PathBuf, ServiceError> {
        let name = &config.service.name;
        validate_service_name(name).map_err(ServiceError::Construction)?;

        fs::create_dir_all(&self.unit_dir).map_err(|e| ServiceError::Install {
            message: format!("cannot create unit directory {}", self.unit_dir.display()),
            source: Some(Box::new(e)),
        })?;

        let path = self.unit_path(name);
        let contents = render_unit(config, &self.exe);
        debug!(path = %path.display(), bytes = contents.len(), "writing unit file");

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(ServiceError::install(format!(
                    "service `{name}` is already installed at {}",
                    path.display()
                )));
            }
            Err(e) => {
                return Err(ServiceError::Install {
                    message: format!("cannot create {}", path.display()),
                    source: Some(Box::new(e)),
                });
            }
        };

        if let Err(e) = file.write_all(contents.as_bytes()) {
            // Do not leave a truncated unit behind.
            let _ = fs::remove_file(&path);
            return Err(ServiceError::Install {
                message: format!("cannot write {}", path.display()),
                source: Some(Box::new(e)),
            });
        }

        info!(
            service = %name,
            path = %path.display(),
            account = %config.service.account,
            start_type = ?config.service.start_type,
            "service installed"
        );
        Ok(path)
    }

    /// Remove the unit for `name`. Fails when it is not installed.
    pub fn uninstall(&self, name: &str) -> Result<PathBuf, ServiceError> {
        validate_service_name(name).map_err(ServiceError::Construction)?;
        let path = self.unit_path(name);

        match fs::remove_file(&path) {
            Ok(()) => {
                info!(service = %name, path = %path.display(), "service uninstalled");
                Ok(path)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ServiceError::install(format!(
                "service `{name}` is not installed (no {})",
                path.display()
            ))),
            Err(e) => Err(ServiceError::Install {
                message: format!("cannot remove {}", path.display()),
                source: Some(Box::new(e)),
            }),
        }
    }
}
