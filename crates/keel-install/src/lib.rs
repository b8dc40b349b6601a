// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service registration with systemd.
//!
//! The `[service]` config section becomes a `<name>.service` unit: the
//! account selects `User=`/`DynamicUser=`, the start type selects the
//! `[Install]` target, and `ExecStart` runs this binary in service mode.

pub mod installer;
pub mod unit;

pub use installer::Installer;
pub use unit::{exec_start, render_unit};
