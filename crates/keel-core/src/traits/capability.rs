// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional capability contracts a hosted resource may implement.
//!
//! Each trait is independent of the others. A resource opts into any subset
//! and declares that subset through [`Hosted`](crate::Hosted), usually with
//! the [`hosted!`](crate::hosted) macro.

use crate::error::ServiceError;
use crate::types::{PowerStatus, SessionChange};

/// Receives custom commands sent to the service.
pub trait Commandable {
    /// Invoked with the raw command code. The adapter never interprets it.
    fn on_custom_command(&mut self, command: u32) -> Result<(), ServiceError>;
}

/// Supports pausing and continuing without being released.
pub trait Pauseable {
    /// Invoked when the host pauses the service.
    fn on_pause(&mut self) -> Result<(), ServiceError>;

    /// Invoked when the host continues a paused service.
    fn on_continue(&mut self) -> Result<(), ServiceError>;
}

/// Notified immediately before the system shuts down.
///
/// Advisory only: the resource cannot hold the shutdown back.
pub trait ShutdownAware {
    fn on_shutdown(&mut self) -> Result<(), ServiceError>;
}

/// Notified when the machine's power status changes.
pub trait PowerAware {
    /// Returns the resource's answer to the host. For
    /// [`PowerStatus::QuerySuspend`], `false` asks the host to deny the
    /// suspend; for other statuses the value is an acknowledgement.
    fn on_power_event(&mut self, status: PowerStatus) -> Result<bool, ServiceError>;
}

/// Notified about terminal session changes (logon, lock, remote connect...).
pub trait SessionAware {
    fn on_session_change(&mut self, change: SessionChange) -> Result<(), ServiceError>;
}
