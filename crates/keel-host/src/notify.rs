// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! systemd readiness notifications.
//!
//! Outside systemd (`NOTIFY_SOCKET` unset) and on non-Unix targets every
//! call is a no-op.

use strum::Display;
use tracing::{debug, warn};

/// Lifecycle transitions reported to the service manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
enum Transition {
    #[strum(serialize = "READY=1")]
    Ready,
    #[strum(serialize = "STOPPING=1")]
    Stopping,
}

/// Sends `READY=1`, `STATUS=` and `STOPPING=1` to the service manager.
#[derive(Debug, Clone, Copy)]
pub struct Notifier {
    enabled: bool,
}

impl Notifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// A notifier that never sends anything.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn ready(&self) {
        self.send(Transition::Ready);
    }

    pub fn stopping(&self) {
        self.send(Transition::Stopping);
    }

    pub fn status(&self, status: &str) {
        self.send_status(status);
    }

    #[cfg(unix)]
    fn send(&self, transition: Transition) {
        use sd_notify::NotifyState;

        if !self.enabled {
            return;
        }
        let state = match transition {
            Transition::Ready => NotifyState::Ready,
            Transition::Stopping => NotifyState::Stopping,
        };
        match sd_notify::notify(false, &[state]) {
            Ok(()) => debug!(state = %transition, "service manager notified"),
            Err(e) => warn!(state = %transition, error = %e, "service manager notification failed"),
        }
    }

    #[cfg(unix)]
    fn send_status(&self, status: &str) {
        if !self.enabled {
            return;
        }
        if let Err(e) = sd_notify::notify(false, &[sd_notify::NotifyState::Status(status)]) {
            warn!(error = %e, "service manager status update failed");
        }
    }

    #[cfg(not(unix))]
    fn send(&self, transition: Transition) {
        if self.enabled {
            debug!(state = %transition, "no service manager notification on this platform");
        }
    }

    #[cfg(not(unix))]
    fn send_status(&self, _status: &str) {}
}
