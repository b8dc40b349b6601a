// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hosts that run a [`ControlHandler`](keel_core::ControlHandler).
//!
//! - [`SignalHost`] runs as a background service: process signals become
//!   lifecycle controls and systemd is notified of readiness.
//! - [`ConsoleHost`] runs interactively until Ctrl+C.

pub mod console;
pub mod notify;
pub mod signal_host;
pub mod signals;

pub use console::ConsoleHost;
pub use notify::Notifier;
pub use signal_host::SignalHost;
pub use signals::{HostSignal, SignalAction, SignalMap};

use keel_core::{StopRequest, StopRequests};

/// Next stop request from the service; pends forever without a channel.
pub(crate) async fn next_stop_request(rx: &mut Option<StopRequests>) -> Option<StopRequest> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
