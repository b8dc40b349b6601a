// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translation of process signals into lifecycle actions.

use keel_config::HostConfig;
use keel_core::{CapabilitySet, PowerStatus, ServiceControl};
use strum::{Display, EnumIter};

/// A process signal the signal host listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum HostSignal {
    #[strum(serialize = "SIGTERM")]
    Terminate,
    #[strum(serialize = "SIGINT")]
    Interrupt,
    #[strum(serialize = "SIGQUIT")]
    Quit,
    #[strum(serialize = "SIGTSTP")]
    TerminalStop,
    #[strum(serialize = "SIGCONT")]
    Continue,
    #[strum(serialize = "SIGUSR1")]
    User1,
    #[strum(serialize = "SIGUSR2")]
    User2,
    #[strum(serialize = "SIGPWR")]
    Power,
}

/// What the host does in response to a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalAction {
    /// Stop the service and leave the host loop.
    Stop,
    /// Deliver the system-shutdown notice, then stop.
    ShutdownThenStop,
    /// Deliver a control and keep running.
    Deliver(ServiceControl),
    /// Nothing to do for this handler.
    Ignore,
}

/// Signal-to-action table derived from `[host]` config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalMap {
    usr1_command: u32,
    usr2_command: u32,
    pause_on_sigtstp: bool,
}

impl SignalMap {
    pub fn from_config(config: &HostConfig) -> Self {
        Self {
            usr1_command: config.usr1_command,
            usr2_command: config.usr2_command,
            pause_on_sigtstp: config.pause_on_sigtstp,
        }
    }

    /// Resolve `signal` for a handler accepting `accepted`.
    ///
    /// Optional controls outside `accepted` resolve to [`SignalAction::Ignore`].
    pub fn action(&self, signal: HostSignal, accepted: CapabilitySet) -> SignalAction {
        let control = match signal {
            HostSignal::Terminate | HostSignal::Interrupt => return SignalAction::Stop,
            HostSignal::Quit => return SignalAction::ShutdownThenStop,
            HostSignal::TerminalStop if self.pause_on_sigtstp => ServiceControl::Pause,
            HostSignal::Continue if self.pause_on_sigtstp => ServiceControl::Continue,
            HostSignal::TerminalStop | HostSignal::Continue => return SignalAction::Ignore,
            HostSignal::User1 => ServiceControl::CustomCommand(self.usr1_command),
            HostSignal::User2 => ServiceControl::CustomCommand(self.usr2_command),
            HostSignal::Power => ServiceControl::PowerEvent(PowerStatus::PowerStatusChange),
        };

        match control.capability() {
            Some(capability) if !accepted.contains(capability) => SignalAction::Ignore,
            _ => SignalAction::Deliver(control),
        }
    }
}

impl Default for SignalMap {
    fn default() -> Self {
        Self::from_config(&HostConfig::default())
    }
}
