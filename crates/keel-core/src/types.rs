// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the capability traits, the adapter, and hosts.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// One optional lifecycle behavior a hosted resource may opt into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    PauseContinue,
    Shutdown,
    PowerEvent,
    SessionChange,
    CustomCommand,
}

/// The set of capabilities a resource type declares.
///
/// Built in `const` context from a resource's `Hosted::CAPABILITIES` and
/// never mutated once an adapter has copied it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CapabilitySet {
    pub pause_continue: bool,
    pub shutdown: bool,
    pub power_event: bool,
    pub session_change: bool,
    pub custom_command: bool,
}

impl CapabilitySet {
    /// No optional capabilities.
    pub const NONE: Self = Self {
        pause_continue: false,
        shutdown: false,
        power_event: false,
        session_change: false,
        custom_command: false,
    };

    /// Every optional capability.
    pub const ALL: Self = Self {
        pause_continue: true,
        shutdown: true,
        power_event: true,
        session_change: true,
        custom_command: true,
    };

    /// Returns a copy of this set with `capability` added.
    pub const fn with(mut self, capability: Capability) -> Self {
        match capability {
            Capability::PauseContinue => self.pause_continue = true,
            Capability::Shutdown => self.shutdown = true,
            Capability::PowerEvent => self.power_event = true,
            Capability::SessionChange => self.session_change = true,
            Capability::CustomCommand => self.custom_command = true,
        }
        self
    }

    /// Whether `capability` is in the set.
    pub const fn contains(&self, capability: Capability) -> bool {
        match capability {
            Capability::PauseContinue => self.pause_continue,
            Capability::Shutdown => self.shutdown,
            Capability::PowerEvent => self.power_event,
            Capability::SessionChange => self.session_change,
            Capability::CustomCommand => self.custom_command,
        }
    }

    /// True when no optional capability is declared.
    pub const fn is_empty(&self) -> bool {
        !(self.pause_continue
            || self.shutdown
            || self.power_event
            || self.session_change
            || self.custom_command)
    }

    /// Iterates the declared capabilities in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::iter().filter(|c| self.contains(*c))
    }
}

impl std::fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}

/// Power broadcast notification delivered by the host.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PowerStatus {
    /// Battery power is low.
    BatteryLow,
    /// An OEM-defined power event.
    OemEvent,
    /// AC/battery source or charge level changed.
    PowerStatusChange,
    /// The system asks permission to suspend. Returning `false` denies it.
    QuerySuspend,
    /// A previously granted suspend was aborted.
    QuerySuspendFailed,
    /// The system woke up without user activity.
    ResumeAutomatic,
    /// The system resumed after a critical suspension.
    ResumeCritical,
    /// The system resumed after a normal suspension.
    ResumeSuspend,
    /// The system is about to suspend.
    Suspend,
}

/// Kind of change reported for a terminal session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SessionChangeReason {
    ConsoleConnect,
    ConsoleDisconnect,
    RemoteConnect,
    RemoteDisconnect,
    SessionLogon,
    SessionLogoff,
    SessionLock,
    SessionUnlock,
    SessionRemoteControl,
}

/// Describes a session change: which session, and what happened to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionChange {
    pub session_id: u32,
    pub reason: SessionChangeReason,
}

impl SessionChange {
    pub fn new(session_id: u32, reason: SessionChangeReason) -> Self {
        Self { session_id, reason }
    }
}

/// A lifecycle signal issued by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceControl {
    /// Start the service with the given invocation arguments.
    Start { args: Vec<String> },
    Stop,
    Pause,
    Continue,
    Shutdown,
    CustomCommand(u32),
    PowerEvent(PowerStatus),
    SessionChange(SessionChange),
}

impl ServiceControl {
    /// The capability a resource must declare to receive this control.
    ///
    /// `Start` and `Stop` are always accepted and return `None`.
    pub fn capability(&self) -> Option<Capability> {
        match self {
            ServiceControl::Start { .. } | ServiceControl::Stop => None,
            ServiceControl::Pause | ServiceControl::Continue => Some(Capability::PauseContinue),
            ServiceControl::Shutdown => Some(Capability::Shutdown),
            ServiceControl::CustomCommand(_) => Some(Capability::CustomCommand),
            ServiceControl::PowerEvent(_) => Some(Capability::PowerEvent),
            ServiceControl::SessionChange(_) => Some(Capability::SessionChange),
        }
    }

    /// Short lowercase label used in log fields.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceControl::Start { .. } => "start",
            ServiceControl::Stop => "stop",
            ServiceControl::Pause => "pause",
            ServiceControl::Continue => "continue",
            ServiceControl::Shutdown => "shutdown",
            ServiceControl::CustomCommand(_) => "custom-command",
            ServiceControl::PowerEvent(_) => "power-event",
            ServiceControl::SessionChange(_) => "session-change",
        }
    }
}

/// Result of dispatching a [`ServiceControl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlResponse {
    /// The control reached the resource (or changed the adapter's state).
    Handled,
    /// The control was a no-op: capability not advertised or nothing running.
    Ignored,
    /// Answer to a power event, either from the resource or the host default.
    Power(bool),
}

/// Whether the adapter currently holds a live resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum ServiceState {
    /// No resource is held: never started, or stopped.
    Stopped,
    /// A resource produced by the factory is live.
    Running,
}
