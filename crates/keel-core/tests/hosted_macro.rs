// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the `hosted!` capability declaration macro.

use keel_core::{
    hosted, Capability, CapabilitySet, Commandable, Hosted, Pauseable, PowerAware, PowerStatus,
    Resource, ServiceError, SessionAware, SessionChange, ShutdownAware,
};

struct Plain;

impl Resource for Plain {
    fn release(self) -> Result<(), ServiceError> {
        Ok(())
    }
}

hosted!(Plain);

#[derive(Default)]
struct Everything {
    last_command: Option<u32>,
    paused: bool,
}

impl Resource for Everything {
    fn release(self) -> Result<(), ServiceError> {
        Ok(())
    }
}

impl Commandable for Everything {
    fn on_custom_command(&mut self, command: u32) -> Result<(), ServiceError> {
        self.last_command = Some(command);
        Ok(())
    }
}

impl Pauseable for Everything {
    fn on_pause(&mut self) -> Result<(), ServiceError> {
        self.paused = true;
        Ok(())
    }

    fn on_continue(&mut self) -> Result<(), ServiceError> {
        self.paused = false;
        Ok(())
    }
}

impl ShutdownAware for Everything {
    fn on_shutdown(&mut self) -> Result<(), ServiceError> {
        Ok(())
    }
}

impl PowerAware for Everything {
    fn on_power_event(&mut self, status: PowerStatus) -> Result<bool, ServiceError> {
        Ok(status != PowerStatus::QuerySuspend)
    }
}

impl SessionAware for Everything {
    fn on_session_change(&mut self, _change: SessionChange) -> Result<(), ServiceError> {
        Ok(())
    }
}

hosted!(Everything: Commandable, Pauseable, ShutdownAware, PowerAware, SessionAware,);

struct CommandOnly;

impl Resource for CommandOnly {
    fn release(self) -> Result<(), ServiceError> {
        Ok(())
    }
}

impl Commandable for CommandOnly {
    fn on_custom_command(&mut self, _command: u32) -> Result<(), ServiceError> {
        Ok(())
    }
}

hosted!(CommandOnly: Commandable);

#[test]
fn plain_resource_declares_nothing() {
    assert_eq!(Plain::CAPABILITIES, CapabilitySet::NONE);
    let mut plain = Plain;
    assert!(plain.as_commandable().is_none());
    assert!(plain.as_pauseable().is_none());
    assert!(plain.as_shutdown_aware().is_none());
    assert!(plain.as_power_aware().is_none());
    assert!(plain.as_session_aware().is_none());
}

#[test]
fn full_resource_declares_everything() {
    assert_eq!(Everything::CAPABILITIES, CapabilitySet::ALL);
    let mut res = Everything::default();
    res.as_commandable().unwrap().on_custom_command(130).unwrap();
    assert_eq!(res.last_command, Some(130));
    res.as_pauseable().unwrap().on_pause().unwrap();
    assert!(res.paused);
    let answer = res
        .as_power_aware()
        .unwrap()
        .on_power_event(PowerStatus::QuerySuspend)
        .unwrap();
    assert!(!answer);
}

#[test]
fn accessors_agree_with_declared_set() {
    fn check<R: Hosted>(res: &mut R) {
        let caps = R::CAPABILITIES;
        assert_eq!(
            caps.contains(Capability::CustomCommand),
            res.as_commandable().is_some()
        );
        assert_eq!(
            caps.contains(Capability::PauseContinue),
            res.as_pauseable().is_some()
        );
        assert_eq!(
            caps.contains(Capability::Shutdown),
            res.as_shutdown_aware().is_some()
        );
        assert_eq!(
            caps.contains(Capability::PowerEvent),
            res.as_power_aware().is_some()
        );
        assert_eq!(
            caps.contains(Capability::SessionChange),
            res.as_session_aware().is_some()
        );
    }

    check(&mut Plain);
    check(&mut Everything::default());
    check(&mut CommandOnly);
}

#[test]
fn single_capability_declaration() {
    let caps = CommandOnly::CAPABILITIES;
    assert!(caps.contains(Capability::CustomCommand));
    assert_eq!(caps.iter().count(), 1);
}
