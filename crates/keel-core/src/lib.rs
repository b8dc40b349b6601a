// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Keel service host.
//!
//! This crate provides the capability contracts a hosted resource may
//! implement, the mandatory [`Resource`] release contract, the
//! [`ControlHandler`]/[`ServiceHost`] boundary between hosts and services,
//! and the error and signal types shared by the workspace.

pub mod error;
pub mod handle;
pub mod name;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ServiceError;
pub use handle::{ServiceHandle, StopRequest, StopRequests};
pub use name::validate_service_name;
pub use types::{
    Capability, CapabilitySet, ControlResponse, PowerStatus, ServiceControl, ServiceState,
    SessionChange, SessionChangeReason,
};

pub use traits::{
    Commandable, ControlHandler, Hosted, Pauseable, PowerAware, Resource, ServiceHost,
    SessionAware, ShutdownAware,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn service_error_has_all_variants() {
        let _construction = ServiceError::Construction("test".into());
        let _start = ServiceError::Start {
            service: "svc".into(),
            source: Box::new(std::io::Error::other("test")),
        };
        let _running = ServiceError::AlreadyRunning {
            service: "svc".into(),
        };
        let _release = ServiceError::Release {
            service: "svc".into(),
            source: Box::new(std::io::Error::other("test")),
        };
        let _resource = ServiceError::resource("test");
        let _host = ServiceError::Host {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _config = ServiceError::Config("test".into());
        let _install = ServiceError::install("test");
        let _io = ServiceError::from(std::io::Error::other("test"));
    }

    #[test]
    fn capability_display_round_trips() {
        for capability in CapabilitySet::ALL.iter() {
            let s = capability.to_string();
            let parsed = Capability::from_str(&s).expect("should parse back");
            assert_eq!(capability, parsed);
        }
        assert_eq!(Capability::PauseContinue.to_string(), "pause-continue");
    }

    #[test]
    fn capability_set_with_and_contains_agree() {
        let set = CapabilitySet::NONE
            .with(Capability::Shutdown)
            .with(Capability::CustomCommand);
        assert!(set.contains(Capability::Shutdown));
        assert!(set.contains(Capability::CustomCommand));
        assert!(!set.contains(Capability::PauseContinue));
        assert!(!set.contains(Capability::PowerEvent));
        assert!(!set.contains(Capability::SessionChange));
        assert_eq!(set.iter().count(), 2);
        assert_eq!(set.to_string(), "shutdown, custom-command");
    }

    #[test]
    fn empty_set_displays_none() {
        assert!(CapabilitySet::NONE.is_empty());
        assert!(!CapabilitySet::ALL.is_empty());
        assert_eq!(CapabilitySet::NONE.to_string(), "none");
        assert_eq!(CapabilitySet::default(), CapabilitySet::NONE);
    }

    #[test]
    fn controls_map_to_capabilities() {
        assert_eq!(ServiceControl::Start { args: vec![] }.capability(), None);
        assert_eq!(ServiceControl::Stop.capability(), None);
        assert_eq!(
            ServiceControl::Pause.capability(),
            Some(Capability::PauseContinue)
        );
        assert_eq!(
            ServiceControl::Continue.capability(),
            Some(Capability::PauseContinue)
        );
        assert_eq!(
            ServiceControl::CustomCommand(200).capability(),
            Some(Capability::CustomCommand)
        );
        assert_eq!(
            ServiceControl::PowerEvent(PowerStatus::Suspend).capability(),
            Some(Capability::PowerEvent)
        );
    }

    #[test]
    fn session_change_serialization() {
        let change = SessionChange::new(3, SessionChangeReason::SessionLock);
        let json = serde_json::to_string(&change).expect("should serialize");
        assert!(json.contains("session-lock"));
        let parsed: SessionChange = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(change, parsed);
    }

    /// Handler that only overrides the mandatory methods.
    struct Bare {
        accepted: CapabilitySet,
        started: bool,
    }

    impl ControlHandler for Bare {
        fn service_name(&self) -> &str {
            "bare"
        }

        fn accepted_controls(&self) -> CapabilitySet {
            self.accepted
        }

        fn on_start(&mut self, _args: &[String]) -> Result<(), ServiceError> {
            self.started = true;
            Ok(())
        }

        fn on_stop(&mut self) -> Result<(), ServiceError> {
            self.started = false;
            Ok(())
        }
    }

    #[test]
    fn default_dispatch_ignores_unaccepted_controls() {
        let mut handler = Bare {
            accepted: CapabilitySet::NONE,
            started: false,
        };
        let resp = handler
            .dispatch(ServiceControl::Start { args: vec![] })
            .unwrap();
        assert_eq!(resp, ControlResponse::Handled);
        assert!(handler.started);

        assert_eq!(
            handler.dispatch(ServiceControl::Pause).unwrap(),
            ControlResponse::Ignored
        );
        assert_eq!(
            handler
                .dispatch(ServiceControl::PowerEvent(PowerStatus::QuerySuspend))
                .unwrap(),
            ControlResponse::Power(true)
        );
        assert_eq!(
            handler.dispatch(ServiceControl::Stop).unwrap(),
            ControlResponse::Handled
        );
        assert!(!handler.started);
    }

    #[test]
    fn default_dispatch_answers_accepted_power_event_with_host_default() {
        let mut handler = Bare {
            accepted: CapabilitySet::ALL,
            started: false,
        };
        assert_eq!(
            handler
                .dispatch(ServiceControl::PowerEvent(PowerStatus::BatteryLow))
                .unwrap(),
            ControlResponse::Power(true)
        );
        assert!(handler.take_stop_requests().is_none());
    }
}
