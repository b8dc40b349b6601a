// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The boundary between a host environment and the service it runs.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::handle::StopRequests;
use crate::types::{CapabilitySet, ControlResponse, PowerStatus, ServiceControl, SessionChange};

/// What a host drives: one method per lifecycle signal.
///
/// Hosts deliver signals strictly one at a time; every method takes
/// `&mut self`. Hosts must only deliver optional signals whose capability is
/// in [`accepted_controls`](Self::accepted_controls).
pub trait ControlHandler {
    /// The registered service name.
    fn service_name(&self) -> &str;

    /// Optional controls this handler accepts. Fixed for the handler's lifetime.
    fn accepted_controls(&self) -> CapabilitySet;

    fn on_start(&mut self, args: &[String]) -> Result<(), ServiceError>;

    fn on_stop(&mut self) -> Result<(), ServiceError>;

    fn on_pause(&mut self) -> Result<(), ServiceError> {
        Ok(())
    }

    fn on_continue(&mut self) -> Result<(), ServiceError> {
        Ok(())
    }

    fn on_shutdown(&mut self) -> Result<(), ServiceError> {
        Ok(())
    }

    fn on_custom_command(&mut self, _command: u32) -> Result<(), ServiceError> {
        Ok(())
    }

    fn on_power_event(&mut self, status: PowerStatus) -> Result<bool, ServiceError> {
        Ok(self.default_power_response(status))
    }

    fn on_session_change(&mut self, _change: SessionChange) -> Result<(), ServiceError> {
        Ok(())
    }

    /// The host's own answer to a power event nobody handled.
    ///
    /// Grants every request, including suspend queries.
    fn default_power_response(&self, _status: PowerStatus) -> bool {
        true
    }

    /// Hands the host the receiver for stop requests raised by the service.
    ///
    /// Returns `None` if the handler has no such channel or it was already taken.
    fn take_stop_requests(&mut self) -> Option<StopRequests> {
        None
    }

    /// Routes a [`ServiceControl`] to the matching method.
    fn dispatch(&mut self, control: ServiceControl) -> Result<ControlResponse, ServiceError> {
        if let Some(capability) = control.capability()
            && !self.accepted_controls().contains(capability)
        {
            return Ok(match control {
                ServiceControl::PowerEvent(status) => {
                    ControlResponse::Power(self.default_power_response(status))
                }
                _ => ControlResponse::Ignored,
            });
        }

        match control {
            ServiceControl::Start { args } => self.on_start(&args)?,
            ServiceControl::Stop => self.on_stop()?,
            ServiceControl::Pause => self.on_pause()?,
            ServiceControl::Continue => self.on_continue()?,
            ServiceControl::Shutdown => self.on_shutdown()?,
            ServiceControl::CustomCommand(code) => self.on_custom_command(code)?,
            ServiceControl::PowerEvent(status) => {
                return Ok(ControlResponse::Power(self.on_power_event(status)?));
            }
            ServiceControl::SessionChange(change) => self.on_session_change(change)?,
        }
        Ok(ControlResponse::Handled)
    }
}

/// A host environment that runs a [`ControlHandler`] until it stops.
///
/// The host starts the handler with `args`, delivers signals until a stop
/// condition, and stops the handler before returning.
#[async_trait]
pub trait ServiceHost: Send + Sync {
    /// Short name for log output (`signal`, `console`, ...).
    fn kind(&self) -> &'static str;

    async fn run<H>(&self, handler: &mut H, args: Vec<String>) -> Result<(), ServiceError>
    where
        H: ControlHandler + Send;
}
