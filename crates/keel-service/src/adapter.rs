// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic lifecycle adapter hosting a single resource.
//!
//! `ServiceAdapter` owns the resource between start and stop, advertises the
//! resource type's capabilities to the host, and forwards each optional
//! signal only when the capability is advertised and a resource is live.

use std::time::Instant;

use keel_core::{
    Capability, CapabilitySet, ControlHandler, ControlResponse, Hosted, PowerStatus,
    ServiceControl, ServiceError, ServiceHandle, ServiceState, SessionChange, StopRequests,
    validate_service_name,
};
use tracing::{debug, error, info, trace, warn};

/// Factory invoked on every start. Receives the invocation arguments and a
/// handle the resource may keep to request its own stop.
pub type Factory<R> = Box<dyn FnMut(&[String], ServiceHandle) -> Result<R, ServiceError> + Send>;

/// Hosts one resource of type `R` inside the service lifecycle.
pub struct ServiceAdapter<R: Hosted> {
    name: String,
    factory: Factory<R>,
    capabilities: CapabilitySet,
    resource: Option<R>,
    handle: ServiceHandle,
    stop_requests: Option<StopRequests>,
}

impl<R: Hosted> ServiceAdapter<R> {
    /// Creates an adapter from a name and a factory that receives the
    /// service handle.
    ///
    /// Fails with [`ServiceError::Construction`] when the name is invalid.
    pub fn new<F>(name: impl Into<String>, factory: F) -> Result<Self, ServiceError>
    where
        F: FnMut(&[String], ServiceHandle) -> Result<R, ServiceError> + Send + 'static,
    {
        let name = name.into();
        validate_service_name(&name).map_err(ServiceError::Construction)?;

        let capabilities = R::CAPABILITIES;
        let (handle, stop_requests) = ServiceHandle::channel(&name);

        info!(
            service = %name,
            capabilities = %capabilities,
            "service adapter constructed"
        );

        Ok(Self {
            name,
            factory: Box::new(factory),
            capabilities,
            resource: None,
            handle,
            stop_requests: Some(stop_requests),
        })
    }

    /// Creates an adapter from a factory that only needs the arguments.
    pub fn from_args<F>(name: impl Into<String>, mut create: F) -> Result<Self, ServiceError>
    where
        F: FnMut(&[String]) -> Result<R, ServiceError> + Send + 'static,
    {
        Self::new(name, move |args: &[String], _handle: ServiceHandle| create(args))
    }

    /// The registered service name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capabilities advertised for `R`, fixed at construction.
    pub fn capabilities(&self) -> CapabilitySet {
        self.capabilities
    }

    pub fn state(&self) -> ServiceState {
        if self.resource.is_some() {
            ServiceState::Running
        } else {
            ServiceState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.resource.is_some()
    }

    /// The live resource, if the service is running.
    pub fn resource(&self) -> Option<&R> {
        self.resource.as_ref()
    }

    pub fn resource_mut(&mut self) -> Option<&mut R> {
        self.resource.as_mut()
    }

    /// A clone of the handle passed to the factory.
    pub fn handle(&self) -> ServiceHandle {
        self.handle.clone()
    }

    fn start_resource(&mut self, args: &[String]) -> Result<(), ServiceError> {
        if self.resource.is_some() {
            warn!(service = %self.name, "start ignored, service already running");
            return Err(ServiceError::AlreadyRunning {
                service: self.name.clone(),
            });
        }

        info!(service = %self.name, args = args.len(), "starting service");
        let started = Instant::now();

        match (self.factory)(args, self.handle.clone()) {
            Ok(resource) => {
                self.resource = Some(resource);
                info!(
                    service = %self.name,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "service running"
                );
                Ok(())
            }
            Err(e) => {
                error!(service = %self.name, error = %e, "resource factory failed");
                Err(ServiceError::Start {
                    service: self.name.clone(),
                    source: Box::new(e),
                })
            }
        }
    }

    fn stop_resource(&mut self) -> Result<(), ServiceError> {
        // The reference is cleared before release runs, so a failing release
        // never leaves a half-stopped resource behind.
        let Some(resource) = self.resource.take() else {
            debug!(service = %self.name, "stop ignored, service not running");
            return Ok(());
        };

        info!(service = %self.name, "stopping service");
        resource.release().map_err(|e| {
            error!(service = %self.name, error = %e, "resource release failed");
            ServiceError::Release {
                service: self.name.clone(),
                source: Box::new(e),
            }
        })?;
        info!(service = %self.name, "service stopped");
        Ok(())
    }

    /// Runs `call` against the live resource when `capability` is advertised.
    ///
    /// Returns `Ok(None)` when the signal did not reach the resource.
    fn forward<O>(
        &mut self,
        capability: Capability,
        signal: &'static str,
        call: impl FnOnce(&mut R) -> Option<Result<O, ServiceError>>,
    ) -> Result<Option<O>, ServiceError> {
        if !self.capabilities.contains(capability) {
            trace!(service = %self.name, signal, "capability not advertised, ignoring");
            return Ok(None);
        }

        let Some(resource) = self.resource.as_mut() else {
            debug!(service = %self.name, signal, "service not running, ignoring");
            return Ok(None);
        };

        match call(resource) {
            Some(Ok(out)) => {
                debug!(service = %self.name, signal, "signal delivered");
                Ok(Some(out))
            }
            Some(Err(e)) => {
                warn!(service = %self.name, signal, error = %e, "resource handler failed");
                Err(e)
            }
            None => {
                warn!(
                    service = %self.name,
                    signal,
                    "resource declares capability but exposes no handler"
                );
                Ok(None)
            }
        }
    }

    fn pause_resource(&mut self) -> Result<Option<()>, ServiceError> {
        self.forward(Capability::PauseContinue, "pause", |r| {
            r.as_pauseable().map(|p| p.on_pause())
        })
    }

    fn continue_resource(&mut self) -> Result<Option<()>, ServiceError> {
        self.forward(Capability::PauseContinue, "continue", |r| {
            r.as_pauseable().map(|p| p.on_continue())
        })
    }

    fn shutdown_resource(&mut self) -> Result<Option<()>, ServiceError> {
        self.forward(Capability::Shutdown, "shutdown", |r| {
            r.as_shutdown_aware().map(|s| s.on_shutdown())
        })
    }

    fn command_resource(&mut self, command: u32) -> Result<Option<()>, ServiceError> {
        self.forward(Capability::CustomCommand, "custom-command", |r| {
            r.as_commandable().map(|c| c.on_custom_command(command))
        })
    }

    fn power_resource(&mut self, status: PowerStatus) -> Result<bool, ServiceError> {
        let answer = self.forward(Capability::PowerEvent, "power-event", |r| {
            r.as_power_aware().map(|p| p.on_power_event(status))
        })?;
        Ok(answer.unwrap_or_else(|| self.default_power_response(status)))
    }

    fn session_resource(&mut self, change: SessionChange) -> Result<Option<()>, ServiceError> {
        self.forward(Capability::SessionChange, "session-change", |r| {
            r.as_session_aware().map(|s| s.on_session_change(change))
        })
    }
}

fn delivered(outcome: Option<()>) -> ControlResponse {
    match outcome {
        Some(()) => ControlResponse::Handled,
        None => ControlResponse::Ignored,
    }
}

impl<R: Hosted> ControlHandler for ServiceAdapter<R> {
    fn service_name(&self) -> &str {
        &self.name
    }

    fn accepted_controls(&self) -> CapabilitySet {
        self.capabilities
    }

    fn on_start(&mut self, args: &[String]) -> Result<(), ServiceError> {
        self.start_resource(args)
    }

    fn on_stop(&mut self) -> Result<(), ServiceError> {
        self.stop_resource()
    }

    fn on_pause(&mut self) -> Result<(), ServiceError> {
        self.pause_resource().map(|_| ())
    }

    fn on_continue(&mut self) -> Result<(), ServiceError> {
        self.continue_resource().map(|_| ())
    }

    fn on_shutdown(&mut self) -> Result<(), ServiceError> {
        self.shutdown_resource().map(|_| ())
    }

    fn on_custom_command(&mut self, command: u32) -> Result<(), ServiceError> {
        self.command_resource(command).map(|_| ())
    }

    fn on_power_event(&mut self, status: PowerStatus) -> Result<bool, ServiceError> {
        self.power_resource(status)
    }

    fn on_session_change(&mut self, change: SessionChange) -> Result<(), ServiceError> {
        self.session_resource(change).map(|_| ())
    }

    fn take_stop_requests(&mut self) -> Option<StopRequests> {
        self.stop_requests.take()
    }

    fn dispatch(&mut self, control: ServiceControl) -> Result<ControlResponse, ServiceError> {
        match control {
            ServiceControl::Start { args } => {
                self.start_resource(&args)?;
                Ok(ControlResponse::Handled)
            }
            ServiceControl::Stop => {
                let was_running = self.is_running();
                self.stop_resource()?;
                Ok(if was_running {
                    ControlResponse::Handled
                } else {
                    ControlResponse::Ignored
                })
            }
            ServiceControl::Pause => self.pause_resource().map(delivered),
            ServiceControl::Continue => self.continue_resource().map(delivered),
            ServiceControl::Shutdown => self.shutdown_resource().map(delivered),
            ServiceControl::CustomCommand(code) => self.command_resource(code).map(delivered),
            ServiceControl::PowerEvent(status) => {
                self.power_resource(status).map(ControlResponse::Power)
            }
            ServiceControl::SessionChange(change) => {
                self.session_resource(change).map(delivered)
            }
        }
    }
}

impl<R: Hosted> std::fmt::Debug for ServiceAdapter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAdapter")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .field("state", &self.state())
            .finish()
    }
}
