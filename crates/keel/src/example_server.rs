// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The example resource hosted by the `keel` binary.

use std::time::Instant;

use keel_config::KeelConfig;
use keel_core::{Commandable, Pauseable, Resource, ServiceError, ServiceHandle, hosted};
use keel_service::ServiceAdapter;
use tracing::{debug, info, warn};

/// Custom command codes the example server understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleCommands {
    /// Log a status line.
    pub status: u32,
    /// Ask the host to stop the service.
    pub stop: u32,
}

impl ExampleCommands {
    /// Status on SIGUSR1's code, stop on SIGUSR2's.
    pub fn from_config(config: &KeelConfig) -> Self {
        Self {
            status: config.host.usr1_command,
            stop: config.host.usr2_command,
        }
    }
}

/// A resource that does no real work but logs every lifecycle event.
#[derive(Debug)]
pub struct ExampleServer {
    handle: ServiceHandle,
    commands: ExampleCommands,
    args: Vec<String>,
    started_at: Instant,
    paused: bool,
    commands_received: u64,
}

impl ExampleServer {
    pub fn start(
        args: &[String],
        handle: ServiceHandle,
        commands: ExampleCommands,
    ) -> Result<Self, ServiceError> {
        info!(
            service = %handle.service_name(),
            version = env!("CARGO_PKG_VERSION"),
            args = ?args,
            "example server starting"
        );
        Ok(Self {
            handle,
            commands,
            args: args.to_vec(),
            started_at: Instant::now(),
            paused: false,
            commands_received: 0,
        })
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn commands_received(&self) -> u64 {
        self.commands_received
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Resource for ExampleServer {
    fn release(self) -> Result<(), ServiceError> {
        info!(
            uptime_secs = self.started_at.elapsed().as_secs(),
            commands = self.commands_received,
            "example server stopping"
        );
        Ok(())
    }
}

impl Pauseable for ExampleServer {
    fn on_pause(&mut self) -> Result<(), ServiceError> {
        if self.paused {
            debug!("pause ignored, already paused");
        } else {
            self.paused = true;
            info!("example server paused");
        }
        Ok(())
    }

    fn on_continue(&mut self) -> Result<(), ServiceError> {
        if self.paused {
            self.paused = false;
            info!("example server resumed");
        } else {
            debug!("continue ignored, not paused");
        }
        Ok(())
    }
}

impl Commandable for ExampleServer {
    fn on_custom_command(&mut self, command: u32) -> Result<(), ServiceError> {
        self.commands_received += 1;
        if command == self.commands.status {
            info!(
                uptime_secs = self.started_at.elapsed().as_secs(),
                paused = self.paused,
                commands = self.commands_received,
                "example server status"
            );
        } else if command == self.commands.stop {
            info!(command, "stop command received");
            self.handle.request_stop(format!("custom command {command}"));
        } else {
            warn!(command, "unrecognised custom command");
        }
        Ok(())
    }
}

hosted!(ExampleServer: Pauseable, Commandable);

/// Adapter hosting [`ExampleServer`] under the configured service name.
pub fn adapter(config: &KeelConfig) -> Result<ServiceAdapter<ExampleServer>, ServiceError> {
    let commands = ExampleCommands::from_config(config);
    ServiceAdapter::new(
        config.service.name.clone(),
        move |args: &[String], handle: ServiceHandle| ExampleServer::start(args, handle, commands),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_core::{
        Capability, ControlHandler, ControlResponse, Hosted, PowerStatus, ServiceControl,
    };
    use tracing_test::traced_test;

    #[test]
    fn advertises_pause_and_commands_only() {
        let caps = ExampleServer::CAPABILITIES;
        assert!(caps.contains(Capability::PauseContinue));
        assert!(caps.contains(Capability::CustomCommand));
        assert!(!caps.contains(Capability::Shutdown));
        assert!(!caps.contains(Capability::PowerEvent));
        assert!(!caps.contains(Capability::SessionChange));
    }

    #[test]
    #[traced_test]
    fn lifecycle_logs_version_and_stopping() {
        let mut adapter = adapter(&KeelConfig::default()).unwrap();
        adapter.on_start(&["--demo".to_string()]).unwrap();
        assert!(logs_contain(env!("CARGO_PKG_VERSION")));
        assert_eq!(adapter.resource().unwrap().args(), ["--demo".to_string()]);

        adapter.on_stop().unwrap();
        assert!(logs_contain("example server stopping"));
    }

    #[test]
    fn pause_and_continue_toggle_state() {
        let mut adapter = adapter(&KeelConfig::default()).unwrap();
        adapter.on_start(&[]).unwrap();

        adapter.on_pause().unwrap();
        adapter.on_pause().unwrap();
        assert!(adapter.resource().unwrap().is_paused());
        adapter.on_continue().unwrap();
        assert!(!adapter.resource().unwrap().is_paused());
    }

    #[test]
    fn stop_command_requests_stop() {
        let config = KeelConfig::default();
        let mut adapter = adapter(&config).unwrap();
        let mut requests = adapter.take_stop_requests().unwrap();
        adapter.on_start(&[]).unwrap();

        adapter
            .dispatch(ServiceControl::CustomCommand(config.host.usr1_command))
            .unwrap();
        assert!(requests.try_recv().is_err());

        adapter
            .dispatch(ServiceControl::CustomCommand(config.host.usr2_command))
            .unwrap();
        let request = requests.try_recv().unwrap();
        assert_eq!(request.service, "ExampleServer");
        assert_eq!(adapter.resource().unwrap().commands_received(), 2);
    }

    #[test]
    fn unadvertised_signals_fall_back_to_host() {
        let mut adapter = adapter(&KeelConfig::default()).unwrap();
        adapter.on_start(&[]).unwrap();
        assert_eq!(
            adapter.dispatch(ServiceControl::Shutdown).unwrap(),
            ControlResponse::Ignored
        );
        assert_eq!(
            adapter
                .dispatch(ServiceControl::PowerEvent(PowerStatus::QuerySuspend))
                .unwrap(),
            ControlResponse::Power(true)
        );
    }
}
