// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service-mode host driven by process signals.
//!
//! OS signals are forwarded into a channel by background listener tasks;
//! the host loop consumes that channel one signal at a time, so the handler
//! never sees two lifecycle calls at once.

use async_trait::async_trait;
use keel_config::HostConfig;
use keel_core::{ControlHandler, ServiceControl, ServiceError, ServiceHost};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::next_stop_request;
use crate::notify::Notifier;
use crate::signals::{HostSignal, SignalAction, SignalMap};

/// Signals buffered between the listeners and the host loop.
const SIGNAL_BUFFER: usize = 16;

/// Runs a handler as a background service until told to stop.
#[derive(Debug, Clone)]
pub struct SignalHost {
    map: SignalMap,
    #[cfg_attr(not(unix), allow(dead_code))]
    pause_on_sigtstp: bool,
    notifier: Notifier,
}

impl SignalHost {
    pub fn new(config: &HostConfig) -> Self {
        Self {
            map: SignalMap::from_config(config),
            pause_on_sigtstp: config.pause_on_sigtstp,
            notifier: Notifier::new(config.notify_systemd),
        }
    }

    /// Replace the service manager notifier.
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn signal_map(&self) -> &SignalMap {
        &self.map
    }

    /// Drive `handler` from an explicit signal stream instead of OS signals.
    ///
    /// Returns after the handler has been stopped: on a stop signal, on a
    /// stop request from the service, or when `signals` closes.
    pub async fn run_with_signals<H>(
        &self,
        handler: &mut H,
        args: Vec<String>,
        signals: &mut mpsc::Receiver<HostSignal>,
    ) -> Result<(), ServiceError>
    where
        H: ControlHandler + Send,
    {
        let service = handler.service_name().to_string();
        let mut stop_requests = handler.take_stop_requests();

        if let Err(e) = handler.on_start(&args) {
            error!(service = %service, error = %e, "service failed to start");
            return Err(e);
        }
        self.notifier.ready();
        self.notifier.status("running");
        info!(
            service = %service,
            accepted = %handler.accepted_controls(),
            "service running, waiting for signals"
        );

        let reason = loop {
            tokio::select! {
                received = signals.recv() => {
                    let Some(signal) = received else {
                        break "signal source closed".to_string();
                    };
                    match self.map.action(signal, handler.accepted_controls()) {
                        SignalAction::Stop => break format!("received {signal}"),
                        SignalAction::ShutdownThenStop => {
                            if let Err(e) = handler.dispatch(ServiceControl::Shutdown) {
                                warn!(service = %service, error = %e, "shutdown notice failed");
                            }
                            break format!("received {signal}");
                        }
                        SignalAction::Deliver(control) => {
                            let label = control.label();
                            match handler.dispatch(control) {
                                Ok(response) => debug!(
                                    service = %service,
                                    %signal,
                                    control = label,
                                    ?response,
                                    "control delivered"
                                ),
                                Err(e) => warn!(
                                    service = %service,
                                    %signal,
                                    control = label,
                                    error = %e,
                                    "control failed"
                                ),
                            }
                        }
                        SignalAction::Ignore => {
                            debug!(service = %service, %signal, "signal ignored");
                        }
                    }
                }
                Some(request) = next_stop_request(&mut stop_requests) => {
                    break format!("requested by service: {}", request.reason);
                }
            }
        };

        info!(service = %service, reason = %reason, "stopping service");
        self.notifier.stopping();
        handler.on_stop()
    }

    /// Spawn one listener task per OS signal, forwarding into `tx`.
    #[cfg(unix)]
    fn spawn_listeners(
        &self,
        tx: mpsc::Sender<HostSignal>,
        cancel: &CancellationToken,
    ) -> Result<(), ServiceError> {
        use tokio::signal::unix::{SignalKind, signal};

        let mut kinds = vec![
            (HostSignal::Terminate, SignalKind::terminate()),
            (HostSignal::Interrupt, SignalKind::interrupt()),
            (HostSignal::Quit, SignalKind::quit()),
            (HostSignal::User1, SignalKind::user_defined1()),
            (HostSignal::User2, SignalKind::user_defined2()),
        ];
        if self.pause_on_sigtstp {
            kinds.push((HostSignal::TerminalStop, SignalKind::from_raw(libc::SIGTSTP)));
            kinds.push((HostSignal::Continue, SignalKind::from_raw(libc::SIGCONT)));
        }
        #[cfg(any(target_os = "linux", target_os = "android"))]
        kinds.push((HostSignal::Power, SignalKind::from_raw(libc::SIGPWR)));

        for (host_signal, kind) in kinds {
            let mut stream = signal(kind).map_err(|e| ServiceError::Host {
                message: format!("failed to install {host_signal} handler"),
                source: Some(Box::new(e)),
            })?;
            let tx = tx.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        received = stream.recv() => {
                            if received.is_none() || tx.send(host_signal).await.is_err() {
                                break;
                            }
                        }
                    }
                }
                debug!(signal = %host_signal, "signal listener finished");
            });
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn spawn_listeners(
        &self,
        tx: mpsc::Sender<HostSignal>,
        cancel: &CancellationToken,
    ) -> Result<(), ServiceError> {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    received = tokio::signal::ctrl_c() => {
                        if received.is_err() || tx.send(HostSignal::Interrupt).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });
        Ok(())
    }
}

#[async_trait]
impl ServiceHost for SignalHost {
    fn kind(&self) -> &'static str {
        "signal"
    }

    async fn run<H>(&self, handler: &mut H, args: Vec<String>) -> Result<(), ServiceError>
    where
        H: ControlHandler + Send,
    {
        let (tx, mut rx) = mpsc::channel(SIGNAL_BUFFER);
        let cancel = CancellationToken::new();
        self.spawn_listeners(tx, &cancel)?;

        let result = self.run_with_signals(handler, args, &mut rx).await;
        cancel.cancel();
        result
    }
}
