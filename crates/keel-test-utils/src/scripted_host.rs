// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host that replays a fixed script of controls.
//!
//! `ScriptedHost` implements [`ServiceHost`] without any OS signals: it
//! starts the handler, delivers each scripted control in order, honours stop
//! requests raised by the resource between controls, and stops the handler
//! at the end of the script.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use keel_core::{ControlHandler, ControlResponse, ServiceControl, ServiceError, ServiceHost};

/// Outcome of one scripted control, with the error rendered to a string.
pub type Outcome = (ServiceControl, Result<ControlResponse, String>);

/// A host that delivers a predefined list of controls.
pub struct ScriptedHost {
    script: Vec<ServiceControl>,
    outcomes: Mutex<Vec<Outcome>>,
    /// Whether a control error aborts the script.
    stop_on_error: bool,
}

impl ScriptedHost {
    /// Create a host that replays `script`, continuing past handler errors.
    pub fn new(script: Vec<ServiceControl>) -> Self {
        Self {
            script,
            outcomes: Mutex::new(Vec::new()),
            stop_on_error: false,
        }
    }

    /// Abort the script on the first failing control. The handler is still
    /// stopped, and the control's error is returned.
    pub fn stop_on_error(mut self) -> Self {
        self.stop_on_error = true;
        self
    }

    /// Every control delivered so far, with its outcome.
    pub async fn outcomes(&self) -> Vec<Outcome> {
        self.outcomes.lock().await.clone()
    }
}

#[async_trait]
impl ServiceHost for ScriptedHost {
    fn kind(&self) -> &'static str {
        "scripted"
    }

    async fn run<H>(&self, handler: &mut H, args: Vec<String>) -> Result<(), ServiceError>
    where
        H: ControlHandler + Send,
    {
        let mut stop_requests = handler.take_stop_requests();
        handler.on_start(&args)?;

        for control in self.script.iter().cloned() {
            if let Some(rx) = stop_requests.as_mut()
                && let Ok(request) = rx.try_recv()
            {
                debug!(reason = %request.reason, "scripted host honouring stop request");
                break;
            }

            let result = handler.dispatch(control.clone());
            let recorded = match &result {
                Ok(resp) => Ok(*resp),
                Err(e) => Err(e.to_string()),
            };
            self.outcomes.lock().await.push((control, recorded));

            if let Err(e) = result
                && self.stop_on_error
            {
                if let Err(stop_err) = handler.on_stop() {
                    warn!(error = %stop_err, "stop after failed control also failed");
                }
                return Err(e);
            }
        }

        handler.on_stop()
    }
}
