// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive host for running a service from a terminal.

use std::future::Future;
use std::io;

use async_trait::async_trait;
use keel_core::{ControlHandler, ServiceError, ServiceHost};
use tracing::{error, info};

use crate::next_stop_request;

/// Starts the handler, waits for Ctrl+C or a stop request, then stops it.
#[derive(Debug, Clone, Default)]
pub struct ConsoleHost {
    quiet: bool,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the interactive prompt on stdout.
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Run until `interrupt` resolves or the service asks to stop.
    pub async fn run_until<H, F>(
        &self,
        handler: &mut H,
        args: Vec<String>,
        interrupt: F,
    ) -> Result<(), ServiceError>
    where
        H: ControlHandler + Send,
        F: Future<Output = io::Result<()>> + Send,
    {
        let service = handler.service_name().to_string();
        let mut stop_requests = handler.take_stop_requests();

        handler.on_start(&args)?;
        info!(service = %service, "service running in console mode");
        if !self.quiet {
            println!("{service} is running. Press Ctrl+C to stop.");
        }

        let outcome = tokio::select! {
            result = interrupt => result.map(|()| "interrupted".to_string()),
            Some(request) = next_stop_request(&mut stop_requests) => {
                Ok(format!("requested by service: {}", request.reason))
            }
        };

        match outcome {
            Ok(reason) => {
                info!(service = %service, reason = %reason, "stopping service");
                handler.on_stop()
            }
            Err(e) => {
                error!(service = %service, error = %e, "waiting for Ctrl+C failed");
                handler.on_stop()?;
                Err(ServiceError::Host {
                    message: "failed to listen for Ctrl+C".to_string(),
                    source: Some(Box::new(e)),
                })
            }
        }
    }
}

#[async_trait]
impl ServiceHost for ConsoleHost {
    fn kind(&self) -> &'static str {
        "console"
    }

    async fn run<H>(&self, handler: &mut H, args: Vec<String>) -> Result<(), ServiceError>
    where
        H: ControlHandler + Send,
    {
        self.run_until(handler, args, tokio::signal::ctrl_c()).await
    }
}
