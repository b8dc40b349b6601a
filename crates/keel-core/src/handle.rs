// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handle a hosted resource keeps to ask the host to stop it.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A stop request raised by the resource itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopRequest {
    pub service: String,
    pub reason: String,
}

/// Receiving side of the stop-request channel, drained by the host.
pub type StopRequests = mpsc::UnboundedReceiver<StopRequest>;

/// Cloneable handle passed to the resource factory on start.
///
/// Sending never blocks, so resources may call [`request_stop`](Self::request_stop)
/// from any thread, including their own worker threads.
#[derive(Debug, Clone)]
pub struct ServiceHandle {
    service: Arc<str>,
    tx: mpsc::UnboundedSender<StopRequest>,
}

impl ServiceHandle {
    /// Creates a handle and the matching receiver for the host.
    pub fn channel(service: &str) -> (Self, StopRequests) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = Self {
            service: Arc::from(service),
            tx,
        };
        (handle, rx)
    }

    /// Name of the service this handle belongs to.
    pub fn service_name(&self) -> &str {
        &self.service
    }

    /// Asks the host to stop the service.
    ///
    /// Returns `false` when no host is listening any more.
    pub fn request_stop(&self, reason: impl Into<String>) -> bool {
        let reason = reason.into();
        debug!(service = %self.service, reason = %reason, "stop requested by resource");
        let request = StopRequest {
            service: self.service.to_string(),
            reason,
        };
        match self.tx.send(request) {
            Ok(()) => true,
            Err(_) => {
                warn!(service = %self.service, "stop request dropped, host is gone");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_reaches_receiver() {
        let (handle, mut rx) = ServiceHandle::channel("svc");
        assert!(handle.request_stop("done"));
        let req = rx.try_recv().unwrap();
        assert_eq!(req.service, "svc");
        assert_eq!(req.reason, "done");
    }

    #[test]
    fn clones_share_the_channel() {
        let (handle, mut rx) = ServiceHandle::channel("svc");
        let other = handle.clone();
        other.request_stop("from clone");
        assert_eq!(rx.try_recv().unwrap().reason, "from clone");
        assert_eq!(other.service_name(), "svc");
    }

    #[test]
    fn request_after_receiver_dropped_returns_false() {
        let (handle, rx) = ServiceHandle::channel("svc");
        drop(rx);
        assert!(!handle.request_stop("too late"));
    }
}
