// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Keel service host.

use thiserror::Error;

/// The primary error type used across capability traits, the lifecycle
/// adapter, and the hosts that drive it.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The adapter could not be constructed (invalid service name).
    #[error("cannot construct service: {0}")]
    Construction(String),

    /// The resource factory failed during start. No resource was recorded.
    #[error("service `{service}` failed to start: {source}")]
    Start {
        service: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Start was issued while a resource is already live.
    #[error("service `{service}` is already running")]
    AlreadyRunning { service: String },

    /// The resource failed while releasing its handles. The adapter has
    /// already dropped its reference when this is returned.
    #[error("service `{service}` failed to release its resource: {source}")]
    Release {
        service: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Raised by a hosted resource from one of its own handlers.
    #[error("resource error: {message}")]
    Resource {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The host environment failed (signal registration, notification socket).
    #[error("host error: {message}")]
    Host {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors surfaced outside the config loader.
    #[error("configuration error: {0}")]
    Config(String),

    /// Service registration with the host's service manager failed.
    #[error("install error: {message}")]
    Install {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Plain I/O failures.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    /// Shorthand for a resource-raised error without an underlying cause.
    pub fn resource(message: impl Into<String>) -> Self {
        ServiceError::Resource {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for an install error without an underlying cause.
    pub fn install(message: impl Into<String>) -> Self {
        ServiceError::Install {
            message: message.into(),
            source: None,
        }
    }
}
