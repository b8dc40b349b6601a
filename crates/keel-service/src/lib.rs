// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle adapter for the Keel service host.
//!
//! [`ServiceAdapter`] hosts a single resource inside a service-control
//! lifecycle. It is constructed with a name and a factory, advertises the
//! resource type's [`CapabilitySet`](keel_core::CapabilitySet), creates the
//! resource on start, forwards optional signals the resource opted into,
//! and releases the resource on stop.
//!
//! # Usage
//!
//! ```
//! use keel_core::{hosted, ControlHandler, Resource, ServiceError};
//! use keel_service::ServiceAdapter;
//!
//! struct Server;
//!
//! impl Resource for Server {
//!     fn release(self) -> Result<(), ServiceError> {
//!         Ok(())
//!     }
//! }
//!
//! hosted!(Server);
//!
//! let mut adapter = ServiceAdapter::from_args("example", |_args| Ok(Server)).unwrap();
//! adapter.on_start(&[]).unwrap();
//! assert!(adapter.is_running());
//! adapter.on_stop().unwrap();
//! assert!(!adapter.is_running());
//! ```

pub mod adapter;

pub use adapter::{Factory, ServiceAdapter};
