// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions: capability contracts, the resource contract, and the
//! host boundary.

pub mod capability;
pub mod host;
pub mod resource;

pub use capability::{Commandable, Pauseable, PowerAware, SessionAware, ShutdownAware};
pub use host::{ControlHandler, ServiceHost};
pub use resource::{Hosted, Resource};
