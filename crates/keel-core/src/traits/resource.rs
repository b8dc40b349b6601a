// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The mandatory release contract and the static capability declaration.

use crate::error::ServiceError;
use crate::traits::capability::{Commandable, Pauseable, PowerAware, SessionAware, ShutdownAware};
use crate::types::CapabilitySet;

/// A user-defined unit of work that holds handles, connections, or threads.
///
/// `release` consumes the resource, so it can run at most once per instance.
pub trait Resource {
    /// Releases everything the resource holds.
    fn release(self) -> Result<(), ServiceError>
    where
        Self: Sized;
}

/// Static declaration of which capability contracts a resource type satisfies.
///
/// `CAPABILITIES` and the `as_*` accessors must agree: a capability is in
/// the set iff its accessor returns `Some`. The [`hosted!`](crate::hosted)
/// macro generates both from one list, and its `Some(self)` accessors only
/// compile when the type implements the named trait.
pub trait Hosted: Resource {
    /// Capabilities advertised to the host for this resource type.
    const CAPABILITIES: CapabilitySet = CapabilitySet::NONE;

    fn as_commandable(&mut self) -> Option<&mut dyn Commandable> {
        None
    }

    fn as_pauseable(&mut self) -> Option<&mut dyn Pauseable> {
        None
    }

    fn as_shutdown_aware(&mut self) -> Option<&mut dyn ShutdownAware> {
        None
    }

    fn as_power_aware(&mut self) -> Option<&mut dyn PowerAware> {
        None
    }

    fn as_session_aware(&mut self) -> Option<&mut dyn SessionAware> {
        None
    }
}

/// Implements [`Hosted`] for a type from the list of capability traits it
/// implements.
///
/// ```
/// use keel_core::{hosted, Capability, Hosted, Pauseable, Resource, ServiceError};
///
/// struct Worker;
///
/// impl Resource for Worker {
///     fn release(self) -> Result<(), ServiceError> {
///         Ok(())
///     }
/// }
///
/// impl Pauseable for Worker {
///     fn on_pause(&mut self) -> Result<(), ServiceError> {
///         Ok(())
///     }
///     fn on_continue(&mut self) -> Result<(), ServiceError> {
///         Ok(())
///     }
/// }
///
/// hosted!(Worker: Pauseable);
///
/// assert!(Worker::CAPABILITIES.contains(Capability::PauseContinue));
/// assert!(!Worker::CAPABILITIES.contains(Capability::Shutdown));
/// ```
///
/// A resource with no optional capabilities is declared with `hosted!(Type)`.
#[macro_export]
macro_rules! hosted {
    (@cap Commandable) => { $crate::Capability::CustomCommand };
    (@cap Pauseable) => { $crate::Capability::PauseContinue };
    (@cap ShutdownAware) => { $crate::Capability::Shutdown };
    (@cap PowerAware) => { $crate::Capability::PowerEvent };
    (@cap SessionAware) => { $crate::Capability::SessionChange };

    (@accessor Commandable) => {
        fn as_commandable(&mut self) -> ::core::option::Option<&mut dyn $crate::Commandable> {
            ::core::option::Option::Some(self)
        }
    };
    (@accessor Pauseable) => {
        fn as_pauseable(&mut self) -> ::core::option::Option<&mut dyn $crate::Pauseable> {
            ::core::option::Option::Some(self)
        }
    };
    (@accessor ShutdownAware) => {
        fn as_shutdown_aware(&mut self) -> ::core::option::Option<&mut dyn $crate::ShutdownAware> {
            ::core::option::Option::Some(self)
        }
    };
    (@accessor PowerAware) => {
        fn as_power_aware(&mut self) -> ::core::option::Option<&mut dyn $crate::PowerAware> {
            ::core::option::Option::Some(self)
        }
    };
    (@accessor SessionAware) => {
        fn as_session_aware(&mut self) -> ::core::option::Option<&mut dyn $crate::SessionAware> {
            ::core::option::Option::Some(self)
        }
    };

    ($ty:ty : $($cap:ident),+ $(,)?) => {
        impl $crate::Hosted for $ty {
            const CAPABILITIES: $crate::CapabilitySet =
                $crate::CapabilitySet::NONE $(.with($crate::hosted!(@cap $cap)))+;

            $($crate::hosted!(@accessor $cap);)+
        }
    };
    ($ty:ty) => {
        impl $crate::Hosted for $ty {}
    };
}
