// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recording resources for deterministic lifecycle tests.
//!
//! Every resource here writes each call it receives into a shared
//! [`CallLog`], so tests can assert exactly which signals reached the
//! resource and how often it was released.

use std::sync::{Arc, Mutex, MutexGuard};

use keel_core::{
    Commandable, Pauseable, PowerAware, PowerStatus, Resource, ServiceError, ServiceHandle,
    SessionAware, SessionChange, ShutdownAware, hosted,
};

/// Everything a recording resource has observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// Arguments passed to each factory invocation, successful or not.
    pub starts: Vec<Vec<String>>,
    /// Factory invocations that produced a resource.
    pub creations: usize,
    pub commands: Vec<u32>,
    pub pauses: usize,
    pub continues: usize,
    pub shutdowns: usize,
    pub power_events: Vec<PowerStatus>,
    pub session_changes: Vec<SessionChange>,
    pub releases: usize,
}

impl CallCounts {
    /// Number of optional-capability calls of any kind.
    pub fn capability_calls(&self) -> usize {
        self.commands.len()
            + self.pauses
            + self.continues
            + self.shutdowns
            + self.power_events.len()
            + self.session_changes.len()
    }
}

/// Shared, cloneable log of calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    inner: Arc<Mutex<CallCounts>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CallCounts> {
        // A panicking test thread must not hide the log from the assertions.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// A copy of the current counts.
    pub fn snapshot(&self) -> CallCounts {
        self.lock().clone()
    }

    pub fn releases(&self) -> usize {
        self.lock().releases
    }

    pub fn creations(&self) -> usize {
        self.lock().creations
    }
}

/// Behaviour shared by all recording resources.
#[derive(Debug, Clone, Default)]
pub struct RecorderOptions {
    /// Make `release` return an error (after recording the call).
    pub fail_release: bool,
    /// Make every capability handler return an error (after recording the call).
    pub fail_handlers: bool,
    /// Answer returned from `on_power_event`.
    pub power_answer: bool,
}

/// State common to the recording resources.
#[derive(Debug)]
pub struct Recorder {
    log: CallLog,
    options: RecorderOptions,
    handle: Option<ServiceHandle>,
}

impl Recorder {
    fn record(&self, f: impl FnOnce(&mut CallCounts)) -> Result<(), ServiceError> {
        f(&mut self.log.lock());
        if self.options.fail_handlers {
            Err(ServiceError::resource("recorder configured to fail"))
        } else {
            Ok(())
        }
    }

    fn release(self) -> Result<(), ServiceError> {
        self.log.lock().releases += 1;
        if self.options.fail_release {
            Err(ServiceError::resource("recorder release configured to fail"))
        } else {
            Ok(())
        }
    }

    /// The service handle received from the factory, if any.
    pub fn handle(&self) -> Option<&ServiceHandle> {
        self.handle.as_ref()
    }
}

/// Resources that can be built from a [`Recorder`] by the test factories.
pub trait FromRecorder: Sized {
    fn from_recorder(recorder: Recorder) -> Self;
    fn recorder(&self) -> &Recorder;
}

macro_rules! recording_resource {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name(Recorder);

        impl FromRecorder for $name {
            fn from_recorder(recorder: Recorder) -> Self {
                Self(recorder)
            }

            fn recorder(&self) -> &Recorder {
                &self.0
            }
        }

        impl Resource for $name {
            fn release(self) -> Result<(), ServiceError> {
                self.0.release()
            }
        }
    };
}

recording_resource!(
    /// Implements every optional capability.
    RecordingResource
);
recording_resource!(
    /// Implements only [`Pauseable`].
    PauseOnlyResource
);
recording_resource!(
    /// Implements no optional capability.
    BareResource
);

impl Commandable for RecordingResource {
    fn on_custom_command(&mut self, command: u32) -> Result<(), ServiceError> {
        self.0.record(|c| c.commands.push(command))
    }
}

impl Pauseable for RecordingResource {
    fn on_pause(&mut self) -> Result<(), ServiceError> {
        self.0.record(|c| c.pauses += 1)
    }

    fn on_continue(&mut self) -> Result<(), ServiceError> {
        self.0.record(|c| c.continues += 1)
    }
}

impl ShutdownAware for RecordingResource {
    fn on_shutdown(&mut self) -> Result<(), ServiceError> {
        self.0.record(|c| c.shutdowns += 1)
    }
}

impl PowerAware for RecordingResource {
    fn on_power_event(&mut self, status: PowerStatus) -> Result<bool, ServiceError> {
        self.0.record(|c| c.power_events.push(status))?;
        Ok(self.0.options.power_answer)
    }
}

impl SessionAware for RecordingResource {
    fn on_session_change(&mut self, change: SessionChange) -> Result<(), ServiceError> {
        self.0.record(|c| c.session_changes.push(change))
    }
}

hosted!(RecordingResource: Commandable, Pauseable, ShutdownAware, PowerAware, SessionAware);

impl Pauseable for PauseOnlyResource {
    fn on_pause(&mut self) -> Result<(), ServiceError> {
        self.0.record(|c| c.pauses += 1)
    }

    fn on_continue(&mut self) -> Result<(), ServiceError> {
        self.0.record(|c| c.continues += 1)
    }
}

hosted!(PauseOnlyResource: Pauseable);

hosted!(BareResource);

/// Factory producing `R` with default options, recording into `log`.
pub fn recording_factory<R: FromRecorder + 'static>(
    log: CallLog,
) -> impl FnMut(&[String], ServiceHandle) -> Result<R, ServiceError> + Send + 'static {
    recording_factory_with(log, RecorderOptions::default())
}

/// Factory producing `R` with the given options, recording into `log`.
pub fn recording_factory_with<R: FromRecorder + 'static>(
    log: CallLog,
    options: RecorderOptions,
) -> impl FnMut(&[String], ServiceHandle) -> Result<R, ServiceError> + Send + 'static {
    flaky_factory_with(log, 0, options)
}

/// Factory that fails its first `failures` invocations, then succeeds.
pub fn flaky_factory<R: FromRecorder + 'static>(
    log: CallLog,
    failures: usize,
) -> impl FnMut(&[String], ServiceHandle) -> Result<R, ServiceError> + Send + 'static {
    flaky_factory_with(log, failures, RecorderOptions::default())
}

fn flaky_factory_with<R: FromRecorder + 'static>(
    log: CallLog,
    failures: usize,
    options: RecorderOptions,
) -> impl FnMut(&[String], ServiceHandle) -> Result<R, ServiceError> + Send + 'static {
    let mut remaining = failures;
    move |args: &[String], handle: ServiceHandle| {
        log.lock().starts.push(args.to_vec());
        if remaining > 0 {
            remaining -= 1;
            return Err(ServiceError::resource("factory configured to fail"));
        }
        log.lock().creations += 1;
        Ok(R::from_recorder(Recorder {
            log: log.clone(),
            options: options.clone(),
            handle: Some(handle),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_core::{Capability, CapabilitySet, Hosted};

    #[test]
    fn declared_capabilities() {
        assert_eq!(RecordingResource::CAPABILITIES, CapabilitySet::ALL);
        assert_eq!(
            PauseOnlyResource::CAPABILITIES,
            CapabilitySet::NONE.with(Capability::PauseContinue)
        );
        assert_eq!(BareResource::CAPABILITIES, CapabilitySet::NONE);
    }

    #[test]
    fn flaky_factory_fails_then_succeeds() {
        let log = CallLog::new();
        let mut factory = flaky_factory::<BareResource>(log.clone(), 2);
        let (handle, _rx) = ServiceHandle::channel("t");

        assert!(factory(&[], handle.clone()).is_err());
        assert!(factory(&[], handle.clone()).is_err());
        let res = factory(&["a".to_string()], handle).unwrap();
        assert!(res.recorder().handle().is_some());

        let counts = log.snapshot();
        assert_eq!(counts.starts.len(), 3);
        assert_eq!(counts.starts[2], vec!["a".to_string()]);
        assert_eq!(counts.creations, 1);
    }

    #[test]
    fn release_is_recorded_even_when_failing() {
        let log = CallLog::new();
        let options = RecorderOptions {
            fail_release: true,
            ..RecorderOptions::default()
        };
        let mut factory = recording_factory_with::<RecordingResource>(log.clone(), options);
        let (handle, _rx) = ServiceHandle::channel("t");
        let res = factory(&[], handle).unwrap();
        assert!(res.release().is_err());
        assert_eq!(log.releases(), 1);
    }
}
