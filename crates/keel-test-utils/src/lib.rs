// SPDX-FileCopyrightText: 2026 Keel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Keel integration tests.
//!
//! Provides recording resources and a scripted host for fast,
//! deterministic tests without OS signals or a real service manager.
//!
//! # Components
//!
//! - [`RecordingResource`], [`PauseOnlyResource`], [`BareResource`] - resources
//!   that log every call into a shared [`CallLog`]
//! - [`recording_factory`], [`flaky_factory`] - factories producing them
//! - [`ScriptedHost`] - a [`ServiceHost`](keel_core::ServiceHost) replaying a
//!   fixed list of controls

pub mod recording;
pub mod scripted_host;

pub use recording::{
    BareResource, CallCounts, CallLog, FromRecorder, PauseOnlyResource, Recorder,
    RecorderOptions, RecordingResource, flaky_factory, recording_factory,
    recording_factory_with,
};
pub use scripted_host::{Outcome, ScriptedHost};
