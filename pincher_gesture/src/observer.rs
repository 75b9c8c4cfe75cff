// Copyright 2025 the Pincher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observation hooks for gesture sessions.
//!
//! The session itself does no logging and no I/O. Callers that want to react
//! to its output (the render layer) or explain its behavior (diagnostics,
//! tests) pass a [`GestureObserver`] to the `*_with_observer` methods of
//! [`GestureSession`](crate::GestureSession).
//!
//! [`GestureRecorder`] is a small observer that keeps every notification in
//! order.

use alloc::vec::Vec;

use crate::{GestureError, GesturePhase, SessionChange, Similarity};

/// Why a contact event was dropped without changing the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// A start event arrived while two contacts were already tracked.
    SessionFull,
    /// A start event reused the id of a contact that is still tracked.
    AlreadyTracked,
    /// A move or end event named a contact that is not tracked.
    Unknown,
    /// The transform in effect cannot be inverted, so the contact could not
    /// be placed in the reference frame.
    Unresolvable,
}

/// A callback sink for session notifications.
///
/// Every method has an empty default, so implementors only override what they
/// need. `()` is the no-op observer.
pub trait GestureObserver<K> {
    /// Called once at the end of every event batch that changed the session.
    ///
    /// `transform` is the session's current transform, whether or not this
    /// batch recomputed it; `changes` says what happened.
    fn transform_updated(&mut self, transform: &Similarity, changes: SessionChange) {
        let _ = (transform, changes);
    }

    /// Called after the cached solver was rebuilt for a new anchor set.
    fn solver_rebuilt(&mut self, phase: GesturePhase) {
        let _ = phase;
    }

    /// Called when an event for `id` was ignored.
    fn contact_ignored(&mut self, id: &K, reason: IgnoreReason) {
        let _ = (id, reason);
    }

    /// Called when the session could not produce a transform.
    fn stalled(&mut self, error: &GestureError) {
        let _ = error;
    }
}

impl<K> GestureObserver<K> for () {}

/// One notification captured by [`GestureRecorder`].
#[derive(Clone, Debug, PartialEq)]
pub enum GestureNote<K> {
    /// See [`GestureObserver::transform_updated`].
    TransformUpdated(Similarity, SessionChange),
    /// See [`GestureObserver::solver_rebuilt`].
    SolverRebuilt(GesturePhase),
    /// See [`GestureObserver::contact_ignored`].
    ContactIgnored(K, IgnoreReason),
    /// See [`GestureObserver::stalled`].
    Stalled(GestureError),
}

/// Records every notification in arrival order.
#[derive(Clone, Debug)]
pub struct GestureRecorder<K> {
    notes: Vec<GestureNote<K>>,
}

impl<K> Default for GestureRecorder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> GestureRecorder<K> {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self { notes: Vec::new() }
    }

    /// Returns the recorded notes, oldest first.
    #[must_use]
    pub fn notes(&self) -> &[GestureNote<K>] {
        &self.notes
    }

    /// Number of [`GestureNote::TransformUpdated`] notes recorded.
    #[must_use]
    pub fn update_count(&self) -> usize {
        self.notes
            .iter()
            .filter(|note| matches!(note, GestureNote::TransformUpdated(..)))
            .count()
    }

    /// Removes and returns all recorded notes.
    pub fn take(&mut self) -> Vec<GestureNote<K>> {
        core::mem::take(&mut self.notes)
    }

    /// Clears all recorded notes.
    pub fn clear(&mut self) {
        self.notes.clear();
    }
}

impl<K: Clone> GestureObserver<K> for GestureRecorder<K> {
    fn transform_updated(&mut self, transform: &Similarity, changes: SessionChange) {
        self.notes
            .push(GestureNote::TransformUpdated(*transform, changes));
    }

    fn solver_rebuilt(&mut self, phase: GesturePhase) {
        self.notes.push(GestureNote::SolverRebuilt(phase));
    }

    fn contact_ignored(&mut self, id: &K, reason: IgnoreReason) {
        self.notes
            .push(GestureNote::ContactIgnored(id.clone(), reason));
    }

    fn stalled(&mut self, error: &GestureError) {
        self.notes.push(GestureNote::Stalled(*error));
    }
}
