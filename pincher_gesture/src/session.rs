// Copyright 2025 the Pincher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture session: contact lifecycle in, similarity transform out.
//!
//! ## Usage
//!
//! 1) Create a [`GestureSession`] with the transform currently applied to the
//!    content (identity, or a fit-to-view scale).
//! 2) Feed it contact events in the live frame, one at a time with
//!    [`GestureSession::add_contact`] / [`GestureSession::update_contact`] /
//!    [`GestureSession::remove_contact`], or grouped per input frame with
//!    [`GestureSession::apply_batch`].
//! 3) After each call, read [`GestureSession::transform`] (or use an observer)
//!    and apply it to whatever is being displayed.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use pincher_gesture::{GesturePhase, GestureSession, SessionChange, Similarity};
//!
//! let mut session = GestureSession::new(Similarity::IDENTITY);
//!
//! // Two fingers go down on the x axis…
//! session.add_contact(1_u64, Point::new(0.0, 0.0));
//! session.add_contact(2_u64, Point::new(100.0, 0.0));
//! assert_eq!(session.phase(), GesturePhase::TwoContacts);
//!
//! // …and the second one swings a quarter turn around the first.
//! let changes = session.update_contact(2, Point::new(0.0, 100.0));
//! assert!(changes.contains(SessionChange::TRANSFORM));
//!
//! let t = session.transform();
//! assert!((t.v - 1.0).abs() < 1e-9);
//! ```

use kurbo::{Affine, Point, Vec2};

use crate::anchor::{Anchors, Contact};
use crate::{
    AnchorPair, GestureConfig, GestureError, GestureObserver, GesturePhase, IgnoreReason,
    Similarity, TransformSolver,
};

bitflags::bitflags! {
    /// What a contact event or batch changed in a [`GestureSession`].
    ///
    /// An empty set means the input was ignored entirely.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SessionChange: u8 {
        /// Contacts were added, removed, or re-resolved; the solver was rebuilt.
        const ANCHORS   = 0b0000_0001;
        /// At least one live point moved.
        const LIVE      = 0b0000_0010;
        /// The current transform was recomputed.
        const TRANSFORM = 0b0000_0100;
        /// No transform could be produced; the previous one is still current.
        const STALLED   = 0b0000_1000;
    }
}

/// A contact lifecycle event in the live frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContactEvent<K> {
    /// A contact began at the given point.
    Start(K, Point),
    /// A tracked contact moved to the given point.
    Move(K, Point),
    /// A tracked contact ended.
    End(K),
}

/// Tracks up to two contacts and derives the similarity transform they imply.
///
/// The session caches the inverse of the anchor system. The cache is rebuilt
/// only when the set of contacts changes; motion samples reuse it.
///
/// `K` is an opaque contact identifier supplied by the input source (a pointer
/// id, a touch id, …). It only needs to be comparable.
///
/// The session is single-threaded: feed it events in arrival order from one
/// place.
#[derive(Clone, Debug)]
pub struct GestureSession<K> {
    anchors: Anchors<K>,
    solver: Option<TransformSolver>,
    transform: Similarity,
    config: GestureConfig,
    stalled: bool,
    revision: u64,
}

impl<K: PartialEq> GestureSession<K> {
    /// Creates an idle session whose current transform is `initial`.
    ///
    /// `initial` should be invertible; contacts that start while the current
    /// transform cannot be inverted are ignored.
    #[must_use]
    pub fn new(initial: Similarity) -> Self {
        Self::with_config(initial, GestureConfig::default())
    }

    /// Creates an idle session with an explicit configuration.
    #[must_use]
    pub fn with_config(initial: Similarity, config: GestureConfig) -> Self {
        Self {
            anchors: Anchors::Idle,
            solver: None,
            transform: initial,
            config,
            stalled: false,
            revision: 0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Replaces the configuration.
    ///
    /// With a single contact active, the solver is rebuilt around the new
    /// handle offset.
    pub fn set_config(&mut self, config: GestureConfig) {
        if self.config == config {
            return;
        }
        self.config = config;
        if self.anchors.phase() == GesturePhase::OneContact {
            self.rebuild(&mut ());
        }
    }

    /// Returns the current transform (reference frame → live frame).
    #[must_use]
    pub fn transform(&self) -> Similarity {
        self.transform
    }

    /// Returns the current transform as a kurbo [`Affine`].
    #[must_use]
    pub fn affine(&self) -> Affine {
        self.transform.to_affine()
    }

    /// Returns how many contacts are tracked, as a phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.anchors.phase()
    }

    /// Returns the number of tracked contacts (0, 1 or 2).
    #[must_use]
    pub fn contact_count(&self) -> usize {
        self.anchors.iter().count()
    }

    /// Returns the anchor pair of a tracked contact.
    #[must_use]
    pub fn anchor(&self, id: &K) -> Option<AnchorPair> {
        self.anchors
            .iter()
            .find(|contact| contact.id == *id)
            .map(|contact| contact.anchor)
    }

    /// Iterates over tracked contacts in the order they started.
    pub fn contacts(&self) -> impl Iterator<Item = (&K, &AnchorPair)> {
        self.anchors
            .iter()
            .map(|contact| (&contact.id, &contact.anchor))
    }

    /// Returns the cached solver, if the current anchor set has one.
    #[must_use]
    pub fn solver(&self) -> Option<&TransformSolver> {
        self.solver.as_ref()
    }

    /// Returns `true` if a solver is cached for the current anchor set.
    #[must_use]
    pub fn has_solver(&self) -> bool {
        self.solver.is_some()
    }

    /// Returns `true` if the last attempt to produce a transform failed.
    ///
    /// A stall caused by a singular anchor set lasts until the set changes.
    /// A stall caused by a degenerate motion sample clears on the next good
    /// sample.
    #[must_use]
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    /// Counter bumped every time the current transform is replaced.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Starts tracking a contact at `live`.
    ///
    /// Ignored if two contacts are already tracked or `id` is already tracked.
    pub fn add_contact(&mut self, id: K, live: Point) -> SessionChange {
        self.apply(ContactEvent::Start(id, live))
    }

    /// Moves a tracked contact to `live`. Ignored for unknown ids.
    pub fn update_contact(&mut self, id: K, live: Point) -> SessionChange {
        self.apply(ContactEvent::Move(id, live))
    }

    /// Stops tracking a contact. Ignored for unknown ids.
    pub fn remove_contact(&mut self, id: K) -> SessionChange {
        self.apply(ContactEvent::End(id))
    }

    /// Applies a single event.
    pub fn apply(&mut self, event: ContactEvent<K>) -> SessionChange {
        self.apply_batch_with_observer([event], &mut ())
    }

    /// Applies a single event, reporting to `observer`.
    pub fn apply_with_observer<O>(
        &mut self,
        event: ContactEvent<K>,
        observer: &mut O,
    ) -> SessionChange
    where
        O: GestureObserver<K> + ?Sized,
    {
        self.apply_batch_with_observer([event], observer)
    }

    /// Applies a group of events delivered together.
    pub fn apply_batch<I>(&mut self, events: I) -> SessionChange
    where
        I: IntoIterator<Item = ContactEvent<K>>,
    {
        self.apply_batch_with_observer(events, &mut ())
    }

    /// Applies a group of events delivered together, reporting to `observer`.
    ///
    /// All anchor and live-point mutations are applied first. New contacts
    /// are resolved through the transform in effect when the batch started.
    /// Then the solver is rebuilt at most once (only if the anchor set
    /// changed). The transform is recomputed once, and
    /// [`GestureObserver::transform_updated`] fires once. A batch in which
    /// every event was ignored changes nothing and notifies nothing.
    pub fn apply_batch_with_observer<I, O>(
        &mut self,
        events: I,
        observer: &mut O,
    ) -> SessionChange
    where
        I: IntoIterator<Item = ContactEvent<K>>,
        O: GestureObserver<K> + ?Sized,
    {
        let mut changes = SessionChange::empty();
        for event in events {
            changes |= self.mutate(event, observer);
        }
        if changes.is_empty() {
            return changes;
        }
        if changes.contains(SessionChange::ANCHORS) {
            self.rebuild(observer);
        }
        changes |= self.recompute(observer);
        observer.transform_updated(&self.transform, changes);
        changes
    }

    /// Replaces the current transform from outside the gesture.
    ///
    /// Tracked contacts stay under their live points. Their reference points
    /// are re-resolved through `transform` and the solver is rebuilt. Fails
    /// without changing anything if `transform` is not invertible.
    pub fn set_transform(&mut self, transform: Similarity) -> Result<SessionChange, GestureError> {
        self.set_transform_with_observer(transform, &mut ())
    }

    /// [`GestureSession::set_transform`], reporting to `observer`.
    pub fn set_transform_with_observer<O>(
        &mut self,
        transform: Similarity,
        observer: &mut O,
    ) -> Result<SessionChange, GestureError>
    where
        O: GestureObserver<K> + ?Sized,
    {
        let inverse = transform
            .inverse()
            .ok_or(GestureError::DegenerateTransform)?;
        for contact in self.anchors.iter_mut() {
            contact.anchor.reference = inverse.apply(contact.anchor.live);
        }
        self.transform = transform;
        self.revision += 1;

        let mut changes = SessionChange::TRANSFORM;
        if self.anchors.phase() != GesturePhase::Idle {
            changes |= SessionChange::ANCHORS;
            self.rebuild(observer);
            if self.stalled {
                changes |= SessionChange::STALLED;
            }
        }
        observer.transform_updated(&self.transform, changes);
        Ok(changes)
    }

    /// Drops every contact and starts over from `transform`.
    ///
    /// Used when the displayed content is replaced. Returns
    /// [`SessionChange::TRANSFORM`], plus [`SessionChange::ANCHORS`] if any
    /// contacts were dropped.
    pub fn reset(&mut self, transform: Similarity) -> SessionChange {
        self.reset_with_observer(transform, &mut ())
    }

    /// [`GestureSession::reset`], reporting to `observer`.
    pub fn reset_with_observer<O>(
        &mut self,
        transform: Similarity,
        observer: &mut O,
    ) -> SessionChange
    where
        O: GestureObserver<K> + ?Sized,
    {
        let mut changes = SessionChange::TRANSFORM;
        if self.anchors.phase() != GesturePhase::Idle {
            changes |= SessionChange::ANCHORS;
        }
        self.anchors = Anchors::Idle;
        self.solver = None;
        self.stalled = false;
        self.transform = transform;
        self.revision += 1;
        observer.transform_updated(&self.transform, changes);
        changes
    }

    /// Snapshot of the session state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> GestureSessionDebugInfo {
        GestureSessionDebugInfo {
            phase: self.phase(),
            contact_count: self.contact_count(),
            has_solver: self.has_solver(),
            stalled: self.stalled,
            transform: self.transform,
            handle_offset: self.config.handle_offset(),
            revision: self.revision,
        }
    }

    fn mutate<O>(&mut self, event: ContactEvent<K>, observer: &mut O) -> SessionChange
    where
        O: GestureObserver<K> + ?Sized,
    {
        match event {
            ContactEvent::Start(id, live) => {
                if self.anchors.contains(&id) {
                    observer.contact_ignored(&id, IgnoreReason::AlreadyTracked);
                    return SessionChange::empty();
                }
                if self.anchors.phase() == GesturePhase::TwoContacts {
                    observer.contact_ignored(&id, IgnoreReason::SessionFull);
                    return SessionChange::empty();
                }
                let Some(inverse) = self.transform.inverse() else {
                    observer.contact_ignored(&id, IgnoreReason::Unresolvable);
                    return SessionChange::empty();
                };
                let contact = Contact {
                    id,
                    anchor: AnchorPair::new(inverse.apply(live), live),
                };
                match self.anchors.push(contact) {
                    Ok(()) => SessionChange::ANCHORS,
                    Err(rejected) => {
                        observer.contact_ignored(&rejected.id, IgnoreReason::SessionFull);
                        SessionChange::empty()
                    }
                }
            }
            ContactEvent::Move(id, live) => match self.anchors.get_mut(&id) {
                Some(contact) => {
                    contact.anchor.live = live;
                    SessionChange::LIVE
                }
                None => {
                    observer.contact_ignored(&id, IgnoreReason::Unknown);
                    SessionChange::empty()
                }
            },
            ContactEvent::End(id) => match self.anchors.remove(&id) {
                Some(_) => SessionChange::ANCHORS,
                None => {
                    observer.contact_ignored(&id, IgnoreReason::Unknown);
                    SessionChange::empty()
                }
            },
        }
    }

    /// Rebuilds the cached solver for the current anchor set.
    fn rebuild<O>(&mut self, observer: &mut O)
    where
        O: GestureObserver<K> + ?Sized,
    {
        let built = match &self.anchors {
            Anchors::Idle => {
                self.solver = None;
                self.stalled = false;
                return;
            }
            Anchors::One(a) => TransformSolver::for_handle(
                a.anchor.reference,
                self.transform,
                self.config.handle_offset(),
            ),
            Anchors::Two(a, b) => TransformSolver::new(a.anchor.reference, b.anchor.reference)
                .map_err(GestureError::from),
        };
        match built {
            Ok(solver) => {
                self.solver = Some(solver);
                self.stalled = false;
                observer.solver_rebuilt(self.anchors.phase());
            }
            Err(err) => {
                self.solver = None;
                self.stalled = true;
                observer.stalled(&err);
            }
        }
    }

    /// Recomputes the transform from live points with the cached solver.
    fn recompute<O>(&mut self, observer: &mut O) -> SessionChange
    where
        O: GestureObserver<K> + ?Sized,
    {
        let Some(solver) = &self.solver else {
            return if self.stalled {
                SessionChange::STALLED
            } else {
                SessionChange::empty()
            };
        };
        let solved = match &self.anchors {
            Anchors::Idle => return SessionChange::empty(),
            Anchors::One(a) => solver.solve_handle(a.anchor.live, self.config.handle_offset()),
            Anchors::Two(a, b) => solver.solve(a.anchor.live, b.anchor.live),
        };
        let min_scale = self.config.min_scale();
        let solved = solved.map_err(GestureError::from).and_then(|t| {
            if t.is_invertible() && t.scale_factor() >= min_scale {
                Ok(t)
            } else {
                Err(GestureError::DegenerateTransform)
            }
        });
        match solved {
            Ok(t) => {
                self.transform = t;
                self.revision += 1;
                self.stalled = false;
                SessionChange::TRANSFORM
            }
            Err(err) => {
                self.stalled = true;
                observer.stalled(&err);
                SessionChange::STALLED
            }
        }
    }
}

/// Debug snapshot of a [`GestureSession`] state.
#[derive(Clone, Copy, Debug)]
pub struct GestureSessionDebugInfo {
    /// Current phase.
    pub phase: GesturePhase,
    /// Number of tracked contacts.
    pub contact_count: usize,
    /// Whether a solver is cached for the current anchor set.
    pub has_solver: bool,
    /// Whether the last attempt to produce a transform failed.
    pub stalled: bool,
    /// Current transform.
    pub transform: Similarity,
    /// Configured synthetic handle offset.
    pub handle_offset: Vec2,
    /// Transform revision counter.
    pub revision: u64,
}
