// Copyright 2025 the Pincher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// A tracked contact's fixed reference point and its current live point.
///
/// The reference point is captured once, when the contact starts, by mapping
/// the contact's live position back through the transform in effect. It
/// stays fixed until the contact ends. The live point follows every motion
/// sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorPair {
    /// Position in the reference (content) frame.
    pub reference: Point,
    /// Position in the live (pointer) frame.
    pub live: Point,
}

impl AnchorPair {
    /// Creates an anchor pair.
    #[must_use]
    pub const fn new(reference: Point, live: Point) -> Self {
        Self { reference, live }
    }
}

/// How many contacts a [`GestureSession`](crate::GestureSession) is tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GesturePhase {
    /// No contacts; the transform is frozen.
    #[default]
    Idle,
    /// One contact, paired with a synthetic handle. Drags without changing
    /// rotation or scale.
    OneContact,
    /// Two contacts. Pinch, rotate and drag together.
    TwoContacts,
}

#[derive(Clone, Debug)]
pub(crate) struct Contact<K> {
    pub(crate) id: K,
    pub(crate) anchor: AnchorPair,
}

/// The tracked contacts. A second contact never exists without a first.
#[derive(Clone, Debug)]
pub(crate) enum Anchors<K> {
    Idle,
    One(Contact<K>),
    Two(Contact<K>, Contact<K>),
}

impl<K: PartialEq> Anchors<K> {
    pub(crate) fn phase(&self) -> GesturePhase {
        match self {
            Self::Idle => GesturePhase::Idle,
            Self::One(_) => GesturePhase::OneContact,
            Self::Two(..) => GesturePhase::TwoContacts,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Contact<K>> {
        let (first, second) = match self {
            Self::Idle => (None, None),
            Self::One(a) => (Some(a), None),
            Self::Two(a, b) => (Some(a), Some(b)),
        };
        first.into_iter().chain(second)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Contact<K>> {
        let (first, second) = match self {
            Self::Idle => (None, None),
            Self::One(a) => (Some(a), None),
            Self::Two(a, b) => (Some(a), Some(b)),
        };
        first.into_iter().chain(second)
    }

    pub(crate) fn get_mut(&mut self, id: &K) -> Option<&mut Contact<K>> {
        self.iter_mut().find(|contact| contact.id == *id)
    }

    pub(crate) fn contains(&self, id: &K) -> bool {
        self.iter().any(|contact| contact.id == *id)
    }

    /// Adds a contact. Hands it back if two are already tracked.
    pub(crate) fn push(&mut self, contact: Contact<K>) -> Result<(), Contact<K>> {
        match core::mem::replace(self, Self::Idle) {
            Self::Idle => {
                *self = Self::One(contact);
                Ok(())
            }
            Self::One(a) => {
                *self = Self::Two(a, contact);
                Ok(())
            }
            full @ Self::Two(..) => {
                *self = full;
                Err(contact)
            }
        }
    }

    /// Removes the contact with `id`, keeping the other one (if any).
    pub(crate) fn remove(&mut self, id: &K) -> Option<Contact<K>> {
        let (next, removed) = match core::mem::replace(self, Self::Idle) {
            Self::One(a) if a.id == *id => (Self::Idle, Some(a)),
            Self::Two(a, b) if a.id == *id => (Self::One(b), Some(a)),
            Self::Two(a, b) if b.id == *id => (Self::One(a), Some(b)),
            other => (other, None),
        };
        *self = next;
        removed
    }
}
