// Copyright 2025 the Pincher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pincher_gesture --heading-base-level=0

//! Pincher Gesture: pinch, rotate and drag as a 2D similarity transform.
//!
//! This crate turns one or two simultaneous pointer contacts into a
//! [`Similarity`] (rotation + uniform scale + translation, never shear) that
//! keeps the content under the user's fingers:
//! - [`GestureSession`] tracks the contacts, their fixed reference points and
//!   their live points.
//! - [`TransformSolver`] caches the inverse of the 4×4 anchor system, so each
//!   motion sample costs one matrix–vector product. It is rebuilt only when
//!   a contact starts or ends.
//! - A lone contact is paired with a synthetic handle a fixed offset away
//!   (see [`GestureConfig::handle_offset`]). One finger therefore drags the
//!   content without changing its rotation or scale.
//!
//! It does **not** read input devices, hit-test, or render. Callers are
//! expected to:
//! - Normalize pointer positions into a live frame (for example centered on
//!   the viewport; `pincher_view` does this).
//! - Serialize input events onto one thread and feed them to the session in
//!   arrival order.
//! - Apply [`GestureSession::transform`] (or [`GestureSession::affine`]) to
//!   whatever they display.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use pincher_gesture::{GestureSession, Similarity};
//!
//! let mut session = GestureSession::new(Similarity::IDENTITY);
//!
//! // Pinch out: two fingers on the x axis spread to twice their distance.
//! session.add_contact("left", Point::new(0.0, 0.0));
//! session.add_contact("right", Point::new(100.0, 0.0));
//! session.update_contact("right", Point::new(200.0, 0.0));
//!
//! let t = session.transform();
//! assert!((t.scale_factor() - 2.0).abs() < 1e-9);
//!
//! // Lifting both fingers freezes the transform where it is.
//! session.remove_contact("left");
//! session.remove_contact("right");
//! assert!((session.transform().u - 2.0).abs() < 1e-9);
//! ```
//!
//! ## Observing a session
//!
//! Every mutating method returns a [`SessionChange`] set. For a callback
//! interface, pass a [`GestureObserver`] to the `*_with_observer` variants;
//! [`GestureRecorder`] captures notifications for diagnostics and tests.
//!
//! ## Sign convention
//!
//! [`Similarity`] maps `(x, y)` to `(u·x − v·y + tx, v·x + u·y + ty)`. As a
//! kurbo [`Affine`](kurbo::Affine) its coefficients are `[u, v, −v, u, tx, ty]`.
//!
//! ## Features
//!
//! - `std` (default): build kurbo with `std`.
//! - `libm`: build kurbo with `libm` for `no_std` targets.
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

mod anchor;
mod config;
mod error;
pub mod observer;
pub mod session;
mod similarity;
pub mod solver;

pub use anchor::{AnchorPair, GesturePhase};
pub use config::GestureConfig;
pub use error::GestureError;
pub use observer::{GestureNote, GestureObserver, GestureRecorder, IgnoreReason};
pub use session::{ContactEvent, GestureSession, GestureSessionDebugInfo, SessionChange};
pub use similarity::Similarity;
pub use solver::TransformSolver;
