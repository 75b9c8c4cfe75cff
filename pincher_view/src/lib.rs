// Copyright 2025 the Pincher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pincher_view --heading-base-level=0

//! Pincher View: put a pinchable piece of content inside a view rectangle.
//!
//! [`pincher_gesture`] works in an abstract live frame. This crate supplies
//! the glue a view controller needs around it:
//! - Rectangle anchor helpers ([`center`], [`top_left`], …) and content
//!   fitting ([`fit_scale`], [`fill_scale`], [`fit_rect`], [`fill_rect`]).
//! - [`PinchViewport`], which owns a [`GestureSession`](pincher_gesture::GestureSession),
//!   converts view-space pointer positions into the live frame (centered on
//!   the view), keeps the content scaled sensibly across view resizes, and
//!   produces the affine a render layer applies to the content.
//!
//! It does **not** render. The content is only known by its [`Size`](kurbo::Size);
//! drawing it with [`PinchViewport::content_to_view`] is up to the caller.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use pincher_view::PinchViewport;
//!
//! // An 800x600 view showing a 400x200 image, fitted and centered.
//! let mut viewport = PinchViewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! viewport.set_content(Some(Size::new(400.0, 200.0)));
//!
//! let to_view = viewport.content_to_view();
//! assert!((to_view * Point::new(200.0, 100.0) - Point::new(400.0, 300.0)).hypot() < 1e-9);
//!
//! // One finger drags the image 50px to the right.
//! viewport.pointer_down(0_u32, Point::new(400.0, 300.0));
//! viewport.pointer_move(0, Point::new(450.0, 300.0));
//! viewport.pointer_up(0);
//!
//! let to_view = viewport.content_to_view();
//! assert!((to_view * Point::new(200.0, 100.0) - Point::new(450.0, 300.0)).hypot() < 1e-9);
//! ```
//!
//! ## Features
//!
//! - `std` (default): build kurbo with `std`.
//! - `libm`: build kurbo with `libm` for `no_std` targets.
//!
//! This crate is `no_std`.

#![no_std]

mod fit;
mod viewport;

pub use fit::{
    FitMode, bottom_left, bottom_right, center, fill_rect, fill_scale, fit_rect, fit_scale,
    mid_bottom, mid_left, mid_right, mid_top, top_left, top_right,
};
pub use viewport::{PinchViewport, PinchViewportDebugInfo};
