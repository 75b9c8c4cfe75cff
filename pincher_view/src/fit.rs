// Copyright 2025 the Pincher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle anchors and content fitting.

use kurbo::{Point, Rect, Size};

/// How content is scaled into a view when it is first shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Largest scale at which all of the content is visible.
    ///
    /// The content is letterboxed along one axis if the aspect ratios differ.
    #[default]
    Fit,
    /// Smallest scale at which the content covers the whole view.
    ///
    /// The content is cropped along one axis if the aspect ratios differ.
    Fill,
}

impl FitMode {
    /// Scale factor this mode picks for `content` inside `view`.
    #[must_use]
    pub fn scale(self, content: Size, view: Size) -> f64 {
        match self {
            Self::Fit => fit_scale(content, view),
            Self::Fill => fill_scale(content, view),
        }
    }

    /// Rectangle this mode places `content` at inside `view`, centered.
    #[must_use]
    pub fn rect(self, content: Size, view: Rect) -> Rect {
        Rect::from_center_size(view.center(), content * self.scale(content, view.size()))
    }
}

/// Center of `rect`.
#[must_use]
pub fn center(rect: Rect) -> Point {
    rect.center()
}

/// Corner with the smallest x and y.
#[must_use]
pub fn top_left(rect: Rect) -> Point {
    Point::new(rect.min_x(), rect.min_y())
}

/// Corner with the largest x and smallest y.
#[must_use]
pub fn top_right(rect: Rect) -> Point {
    Point::new(rect.max_x(), rect.min_y())
}

/// Corner with the smallest x and largest y.
#[must_use]
pub fn bottom_left(rect: Rect) -> Point {
    Point::new(rect.min_x(), rect.max_y())
}

/// Corner with the largest x and y.
#[must_use]
pub fn bottom_right(rect: Rect) -> Point {
    Point::new(rect.max_x(), rect.max_y())
}

/// Midpoint of the left edge.
#[must_use]
pub fn mid_left(rect: Rect) -> Point {
    Point::new(rect.min_x(), rect.center().y)
}

/// Midpoint of the right edge.
#[must_use]
pub fn mid_right(rect: Rect) -> Point {
    Point::new(rect.max_x(), rect.center().y)
}

/// Midpoint of the top edge.
#[must_use]
pub fn mid_top(rect: Rect) -> Point {
    Point::new(rect.center().x, rect.min_y())
}

/// Midpoint of the bottom edge.
#[must_use]
pub fn mid_bottom(rect: Rect) -> Point {
    Point::new(rect.center().x, rect.max_y())
}

/// Largest uniform scale at which `content` fits entirely inside `view`.
///
/// Returns `1.0` if either size is empty or not finite.
#[must_use]
pub fn fit_scale(content: Size, view: Size) -> f64 {
    if !has_area(content) || !has_area(view) {
        return 1.0;
    }
    if aspect(view) <= aspect(content) {
        view.width / content.width
    } else {
        view.height / content.height
    }
}

/// Smallest uniform scale at which `content` covers all of `view`.
///
/// Returns `1.0` if either size is empty or not finite.
#[must_use]
pub fn fill_scale(content: Size, view: Size) -> f64 {
    if !has_area(content) || !has_area(view) {
        return 1.0;
    }
    if aspect(view) <= aspect(content) {
        view.height / content.height
    } else {
        view.width / content.width
    }
}

/// `content` scaled by [`fit_scale`] and centered in `view`.
#[must_use]
pub fn fit_rect(content: Size, view: Rect) -> Rect {
    FitMode::Fit.rect(content, view)
}

/// `content` scaled by [`fill_scale`] and centered in `view`.
#[must_use]
pub fn fill_rect(content: Size, view: Rect) -> Rect {
    FitMode::Fill.rect(content, view)
}

fn has_area(size: Size) -> bool {
    size.is_finite() && size.width > 0.0 && size.height > 0.0
}

fn aspect(size: Size) -> f64 {
    size.width / size.height
}
