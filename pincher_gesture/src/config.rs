// Copyright 2025 the Pincher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;

/// Tunables for a [`GestureSession`](crate::GestureSession).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    handle_offset: Vec2,
    min_scale: f64,
}

impl GestureConfig {
    /// Default offset of the synthetic handle used while a single contact is
    /// active, in live-frame units.
    pub const DEFAULT_HANDLE_OFFSET: Vec2 = Vec2::new(10.0, 10.0);

    /// Default smallest scale factor a solved transform may have.
    pub const DEFAULT_MIN_SCALE: f64 = 1e-6;

    /// Creates a configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handle_offset: Self::DEFAULT_HANDLE_OFFSET,
            min_scale: Self::DEFAULT_MIN_SCALE,
        }
    }

    /// Sets the offset between a lone contact and its synthetic handle.
    ///
    /// The handle must be distinct from the contact, so a zero or non-finite
    /// offset is ignored and the previous value is kept.
    #[must_use]
    pub fn with_handle_offset(mut self, offset: Vec2) -> Self {
        if offset.is_finite() && offset != Vec2::ZERO {
            self.handle_offset = offset;
        }
        self
    }

    /// Returns the offset between a lone contact and its synthetic handle.
    #[must_use]
    pub fn handle_offset(&self) -> Vec2 {
        self.handle_offset
    }

    /// Sets the smallest scale factor a solved transform may have.
    ///
    /// Solves that collapse the content below this scale are rejected as
    /// degenerate. Negative or non-finite values are ignored.
    #[must_use]
    pub fn with_min_scale(mut self, min_scale: f64) -> Self {
        if min_scale.is_finite() && min_scale >= 0.0 {
            self.min_scale = min_scale;
        }
        self
    }

    /// Returns the smallest scale factor a solved transform may have.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::new()
    }
}
