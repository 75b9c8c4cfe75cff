// Copyright 2025 the Pincher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The 2D similarity transform produced by gesture solving.

use kurbo::{Affine, Point, Vec2};

/// Relative tolerance used when recognizing a similarity inside a general affine.
const AFFINE_TOLERANCE: f64 = 1e-9;

/// Rotation + uniform scale + translation in the plane.
///
/// A `Similarity` maps a point `(x, y)` to
///
/// ```text
/// (u·x − v·y + tx, v·x + u·y + ty)
/// ```
///
/// so its linear part is the rotation-scale block `[[u, −v], [v, u]]`. There
/// is no shear or reflection term, so the two columns of the linear part are
/// always orthogonal and of equal length.
///
/// `v` is the sine-like term in the lower-left corner of the block. In a
/// y-down coordinate system (the usual screen convention) a positive `v`
/// turns content clockwise on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Similarity {
    /// Cosine-like term: `scale · cos(angle)`.
    pub u: f64,
    /// Sine-like term: `scale · sin(angle)`.
    pub v: f64,
    /// Horizontal translation.
    pub tx: f64,
    /// Vertical translation.
    pub ty: f64,
}

impl Default for Similarity {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Similarity {
    /// The identity transform.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// Creates a similarity from its four coefficients.
    #[must_use]
    pub const fn new(u: f64, v: f64, tx: f64, ty: f64) -> Self {
        Self { u, v, tx, ty }
    }

    /// A uniform scale about the origin.
    #[must_use]
    pub const fn scale(s: f64) -> Self {
        Self::new(s, 0.0, 0.0, 0.0)
    }

    /// A pure translation.
    #[must_use]
    pub fn translate(offset: impl Into<Vec2>) -> Self {
        let offset = offset.into();
        Self::new(1.0, 0.0, offset.x, offset.y)
    }

    /// A rotation by `radians` combined with a uniform `scale`, both about the origin.
    #[must_use]
    pub fn from_scale_angle(scale: f64, radians: f64) -> Self {
        let uv = Vec2::from_angle(radians) * scale;
        Self::new(uv.x, uv.y, 0.0, 0.0)
    }

    /// Extracts a similarity from a general affine transform.
    ///
    /// Returns `None` when `affine` has shear, reflection, or non-uniform
    /// scale, i.e. when it is not of the form
    /// `[u, v, −v, u, tx, ty]` (up to a small relative tolerance).
    #[must_use]
    pub fn from_affine(affine: Affine) -> Option<Self> {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        let magnitude = a.abs().max(b.abs()).max(c.abs()).max(d.abs()).max(1.0);
        let tol = AFFINE_TOLERANCE * magnitude;
        if (a - d).abs() > tol || (b + c).abs() > tol {
            return None;
        }
        let t = Self::new(a, b, e, f);
        t.is_finite().then_some(t)
    }

    /// Converts to a kurbo [`Affine`] with coefficients `[u, v, −v, u, tx, ty]`.
    #[must_use]
    pub fn to_affine(self) -> Affine {
        Affine::new([self.u, self.v, -self.v, self.u, self.tx, self.ty])
    }

    /// Applies the transform to a point.
    #[must_use]
    pub fn apply(self, p: Point) -> Point {
        Point::new(
            self.u * p.x - self.v * p.y + self.tx,
            self.v * p.x + self.u * p.y + self.ty,
        )
    }

    /// Applies only the linear (rotation-scale) part to a vector.
    #[must_use]
    pub fn apply_vector(self, vec: Vec2) -> Vec2 {
        Vec2::new(self.u * vec.x - self.v * vec.y, self.v * vec.x + self.u * vec.y)
    }

    /// Returns the transform that applies `self` first and then `next`.
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        let t = next.apply(Point::new(self.tx, self.ty));
        Self::new(
            next.u * self.u - next.v * self.v,
            next.u * self.v + next.v * self.u,
            t.x,
            t.y,
        )
    }

    /// Determinant of the linear part, `u² + v²`.
    #[must_use]
    pub fn determinant(self) -> f64 {
        self.u * self.u + self.v * self.v
    }

    /// Returns `true` if all coefficients are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.u.is_finite() && self.v.is_finite() && self.tx.is_finite() && self.ty.is_finite()
    }

    /// Returns `true` if the transform can be inverted without producing
    /// non-finite coefficients.
    #[must_use]
    pub fn is_invertible(self) -> bool {
        self.is_finite() && self.determinant().is_normal()
    }

    /// Returns the inverse transform, or `None` if the linear part collapses
    /// the plane (zero scale) or a coefficient is not finite.
    #[must_use]
    pub fn inverse(self) -> Option<Self> {
        if !self.is_invertible() {
            return None;
        }
        let det = self.determinant();
        let linear = Self::new(self.u / det, -self.v / det, 0.0, 0.0);
        let t = linear.apply_vector(Vec2::new(self.tx, self.ty));
        let inv = Self::new(linear.u, linear.v, -t.x, -t.y);
        inv.is_finite().then_some(inv)
    }

    /// Uniform scale factor, `√(u² + v²)`.
    #[must_use]
    pub fn scale_factor(self) -> f64 {
        Vec2::new(self.u, self.v).hypot()
    }

    /// Rotation angle in radians, in `(−π, π]`.
    #[must_use]
    pub fn angle(self) -> f64 {
        Vec2::new(self.u, self.v).atan2()
    }

    /// Translation component.
    #[must_use]
    pub fn translation(self) -> Vec2 {
        Vec2::new(self.tx, self.ty)
    }
}

impl From<Similarity> for Affine {
    fn from(t: Similarity) -> Self {
        t.to_affine()
    }
}
