// Copyright 2025 the Pincher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Similarity solving from two anchor correspondences.
//!
//! A similarity `f(x, y) = (u·x − v·y + tx, v·x + u·y + ty)` has four unknowns.
//! Each anchor contributes two equations (`f(reference) = live`, one per
//! axis), so two anchors give a square 4×4 system:
//!
//! ```text
//! [ x1  -y1  1  0 ]   [ u  ]   [ x1' ]
//! [ y1   x1  0  1 ] · [ v  ] = [ y1' ]
//! [ x2  -y2  1  0 ]   [ tx ]   [ x2' ]
//! [ y2   x2  0  1 ]   [ ty ]   [ y2' ]
//! ```
//!
//! The coefficient matrix depends only on the reference points, which stay
//! fixed while contacts move. [`TransformSolver`] inverts it once and then
//! answers each motion sample with a single matrix–vector product.

use kurbo::{Point, Vec2};
use pincher_matrix::{DenseMatrix, MatrixError};

use crate::{GestureError, Similarity};

/// Builds the 4×4 coefficient matrix for two reference points.
pub fn system_matrix(first: Point, second: Point) -> Result<DenseMatrix, MatrixError> {
    DenseMatrix::from_row_slice(
        4,
        4,
        &[
            first.x, -first.y, 1.0, 0.0, //
            first.y, first.x, 0.0, 1.0, //
            second.x, -second.y, 1.0, 0.0, //
            second.y, second.x, 0.0, 1.0,
        ],
    )
}

/// Reference point of the synthetic handle that accompanies a lone contact.
///
/// The handle sits `offset` away from the contact in the live frame, as seen
/// through `in_effect`, and is mapped back into the reference frame. Returns
/// `None` if `in_effect` cannot be inverted.
#[must_use]
pub fn handle_reference(reference: Point, in_effect: Similarity, offset: Vec2) -> Option<Point> {
    let inverse = in_effect.inverse()?;
    Some(inverse.apply(in_effect.apply(reference) + offset))
}

/// Cached inverse of the anchor system for a fixed pair of reference points.
#[derive(Clone, Debug)]
pub struct TransformSolver {
    solution: DenseMatrix,
    references: [Point; 2],
}

impl TransformSolver {
    /// Builds and inverts the system for two reference points.
    ///
    /// Fails with [`MatrixError::Singular`] when the points coincide.
    pub fn new(first: Point, second: Point) -> Result<Self, MatrixError> {
        let solution = system_matrix(first, second)?.inverse()?;
        Ok(Self {
            solution,
            references: [first, second],
        })
    }

    /// Builds a solver for a single contact and its synthetic handle.
    ///
    /// The handle's reference point comes from [`handle_reference`]. Solve
    /// motion samples with [`TransformSolver::solve_handle`] and the same
    /// `offset`.
    pub fn for_handle(
        reference: Point,
        in_effect: Similarity,
        offset: Vec2,
    ) -> Result<Self, GestureError> {
        let handle = handle_reference(reference, in_effect, offset)
            .ok_or(GestureError::DegenerateTransform)?;
        Ok(Self::new(reference, handle)?)
    }

    /// The reference points this solver was built for.
    #[must_use]
    pub fn references(&self) -> [Point; 2] {
        self.references
    }

    /// The cached inverse of the coefficient matrix.
    #[must_use]
    pub fn solution(&self) -> &DenseMatrix {
        &self.solution
    }

    /// Solves for the similarity taking the reference points to `first` and
    /// `second` (in the order the solver was built with).
    pub fn solve(&self, first: Point, second: Point) -> Result<Similarity, MatrixError> {
        let rhs = DenseMatrix::from_column(&[first.x, first.y, second.x, second.y])?;
        let x = self.solution.multiply(&rhs)?;
        Ok(Similarity::new(
            x.get(0, 0)?,
            x.get(1, 0)?,
            x.get(2, 0)?,
            x.get(3, 0)?,
        ))
    }

    /// Solves a lone contact at `live`, with its handle re-derived at
    /// `live + offset`.
    ///
    /// The handle follows the contact rigidly, so the result keeps the
    /// rotation and scale that were in effect when the solver was built and
    /// only translates.
    pub fn solve_handle(&self, live: Point, offset: Vec2) -> Result<Similarity, MatrixError> {
        self.solve(live, live + offset)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};
    use pincher_matrix::MatrixError;

    use super::{TransformSolver, handle_reference};
    use crate::Similarity;

    fn assert_similarity_close(a: Similarity, b: Similarity) {
        for (x, y) in [(a.u, b.u), (a.v, b.v), (a.tx, b.tx), (a.ty, b.ty)] {
            assert!((x - y).abs() < 1e-9, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn quarter_turn() {
        let solver = TransformSolver::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0)).unwrap();
        let t = solver
            .solve(Point::new(0.0, 0.0), Point::new(0.0, 100.0))
            .unwrap();
        assert_similarity_close(t, Similarity::new(0.0, 1.0, 0.0, 0.0));
    }

    #[test]
    fn uniform_scale() {
        let solver = TransformSolver::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0)).unwrap();
        let t = solver
            .solve(Point::new(0.0, 0.0), Point::new(200.0, 0.0))
            .unwrap();
        assert_similarity_close(t, Similarity::new(2.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn identical_references_are_singular() {
        let p = Point::new(12.5, -3.0);
        assert_eq!(
            TransformSolver::new(p, p).unwrap_err(),
            MatrixError::Singular
        );
    }

    #[test]
    fn reused_solution_tracks_motion() {
        let a = Point::new(-40.0, 10.0);
        let b = Point::new(25.0, 60.0);
        let solver = TransformSolver::new(a, b).unwrap();

        let target = Similarity::from_scale_angle(1.7, 2.1).then(Similarity::translate((8.0, -30.0)));
        let t = solver.solve(target.apply(a), target.apply(b)).unwrap();
        assert_similarity_close(t, target);

        // Same cached solution, different live points.
        let target = Similarity::from_scale_angle(0.4, -0.3);
        let t = solver.solve(target.apply(a), target.apply(b)).unwrap();
        assert_similarity_close(t, target);
    }

    #[test]
    fn handle_keeps_rotation_and_scale() {
        let in_effect = Similarity::from_scale_angle(2.0, 0.5).then(Similarity::translate((3.0, 4.0)));
        let reference = Point::new(50.0, 50.0);
        let offset = Vec2::new(10.0, 10.0);

        let handle = handle_reference(reference, in_effect, offset).unwrap();
        let live = in_effect.apply(reference);
        assert!((in_effect.apply(handle) - (live + offset)).hypot() < 1e-9);

        let solver = TransformSolver::for_handle(reference, in_effect, offset).unwrap();
        let moved = live + Vec2::new(-7.0, 12.0);
        let t = solver.solve_handle(moved, offset).unwrap();
        assert!((t.u - in_effect.u).abs() < 1e-9);
        assert!((t.v - in_effect.v).abs() < 1e-9);
        assert!((t.apply(reference) - moved).hypot() < 1e-9);
    }

    #[test]
    fn handle_needs_invertible_transform() {
        let err = TransformSolver::for_handle(
            Point::ZERO,
            Similarity::scale(0.0),
            Vec2::new(10.0, 10.0),
        )
        .unwrap_err();
        assert_eq!(err, crate::GestureError::DegenerateTransform);
    }
}
