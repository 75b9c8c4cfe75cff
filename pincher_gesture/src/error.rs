// Copyright 2025 the Pincher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use pincher_matrix::MatrixError;

/// Reason a gesture could not produce a new transform.
///
/// Neither variant is fatal. The session keeps its last good transform and
/// waits for the anchor set (or, for [`GestureError::DegenerateTransform`]
/// raised by a motion sample, the live points) to change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureError {
    /// The anchor system could not be built or solved.
    ///
    /// In practice this is [`MatrixError::Singular`]: two anchors share the
    /// same reference point.
    Matrix(MatrixError),
    /// A transform was not invertible, or a solve collapsed the plane to a
    /// point (zero or non-finite scale).
    DegenerateTransform,
}

impl fmt::Display for GestureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matrix(err) => write!(f, "anchor system could not be solved: {err}"),
            Self::DegenerateTransform => f.write_str("transform has zero or non-finite scale"),
        }
    }
}

impl core::error::Error for GestureError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Matrix(err) => Some(err),
            Self::DegenerateTransform => None,
        }
    }
}

impl From<MatrixError> for GestureError {
    fn from(err: MatrixError) -> Self {
        Self::Matrix(err)
    }
}
