// Copyright 2025 the Pincher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Error returned by fallible [`DenseMatrix`](crate::DenseMatrix) operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixError {
    /// A matrix was requested with zero rows or zero columns.
    Empty {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        columns: usize,
    },
    /// The element count `rows * columns` does not fit in a `usize`.
    TooLarge {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        columns: usize,
    },
    /// An element index fell outside the matrix.
    IndexOutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        column: usize,
        /// Row count of the matrix.
        rows: usize,
        /// Column count of the matrix.
        columns: usize,
    },
    /// Two sizes that must agree did not.
    ///
    /// For construction this compares the value count with `rows * columns`;
    /// for multiplication it compares the left columns with the right rows.
    DimensionMismatch {
        /// The size the operation required.
        expected: usize,
        /// The size it was given.
        found: usize,
    },
    /// Inversion was requested for a non-square matrix.
    NotSquare {
        /// Row count of the matrix.
        rows: usize,
        /// Column count of the matrix.
        columns: usize,
    },
    /// The matrix has no inverse.
    Singular,
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Empty { rows, columns } => {
                write!(f, "a {rows}x{columns} matrix has no elements")
            }
            Self::TooLarge { rows, columns } => {
                write!(f, "a {rows}x{columns} matrix has too many elements")
            }
            Self::IndexOutOfRange {
                row,
                column,
                rows,
                columns,
            } => write!(
                f,
                "index ({row}, {column}) is out of range for a {rows}x{columns} matrix"
            ),
            Self::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Self::NotSquare { rows, columns } => {
                write!(f, "cannot invert a non-square {rows}x{columns} matrix")
            }
            Self::Singular => f.write_str("matrix is singular"),
        }
    }
}

impl core::error::Error for MatrixError {}
