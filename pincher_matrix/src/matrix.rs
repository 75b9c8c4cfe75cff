// Copyright 2025 the Pincher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::{SmallVec, smallvec};

use crate::MatrixError;

/// Number of entries stored inline before spilling to the heap.
const INLINE_CAPACITY: usize = 16;

type Storage = SmallVec<[f64; INLINE_CAPACITY]>;

/// Dense real-valued matrix in row-major order.
///
/// A `DenseMatrix` always has at least one row and one column, and its
/// backing storage always holds exactly `rows * columns` values. Element
/// access is checked on every call.
///
/// `DenseMatrix` does not implement `PartialEq`; compare elements with an
/// explicit tolerance instead.
#[derive(Clone, Debug)]
pub struct DenseMatrix {
    rows: usize,
    columns: usize,
    values: Storage,
}

impl DenseMatrix {
    /// Creates a matrix from `values` laid out row by row.
    ///
    /// Fails with [`MatrixError::DimensionMismatch`] when `values.len()` is not
    /// `rows * columns`, with [`MatrixError::Empty`] when either dimension
    /// is zero, and with [`MatrixError::TooLarge`] when `rows * columns`
    /// overflows.
    pub fn from_row_slice(
        rows: usize,
        columns: usize,
        values: &[f64],
    ) -> Result<Self, MatrixError> {
        let len = checked_len(rows, columns)?;
        if values.len() != len {
            return Err(MatrixError::DimensionMismatch {
                expected: len,
                found: values.len(),
            });
        }
        Ok(Self {
            rows,
            columns,
            values: SmallVec::from_slice(values),
        })
    }

    /// Creates a zero-filled `rows` × `columns` matrix.
    pub fn zeros(rows: usize, columns: usize) -> Result<Self, MatrixError> {
        let len = checked_len(rows, columns)?;
        Ok(Self {
            rows,
            columns,
            values: smallvec![0.0; len],
        })
    }

    /// Creates the `n` × `n` identity matrix.
    pub fn identity(n: usize) -> Result<Self, MatrixError> {
        let mut m = Self::zeros(n, n)?;
        for i in 0..n {
            m.values[i * n + i] = 1.0;
        }
        Ok(m)
    }

    /// Creates a column vector (`values.len()` × 1).
    pub fn from_column(values: &[f64]) -> Result<Self, MatrixError> {
        Self::from_row_slice(values.len(), 1, values)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns `true` if the matrix has as many rows as columns.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    /// Returns the backing values in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Returns the element at (`row`, `column`).
    pub fn get(&self, row: usize, column: usize) -> Result<f64, MatrixError> {
        let idx = self.index_of(row, column)?;
        Ok(self.values[idx])
    }

    /// Sets the element at (`row`, `column`).
    pub fn set(&mut self, row: usize, column: usize, value: f64) -> Result<(), MatrixError> {
        let idx = self.index_of(row, column)?;
        self.values[idx] = value;
        Ok(())
    }

    /// Returns the inverse of a square, non-singular matrix.
    ///
    /// Uses Gauss-Jordan elimination with partial pivoting. A pivot whose
    /// magnitude does not exceed `n * f64::EPSILON` times the largest entry
    /// of the matrix is treated as zero, and the matrix is reported as
    /// [`MatrixError::Singular`]. Non-finite entries are reported the same
    /// way.
    pub fn inverse(&self) -> Result<Self, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.rows,
                columns: self.columns,
            });
        }
        let n = self.rows;
        let mut work = self.values.clone();
        let mut inv = Self::identity(n)?.values;

        let largest = work.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        if !largest.is_finite() || largest == 0.0 || work.iter().any(|v| v.is_nan()) {
            return Err(MatrixError::Singular);
        }
        let tolerance = largest * n as f64 * f64::EPSILON;

        for col in 0..n {
            let mut pivot_row = col;
            let mut pivot_abs = work[col * n + col].abs();
            for row in col + 1..n {
                let candidate = work[row * n + col].abs();
                if candidate > pivot_abs {
                    pivot_abs = candidate;
                    pivot_row = row;
                }
            }
            // NaN pivots come from overflow during elimination.
            if pivot_abs.is_nan() || pivot_abs <= tolerance {
                return Err(MatrixError::Singular);
            }
            if pivot_row != col {
                swap_rows(&mut work, n, col, pivot_row);
                swap_rows(&mut inv, n, col, pivot_row);
            }

            let pivot = work[col * n + col];
            for k in 0..n {
                work[col * n + k] /= pivot;
                inv[col * n + k] /= pivot;
            }

            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = work[row * n + col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..n {
                    let w = work[col * n + k];
                    let i = inv[col * n + k];
                    work[row * n + k] -= factor * w;
                    inv[row * n + k] -= factor * i;
                }
            }
        }

        Ok(Self {
            rows: n,
            columns: n,
            values: inv,
        })
    }

    /// Returns the product `self · other`.
    ///
    /// Requires `self.columns() == other.rows()`. The result has
    /// `self.rows()` rows and `other.columns()` columns; each entry is the dot
    /// product of a row of `self` with a column of `other`, accumulated from
    /// zero. Fails with [`MatrixError::TooLarge`] if the result shape
    /// cannot be addressed.
    pub fn multiply(&self, other: &Self) -> Result<Self, MatrixError> {
        if self.columns != other.rows {
            return Err(MatrixError::DimensionMismatch {
                expected: self.columns,
                found: other.rows,
            });
        }
        let len = checked_len(self.rows, other.columns)?;
        let mut values = Storage::with_capacity(len);
        for i in 0..self.rows {
            let row = &self.values[i * self.columns..(i + 1) * self.columns];
            for j in 0..other.columns {
                let mut acc = 0.0;
                for (k, a) in row.iter().enumerate() {
                    acc += a * other.values[k * other.columns + j];
                }
                values.push(acc);
            }
        }
        Ok(Self {
            rows: self.rows,
            columns: other.columns,
            values,
        })
    }

    fn index_of(&self, row: usize, column: usize) -> Result<usize, MatrixError> {
        if row >= self.rows || column >= self.columns {
            return Err(MatrixError::IndexOutOfRange {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(row * self.columns + column)
    }
}

fn checked_len(rows: usize, columns: usize) -> Result<usize, MatrixError> {
    if rows == 0 || columns == 0 {
        return Err(MatrixError::Empty { rows, columns });
    }
    rows.checked_mul(columns).ok_or(MatrixError::TooLarge { rows, columns })
}

fn swap_rows(values: &mut [f64], n: usize, a: usize, b: usize) {
    for k in 0..n {
        values.swap(a * n + k, b * n + k);
    }
}
