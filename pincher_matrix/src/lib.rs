// Copyright 2025 the Pincher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=pincher_matrix --heading-base-level=0

//! Pincher Matrix: small dense matrices for gesture solving.
//!
//! This crate provides [`DenseMatrix`], a real-valued matrix stored in
//! row-major order, with just the operations a 2D transform solver needs:
//! - Construction from a row-major slice, or zero-filled.
//! - Checked element access (every access is bounds-checked, in release
//!   builds too).
//! - Inversion of square matrices by Gauss-Jordan elimination with partial
//!   pivoting.
//! - Conformable multiplication, accumulated from zero.
//!
//! It is not a general linear-algebra library. There is no BLAS backend, no
//! decompositions beyond what inversion needs, and no operator overloading;
//! products are spelled [`DenseMatrix::multiply`].
//!
//! ## Minimal example
//!
//! ```rust
//! use pincher_matrix::DenseMatrix;
//!
//! let a = DenseMatrix::from_row_slice(2, 2, &[4.0, 7.0, 2.0, 6.0]).unwrap();
//! let a_inv = a.inverse().unwrap();
//!
//! let b = DenseMatrix::from_column(&[1.0, 2.0]).unwrap();
//! let x = a_inv.multiply(&b).unwrap();
//! assert_eq!((x.rows(), x.columns()), (2, 1));
//! ```
//!
//! ## Errors
//!
//! Every fallible operation returns a [`MatrixError`]. Shape errors
//! ([`MatrixError::IndexOutOfRange`], [`MatrixError::DimensionMismatch`],
//! [`MatrixError::NotSquare`]) indicate caller bugs. [`MatrixError::Singular`]
//! is the one error that real data can produce: the matrix has no inverse,
//! and no NaN-filled result is ever returned in its place.
//!
//! ## Storage
//!
//! Values live inline for matrices with up to 16 entries, so the 4×4 systems
//! and 4×1 vectors used by gesture solving never touch the allocator. Larger
//! matrices spill to the heap, so the crate needs `alloc`.
//!
//! This crate is `no_std` (with `alloc`) and has no cargo features.

#![no_std]

mod error;
mod matrix;

pub use error::MatrixError;
pub use matrix::DenseMatrix;
