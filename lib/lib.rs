#![allow(dead_code, non_snake_case)]

//! Provides functions and higher-level constructs for automated solution of the
//! one-dimensional, time-independent Schrödinger equation by finite
//! differences.
//!
//! The Hamiltonian is discretized on a uniform grid with either a three-point
//! or five-point stencil for the kinetic term, giving a real symmetric banded
//! matrix whose lowest eigenpairs are the bound-state energies and
//! wavefunctions. Provides implementations for the following numerical
//! routines:
//! - Bisection on Sturm sequence counts (tridiagonal matrices)
//! - Bisection on LDLᵀ inertia counts (general banded matrices)
//! - Shifted inverse iteration with banded LU factorization
//!
//! Units are eV, Å, and seconds throughout. See [`docs`] for theoretical
//! background and [`solve::solve`] for the main entry point.

pub mod error;
pub mod units;
pub mod potential;
pub mod grid;
pub mod hamiltonian;
pub mod eigen;
pub mod interp;
pub mod utils;
pub mod solve;
pub mod output;

pub mod docs;

pub(crate) const DEF_EPSILON: f64 = 1e-6;
pub(crate) const DEF_MAXITERS: usize = 100;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
