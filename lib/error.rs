//! Error types for grid construction, solving, and table output.
//!
//! Every error here derives [`thiserror::Error`], so they convert into each
//! other where that makes sense and into [`anyhow`][anyhow] in the binaries.
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;
use crate::Arr1;

/// Returned when two arrays sampled on the same grid differ in length.
#[derive(Debug, Error)]
#[error("arrays must share a grid; got lengths {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(a: &Arr1<S>, b: &Arr1<T>) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        (a.len() == b.len()).then_some(()).ok_or(Self(a.len(), b.len()))
    }
}

/// Returned from grid construction, Hamiltonian assembly, and eigensolver
/// functions.
#[derive(Debug, Error)]
pub enum XError {
    /// Returned when a grid with fewer than 2 points is requested.
    #[error("grids must have at least 2 points; got {0}")]
    BadGridSize(usize),

    /// Returned when a non-positive or non-finite box length is encountered.
    #[error("box length must be positive and finite; got {0}")]
    BadBoxLength(f64),

    /// Returned when the normalization tolerance is not positive.
    #[error("normalization tolerance must be positive; got {0}")]
    BadEpsilon(f64),

    /// Returned when the inverse-iteration cap is zero.
    #[error("need at least one inverse iteration per eigenvector; got {0}")]
    BadMaxiters(usize),

    /// Returned when inverse iteration fails to produce an eigenvector with a
    /// small enough residual for a bracketed eigenvalue.
    #[error(
        "eigen: FATAL: eigenvector {index} (E = {energy:.6e}) did not converge; \
        residual {residual:.3e}"
    )]
    NoConvergence {
        index: usize,
        energy: f64,
        residual: f64,
    },

    /// A sampled array did not match the grid.
    #[error("grid mismatch: {0}")]
    Length(#[from] LengthError),
}

impl XError {
    pub(crate) fn check_grid_size(n: usize) -> Result<(), Self> {
        (n >= 2).then_some(()).ok_or(Self::BadGridSize(n))
    }

    pub(crate) fn check_box_length(l: f64) -> Result<(), Self> {
        (l.is_finite() && l > 0.0).then_some(()).ok_or(Self::BadBoxLength(l))
    }

    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        (epsilon > 0.0).then_some(()).ok_or(Self::BadEpsilon(epsilon))
    }

    pub(crate) fn check_maxiters(maxiters: usize) -> Result<(), Self> {
        (maxiters != 0).then_some(()).ok_or(Self::BadMaxiters(maxiters))
    }
}

/// Returned from the tabular text writers in [`output`][crate::output].
#[derive(Debug, Error)]
pub enum WriteError {
    /// Returned when a table's columns would not line up with its coordinate
    /// column.
    #[error("table shape mismatch: {rows} rows for {cols} coordinate points")]
    Shape { rows: usize, cols: usize },

    /// A column did not match the coordinate column.
    #[error("column length mismatch: {0}")]
    Length(#[from] LengthError),

    /// [`std::io::Error`]
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
