//! Uniform coordinate grids over a symmetric box.

use ndarray as nd;
use crate::{
    error::XError,
    potential::Potential,
    solve::XResult,
};

/// `N` evenly spaced points covering `[-l/2, +l/2]`, endpoints included.
///
/// The coordinate array can only be borrowed, so the spacing stored alongside
/// it always agrees with the points themselves.
#[derive(Clone, Debug)]
pub struct Grid {
    // coordinate array
    x: nd::Array1<f64>,
    // grid spacing
    dx: f64,
    // box length
    l: f64,
}

impl Grid {
    /// Discretize a box of length `l` (Å) into `n` points.
    ///
    /// Fails if `n < 2` or if `l` is not positive and finite.
    pub fn new(l: f64, n: usize) -> XResult<Self> {
        XError::check_box_length(l)?;
        XError::check_grid_size(n)?;
        let x: nd::Array1<f64> = nd::Array1::linspace(-l / 2.0, l / 2.0, n);
        let dx = l / (n - 1) as f64;
        Ok(Self { x, dx, l })
    }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get the grid spacing.
    pub fn get_dx(&self) -> f64 { self.dx }

    /// Get the box length.
    pub fn get_l(&self) -> f64 { self.l }

    /// Get the number of grid points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.x.len() }

    /// Evaluate a potential at every grid point.
    pub fn sample<P>(&self, potential: &P) -> nd::Array1<f64>
    where P: Potential + ?Sized
    {
        self.x.mapv(|xk| potential.eval(xk))
    }
}
