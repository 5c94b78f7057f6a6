//! Finite-difference Hamiltonians in banded storage.
//!
//! The kinetic operator `-(ħ²/2mₑ) ∂²/∂x²` is discretized with either a
//! three-point (second-order) or five-point (fourth-order) central stencil,
//! ```text
//! T = ħ² / (2 mₑ δx²)
//!
//! 3-point:  H[i, i] = V[i] + 2 T       H[i, i±1] = -T
//! 5-point:  H[i, i] = V[i] + 5/2 T     H[i, i±1] = -4/3 T    H[i, i±2] = 1/12 T
//! ```
//! Only the nonzero diagonals are stored. Row `d` of the band array holds the
//! `d`-th subdiagonal, `band[d, j] = H[j + d, j]`, with the final `d` entries
//! unused; the matrix is symmetric, so this also describes the superdiagonals.

use ndarray as nd;
use crate::{ Arr1, units };

/// Finite-difference stencil for the second derivative.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Stencil {
    /// Three-point stencil, error `O(δx²)`. Produces a tridiagonal matrix.
    #[default]
    ThreePoint,
    /// Five-point stencil, error `O(δx⁴)`. Produces a pentadiagonal matrix.
    FivePoint,
}

impl Stencil {
    /// Select a stencil from a `use_five_point` flag.
    pub fn from_five_point(five_point: bool) -> Self {
        if five_point { Self::FivePoint } else { Self::ThreePoint }
    }

    /// Number of nonzero diagonals on either side of the main diagonal.
    pub fn bandwidth(self) -> usize {
        match self {
            Self::ThreePoint => 1,
            Self::FivePoint => 2,
        }
    }

    /// Order of the truncation error in the grid spacing.
    pub fn order(self) -> usize {
        match self {
            Self::ThreePoint => 2,
            Self::FivePoint => 4,
        }
    }

    /// Kinetic-energy coefficients in units of `ħ²/(2 mₑ δx²)`, indexed by
    /// distance from the main diagonal.
    pub fn coeffs(self) -> &'static [f64] {
        match self {
            Self::ThreePoint => &[2.0, -1.0],
            Self::FivePoint => &[5.0 / 2.0, -4.0 / 3.0, 1.0 / 12.0],
        }
    }
}

/// Symmetric banded matrix holding a discretized Hamiltonian.
#[derive(Clone, Debug, PartialEq)]
pub struct Hamiltonian {
    // (bandwidth + 1) × n
    bands: nd::Array2<f64>,
}

impl Hamiltonian {
    /// Build `H = T + V` for potential samples `V` on a grid of spacing `dx`.
    ///
    /// Stencil terms that would reach past either end of the grid are dropped,
    /// which amounts to requiring that the wavefunction vanish just outside the
    /// box.
    pub fn assemble<S>(dx: f64, V: &Arr1<S>, stencil: Stencil) -> Self
    where S: nd::Data<Elem = f64>
    {
        let n = V.len();
        let p = stencil.bandwidth();
        let t = units::kinetic_coeff(dx);
        let coeffs = stencil.coeffs();
        let mut bands: nd::Array2<f64> = nd::Array2::zeros((p + 1, n));
        nd::Zip::from(bands.row_mut(0)).and(V)
            .for_each(|hii, Vi| { *hii = Vi + coeffs[0] * t; });
        for (d, &coeff) in coeffs.iter().enumerate().skip(1) {
            // H[i + d, i] exists only for i + d < n
            bands.row_mut(d)
                .slice_mut(nd::s![..n.saturating_sub(d)])
                .fill(coeff * t);
        }
        Self { bands }
    }

    /// Build directly from a band array laid out as described in the
    /// [module-level documentation][self].
    ///
    /// *Panics if `bands` has no rows*.
    pub fn from_bands(mut bands: nd::Array2<f64>) -> Self {
        assert!(bands.nrows() > 0, "band array must hold a main diagonal");
        let n = bands.ncols();
        for d in 1..bands.nrows() {
            bands.row_mut(d).slice_mut(nd::s![n.saturating_sub(d)..]).fill(0.0);
        }
        Self { bands }
    }

    /// Build a tridiagonal matrix from its main diagonal and its
    /// sub/superdiagonal.
    ///
    /// *Panics if `offdiag` is not exactly one element shorter than `diag`*.
    pub fn tridiagonal<S, T>(diag: &Arr1<S>, offdiag: &Arr1<T>) -> Self
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
    {
        let n = diag.len();
        assert_eq!(offdiag.len() + 1, n, "off-diagonal must have length n - 1");
        let mut bands: nd::Array2<f64> = nd::Array2::zeros((2, n));
        bands.row_mut(0).assign(diag);
        bands.row_mut(1).slice_mut(nd::s![..n - 1]).assign(offdiag);
        Self { bands }
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize { self.bands.ncols() }

    /// Number of nonzero diagonals on either side of the main diagonal.
    pub fn bandwidth(&self) -> usize { self.bands.nrows() - 1 }

    /// Return `true` if the matrix has at most one off-diagonal.
    pub fn is_tridiagonal(&self) -> bool { self.bandwidth() <= 1 }

    /// View the main diagonal.
    pub fn diag(&self) -> nd::ArrayView1<'_, f64> { self.bands.row(0) }

    /// View the `d`-th off-diagonal, of length `n - d`.
    ///
    /// *Panics if `d` exceeds the bandwidth*.
    pub fn offdiag(&self, d: usize) -> nd::ArrayView1<'_, f64> {
        let n = self.dim();
        self.bands.slice(nd::s![d, ..n.saturating_sub(d)])
    }

    /// View the full band array.
    pub fn bands(&self) -> nd::ArrayView2<'_, f64> { self.bands.view() }

    /// Get the matrix element `H[i, j]`, returning zero outside the band.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        let d = hi - lo;
        if d > self.bandwidth() || hi >= self.dim() {
            0.0
        } else {
            self.bands[[d, lo]]
        }
    }

    /// Compute the product `H q`.
    pub fn dot<S>(&self, q: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        let n = self.dim();
        let mut hq: nd::Array1<f64> = &self.diag() * q;
        for d in 1..=self.bandwidth().min(n.saturating_sub(1)) {
            let band = self.offdiag(d);
            for (j, &h) in band.iter().enumerate() {
                hq[j + d] += h * q[j];
                hq[j] += h * q[j + d];
            }
        }
        hq
    }

    /// Largest absolute row sum, `‖H‖∞`.
    pub fn norm_inf(&self) -> f64 {
        (0..self.dim())
            .map(|i| self.row_radius(i) + self.bands[[0, i]].abs())
            .fold(0.0, f64::max)
    }

    // sum of absolute off-diagonal elements in row `i`
    fn row_radius(&self, i: usize) -> f64 {
        let n = self.dim();
        (1..=self.bandwidth())
            .map(|d| {
                let below = if i + d < n { self.bands[[d, i]].abs() } else { 0.0 };
                let above = if i >= d { self.bands[[d, i - d]].abs() } else { 0.0 };
                below + above
            })
            .sum()
    }

    /// Return an interval containing the whole spectrum, via Gershgorin's
    /// circle theorem.
    pub fn gershgorin(&self) -> (f64, f64) {
        self.diag().iter().enumerate()
            .map(|(i, &hii)| {
                let r = self.row_radius(i);
                (hii - r, hii + r)
            })
            .fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), (l, h)| (lo.min(l), hi.max(h)),
            )
    }

    /// Expand into a dense `n × n` matrix.
    pub fn to_dense(&self) -> nd::Array2<f64> {
        let n = self.dim();
        nd::Array2::from_shape_fn((n, n), |(i, j)| self.get(i, j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool { (a - b).abs() <= tol }

    #[test]
    fn three_point_entries() {
        let dx = 0.5;
        let t = units::kinetic_coeff(dx);
        let v = nd::array![1.0, 2.0, 3.0, 4.0];
        let h = Hamiltonian::assemble(dx, &v, Stencil::ThreePoint);
        assert_eq!(h.dim(), 4);
        assert_eq!(h.bandwidth(), 1);
        assert!(h.is_tridiagonal());
        for i in 0..4 {
            assert!(close(h.get(i, i), v[i] + 2.0 * t, 1e-12));
        }
        assert!(close(h.get(0, 1), -t, 1e-12));
        assert!(close(h.get(3, 2), -t, 1e-12));
        assert_eq!(h.get(0, 2), 0.0);
        assert_eq!(h.offdiag(1).len(), 3);
    }

    #[test]
    fn five_point_entries_and_truncation() {
        let dx = 0.25;
        let t = units::kinetic_coeff(dx);
        let v = nd::Array1::linspace(0.0, 1.0, 6);
        let h = Hamiltonian::assemble(dx, &v, Stencil::FivePoint);
        assert_eq!(h.bandwidth(), 2);
        assert!(!h.is_tridiagonal());
        for i in 0..6 {
            assert!(close(h.get(i, i), v[i] + 2.5 * t, 1e-9));
        }
        assert!(close(h.get(2, 3), -4.0 / 3.0 * t, 1e-9));
        assert!(close(h.get(4, 2), t / 12.0, 1e-9));
        assert_eq!(h.get(0, 3), 0.0);
        // edge rows only carry the terms that land inside the grid
        assert_eq!(h.offdiag(2).len(), 4);
        assert_eq!(h.bands()[[2, 4]], 0.0);
        assert_eq!(h.bands()[[2, 5]], 0.0);
        assert_eq!(h.bands()[[1, 5]], 0.0);
        let dense = h.to_dense();
        assert_eq!(dense.row(0).iter().filter(|x| **x != 0.0).count(), 3);
        assert_eq!(dense.row(1).iter().filter(|x| **x != 0.0).count(), 4);
        assert_eq!(dense.row(2).iter().filter(|x| **x != 0.0).count(), 5);
        assert_eq!(dense, dense.t());
    }

    #[test]
    fn tiny_grids() {
        let h = Hamiltonian::assemble(1.0, &nd::array![0.0, 0.0], Stencil::FivePoint);
        assert_eq!(h.offdiag(2).len(), 0);
        let q = nd::array![1.0, 1.0];
        let hq = h.dot(&q);
        let t = units::kinetic_coeff(1.0);
        assert!(close(hq[0], (2.5 - 4.0 / 3.0) * t, 1e-12));
    }

    #[test]
    fn dot_matches_dense() {
        let v = nd::array![0.3, -0.2, 0.0, 0.7, 1.1, 0.4, -0.5];
        let h = Hamiltonian::assemble(0.4, &v, Stencil::FivePoint);
        let q = nd::array![1.0, -2.0, 0.5, 0.25, 3.0, -1.0, 0.75];
        let dense = h.to_dense().dot(&q);
        let banded = h.dot(&q);
        assert!(dense.iter().zip(&banded).all(|(a, b)| close(*a, *b, 1e-9)));
    }

    #[test]
    fn gershgorin_bounds() {
        let h = Hamiltonian::tridiagonal(
            &nd::array![2.0, 2.0, 2.0], &nd::array![-1.0, -1.0]);
        let (lo, hi) = h.gershgorin();
        assert_eq!((lo, hi), (0.0, 4.0));
        assert_eq!(h.norm_inf(), 4.0);
        let h = Hamiltonian::from_bands(nd::array![[1.0, 5.0], [3.0, 9.0]]);
        assert_eq!(h.get(1, 0), 3.0);
        assert_eq!(h.bands()[[1, 1]], 0.0);
    }
}
