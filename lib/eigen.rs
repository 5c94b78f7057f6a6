//! Lowest eigenpairs of symmetric banded matrices.
//!
//! Eigenvalues are located by bisection on a count of the eigenvalues lying
//! below a trial value: for tridiagonal matrices this is the classic Sturm
//! sequence, and for wider bands it is the inertia of an `LDLᵀ` factorization
//! of `H - λ`, which by Sylvester's law has as many negative pivots as `H` has
//! eigenvalues below `λ`. Each count costs `O(n p²)` for bandwidth `p`.
//!
//! Eigenvectors then follow from inverse iteration against a banded LU
//! factorization (with partial pivoting) of `H - λ`, orthogonalized against
//! the vectors already found. With an eigenvalue accurate to machine
//! precision, one or two iterations are usually enough.
//!
//! ```
//! use ndarray as nd;
//! use fdtise::{ eigen, hamiltonian::Hamiltonian };
//!
//! // discrete Laplacian on 4 sites: eigenvalues 2 - 2 cos(jπ/5)
//! let h = Hamiltonian::tridiagonal(
//!     &nd::Array1::from_elem(4, 2.0),
//!     &nd::Array1::from_elem(3, -1.0),
//! );
//! let pairs = eigen::eigh_lowest(&h, 2, 100).unwrap();
//! let expected = |j: f64| 2.0 - 2.0 * (j * std::f64::consts::PI / 5.0).cos();
//! assert!((pairs.values[0] - expected(1.0)).abs() < 1e-12);
//! assert!((pairs.values[1] - expected(2.0)).abs() < 1e-12);
//! ```

use log::{ debug, trace, warn };
use ndarray as nd;
use crate::{
    Arr1,
    error::XError,
    hamiltonian::Hamiltonian,
    solve::XResult,
};

// hard cap on bisection steps per eigenvalue; 2^-200 of the Gershgorin
// interval is far below machine precision
const BISECT_MAXITERS: usize = 200;

// accepted inverse-iteration residual ‖Hq - λq‖ relative to ‖H‖ and √n
const RESIDUAL_REL: f64 = 1e-11;

/// Eigensolver strategy, chosen by the bandwidth of the matrix.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Method {
    /// Sturm-sequence bisection and tridiagonal inverse iteration.
    Tridiagonal,
    /// `LDLᵀ` inertia bisection and banded inverse iteration.
    Banded,
}

impl Method {
    /// Select the cheapest method applicable to `h`.
    pub fn select(h: &Hamiltonian) -> Self {
        if h.is_tridiagonal() { Self::Tridiagonal } else { Self::Banded }
    }

    /// Return `true` if `self` is `Tridiagonal`.
    pub fn is_tridiagonal(&self) -> bool { matches!(self, Self::Tridiagonal) }

    /// Return `true` if `self` is `Banded`.
    pub fn is_banded(&self) -> bool { matches!(self, Self::Banded) }

    /// Count the eigenvalues of `h` strictly below `lambda`.
    pub fn count_below(&self, h: &Hamiltonian, lambda: f64) -> usize {
        match self {
            Self::Tridiagonal if h.bandwidth() == 0 => {
                h.diag().iter().filter(|&&hii| hii < lambda).count()
            },
            Self::Tridiagonal => sturm_count(&h.diag(), &h.offdiag(1), lambda),
            Self::Banded => inertia_count(h, lambda),
        }
    }
}

/// The lowest eigenpairs of a matrix.
///
/// Row `j` of `vectors` is the eigenvector belonging to `values[j]`; values
/// are in ascending order and every vector has unit Euclidean norm.
#[derive(Clone, Debug)]
pub struct Eigenpairs {
    /// Eigenvalues.
    pub values: nd::Array1<f64>,
    /// Eigenvectors, one per row.
    pub vectors: nd::Array2<f64>,
    /// Method used to compute them.
    pub method: Method,
}

impl Eigenpairs {
    /// Number of eigenpairs.
    pub fn len(&self) -> usize { self.values.len() }

    /// Return `true` if no eigenpairs were computed.
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

// keep pivots away from zero without changing their sign
fn guard_pivot(q: f64, pivmin: f64) -> f64 {
    if q.abs() < pivmin {
        if q.is_sign_negative() { -pivmin } else { pivmin }
    } else {
        q
    }
}

/// Count eigenvalues of a symmetric tridiagonal matrix strictly less than
/// `lambda` via its Sturm sequence.
///
/// - `diag`: main diagonal d[0..n]
/// - `offdiag`: sub/super-diagonal e[0..n-1]
pub fn sturm_count<S, T>(diag: &Arr1<S>, offdiag: &Arr1<T>, lambda: f64)
    -> usize
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let n = diag.len();
    if n == 0 { return 0; }
    let mut count: usize = 0;
    let mut q = guard_pivot(diag[0] - lambda, f64::MIN_POSITIVE);
    if q < 0.0 { count += 1; }
    for (&dk, &ekm1) in diag.iter().skip(1).zip(offdiag) {
        q = guard_pivot(dk - lambda - ekm1 * ekm1 / q, f64::MIN_POSITIVE);
        if q < 0.0 { count += 1; }
    }
    count
}

/// Count eigenvalues of a symmetric banded matrix strictly less than `lambda`
/// as the number of negative pivots in an `LDLᵀ` factorization of
/// `h - lambda`.
///
/// Pivots smaller than `ε ‖H‖∞` in magnitude are raised to that size, which
/// perturbs `H` by at most as much and keeps the multipliers finite.
pub fn inertia_count(h: &Hamiltonian, lambda: f64) -> usize {
    let n = h.dim();
    let p = h.bandwidth();
    let bands = h.bands();
    let pivmin = f64::EPSILON * matrix_scale(h);
    // l[[i, d - 1]] = L[i, i - d]
    let mut l: nd::Array2<f64> = nd::Array2::zeros((n, p.max(1)));
    let mut piv: Vec<f64> = vec![0.0; n];
    let mut count: usize = 0;
    for j in 0..n {
        let mut q = bands[[0, j]] - lambda;
        for d in 1..=p.min(j) {
            q -= l[[j, d - 1]].powi(2) * piv[j - d];
        }
        q = guard_pivot(q, pivmin);
        if q < 0.0 { count += 1; }
        piv[j] = q;
        for d in 1..=p {
            let i = j + d;
            if i >= n { break; }
            let mut a = bands[[d, j]];
            for k in i.saturating_sub(p)..j {
                a -= l[[i, i - k - 1]] * l[[j, j - k - 1]] * piv[k];
            }
            l[[i, d - 1]] = a / q;
        }
    }
    count
}

/// Find the `k` lowest eigenvalues of `h` by bisection, in ascending order.
///
/// *Panics if `k` exceeds the dimension of `h`*.
pub fn bisect_lowest(h: &Hamiltonian, k: usize, method: Method) -> Vec<f64> {
    assert!(k <= h.dim(), "cannot bracket more eigenvalues than rows");
    let scale = matrix_scale(h);
    let (glo, ghi) = h.gershgorin();
    let pad = 1e-6 * (ghi - glo).max(scale);
    let abstol = f64::EPSILON * scale;
    let hi = ghi + pad;
    let mut lo = glo - pad;
    let mut values: Vec<f64> = Vec::with_capacity(k);
    for j in 0..k {
        let mut a = lo;
        let mut b = hi;
        for _ in 0..BISECT_MAXITERS {
            if b - a <= 2.0 * f64::EPSILON * a.abs().max(b.abs()) + abstol {
                break;
            }
            let mid = (a + b) / 2.0;
            if method.count_below(h, mid) <= j { a = mid; } else { b = mid; }
        }
        values.push((a + b) / 2.0);
        // fewer than j + 1 eigenvalues lie below `a`
        lo = a;
    }
    values
}

// ‖H‖∞, or 1 for the zero matrix
fn matrix_scale(h: &Hamiltonian) -> f64 {
    let norm = h.norm_inf();
    if norm > 0.0 { norm } else { 1.0 }
}

/// LU factorization with partial pivoting of the shifted banded matrix
/// `H - σ`.
///
/// Row interchanges can push the upper factor out to `2p` superdiagonals for
/// bandwidth `p`, so each row is stored over the `3p + 1` columns
/// `i - p ..= i + 2p`.
#[derive(Clone, Debug)]
pub struct BandLu {
    // w[[i, c + p - i]] = A[i, c]
    w: nd::Array2<f64>,
    // multipliers from elimination step k, mult[[k, t]] for row k + 1 + t
    mult: nd::Array2<f64>,
    // row swapped with row k at step k
    piv: Vec<usize>,
    p: usize,
}

impl BandLu {
    /// Factorize `h - sigma`, replacing any pivot smaller than `pivmin` in
    /// magnitude by `pivmin`.
    pub fn factor(h: &Hamiltonian, sigma: f64, pivmin: f64) -> Self {
        let n = h.dim();
        let p = h.bandwidth();
        let mut w: nd::Array2<f64> = nd::Array2::zeros((n, 3 * p + 1));
        for i in 0..n {
            for c in i.saturating_sub(p)..(i + p + 1).min(n) {
                w[[i, c + p - i]] = h.get(i, c);
            }
            w[[i, p]] -= sigma;
        }
        let mut mult: nd::Array2<f64> = nd::Array2::zeros((n, p.max(1)));
        let mut piv: Vec<usize> = Vec::with_capacity(n);
        for k in 0..n {
            let rend = (k + p).min(n - 1);
            let cend = (k + 2 * p).min(n - 1);
            let r
                = (k..=rend)
                .max_by(|&a, &b| {
                    w[[a, k + p - a]].abs().total_cmp(&w[[b, k + p - b]].abs())
                })
                .unwrap_or(k);
            if r != k {
                for c in k..=cend {
                    let tmp = w[[k, c + p - k]];
                    w[[k, c + p - k]] = w[[r, c + p - r]];
                    w[[r, c + p - r]] = tmp;
                }
            }
            piv.push(r);
            let pivot = guard_pivot(w[[k, p]], pivmin);
            w[[k, p]] = pivot;
            for i in k + 1..=rend {
                let m = w[[i, k + p - i]] / pivot;
                mult[[k, i - k - 1]] = m;
                w[[i, k + p - i]] = 0.0;
                if m == 0.0 { continue; }
                for c in k + 1..=cend {
                    w[[i, c + p - i]] -= m * w[[k, c + p - k]];
                }
            }
        }
        Self { w, mult, piv, p }
    }

    /// Solve `(H - σ) y = b` in place.
    ///
    /// *Panics if `b` does not match the matrix dimension*.
    pub fn solve_inplace<S>(&self, b: &mut Arr1<S>)
    where S: nd::DataMut<Elem = f64>
    {
        let n = self.piv.len();
        let p = self.p;
        assert_eq!(b.len(), n, "right-hand side has the wrong length");
        for k in 0..n {
            b.swap(k, self.piv[k]);
            let bk = b[k];
            for i in k + 1..(k + p + 1).min(n) {
                b[i] -= self.mult[[k, i - k - 1]] * bk;
            }
        }
        for k in (0..n).rev() {
            let mut s = b[k];
            for c in k + 1..(k + 2 * p + 1).min(n) {
                s -= self.w[[k, c + p - k]] * b[c];
            }
            b[k] = s / self.w[[k, p]];
        }
    }
}

// linear congruential generator for reproducible starting vectors
struct LcgRng(u64);

impl LcgRng {
    fn new(seed: u64) -> Self { Self(seed.wrapping_add(1)) }

    fn next_u64(&mut self) -> u64 {
        self.0
            = self.0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0
    }

    // uniform on [-1, 1)
    fn symmetric(&mut self) -> f64 {
        2.0 * ((self.next_u64() >> 11) as f64 / (1u64 << 53) as f64) - 1.0
    }
}

/// Compute the eigenvector for eigenvalue `lambda` by inverse iteration,
/// keeping it orthogonal to the rows of `found`.
///
/// Returns the unit-norm vector and its residual `‖Hq - λq‖`, or
/// [`XError::NoConvergence`] if the residual is still too large after
/// `maxiters` iterations.
pub fn inverse_iteration(
    h: &Hamiltonian,
    lambda: f64,
    found: nd::ArrayView2<f64>,
    index: usize,
    maxiters: usize,
) -> XResult<(nd::Array1<f64>, f64)>
{
    XError::check_maxiters(maxiters)?;
    let n = h.dim();
    let scale = matrix_scale(h);
    let tol = RESIDUAL_REL * scale * (n as f64).sqrt().max(1.0);
    let lu = BandLu::factor(h, lambda, f64::EPSILON * scale);
    let mut rng = LcgRng::new(index as u64);
    let mut q: nd::Array1<f64> = (0..n).map(|_| rng.symmetric()).collect();
    let mut residual = f64::INFINITY;
    for iter in 0..maxiters {
        lu.solve_inplace(&mut q);
        for prev in found.outer_iter() {
            let overlap = prev.dot(&q);
            q.scaled_add(-overlap, &prev);
        }
        let norm = q.dot(&q).sqrt();
        if !norm.is_finite() || norm == 0.0 { break; }
        q /= norm;
        let mut r = h.dot(&q);
        r.scaled_add(-lambda, &q);
        residual = r.dot(&r).sqrt();
        trace!("eigen: state {index} iteration {iter}: residual {residual:.3e}");
        if residual <= tol {
            return Ok((q, residual));
        }
    }
    Err(XError::NoConvergence { index, energy: lambda, residual })
}

/// Compute the `k` lowest eigenpairs of `h`, using the [method][Method] best
/// suited to its bandwidth.
///
/// `k` is clamped to `n - 1` if it is not already smaller than the matrix
/// dimension `n`; this is logged as a warning, not treated as an error.
/// `maxiters` caps the number of inverse iterations per eigenvector.
pub fn eigh_lowest(h: &Hamiltonian, k: usize, maxiters: usize)
    -> XResult<Eigenpairs>
{
    XError::check_maxiters(maxiters)?;
    let n = h.dim();
    let k
        = if k >= n {
            let clamped = n.saturating_sub(1);
            warn!(
                "eigen: requested {k} eigenstates from a {n}-point grid; \
                computing {clamped} instead"
            );
            clamped
        } else {
            k
        };
    let method = Method::select(h);
    debug!("eigen: {method:?} solve for {k} of {n} eigenpairs");
    let values = bisect_lowest(h, k, method);
    let mut vectors: nd::Array2<f64> = nd::Array2::zeros((k, n));
    for (j, &e) in values.iter().enumerate() {
        let (found, mut rest) = vectors.view_mut().split_at(nd::Axis(0), j);
        let (q, _) = inverse_iteration(h, e, found.view(), j, maxiters)?;
        rest.row_mut(0).assign(&q);
    }
    Ok(Eigenpairs { values: nd::Array1::from(values), vectors, method })
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use super::*;
    use crate::hamiltonian::Stencil;

    fn laplacian(n: usize) -> Hamiltonian {
        Hamiltonian::tridiagonal(
            &nd::Array1::from_elem(n, 2.0),
            &nd::Array1::from_elem(n - 1, -1.0),
        )
    }

    #[test]
    fn sturm_counts_2x2() {
        // [[1, -1], [-1, 3]] has eigenvalues 2 ∓ √2
        let d = nd::array![1.0, 3.0];
        let e = nd::array![-1.0];
        assert_eq!(sturm_count(&d, &e, 0.0), 0);
        assert_eq!(sturm_count(&d, &e, 1.0), 1);
        assert_eq!(sturm_count(&d, &e, 3.5), 1);
        assert_eq!(sturm_count(&d, &e, 4.0), 2);
    }

    #[test]
    fn inertia_agrees_with_sturm() {
        let h = laplacian(12);
        for lambda in [-0.5, 0.1, 0.9, 1.7, 2.0001, 3.3, 4.5] {
            assert_eq!(
                inertia_count(&h, lambda),
                sturm_count(&h.diag(), &h.offdiag(1), lambda),
            );
        }
    }

    #[test]
    fn inertia_survives_zero_pivots() {
        // free particle, 5-point: every diagonal entry is 5/2 T, so shifting
        // by it makes the first pivot exactly zero
        for (n, expected) in [(11, 6), (100, 52)] {
            let h = Hamiltonian::assemble(
                1.0, &nd::Array1::<f64>::zeros(n), Stencil::FivePoint);
            let t = crate::units::kinetic_coeff(1.0);
            let mid = 2.5 * t;
            assert_eq!(h.diag()[0], mid);
            assert_eq!(inertia_count(&h, mid), expected);
            // no eigenvalue lies within 0.03 T of the midpoint
            assert_eq!(inertia_count(&h, mid - 1e-6 * t), expected);
            assert_eq!(inertia_count(&h, mid + 1e-6 * t), expected);
        }

        // all-ones bands with a zero diagonal: eigenvalues
        // -1.80, -1.59, -0.59, -0.45, 1.25, 3.18
        let mut bands: nd::Array2<f64> = nd::Array2::ones((3, 6));
        bands.row_mut(0).fill(0.0);
        let h = Hamiltonian::from_bands(bands);
        assert_eq!(inertia_count(&h, 0.0), 4);
        assert_eq!(inertia_count(&h, -1.0), 2);
        assert_eq!(inertia_count(&h, 2.0), 5);
    }

    #[test]
    fn laplacian_spectrum() {
        let n = 50;
        let pairs = eigh_lowest(&laplacian(n), 6, 100).unwrap();
        assert!(pairs.method.is_tridiagonal());
        for (j, &e) in pairs.values.iter().enumerate() {
            let exact = 2.0 - 2.0 * ((j + 1) as f64 * PI / (n + 1) as f64).cos();
            assert!((e - exact).abs() < 1e-12, "{j}: {e} vs {exact}");
        }
        // eigenvectors are sin(jπi/(n + 1)) up to sign
        let q0 = pairs.vectors.row(0);
        let sign = q0[0].signum();
        let exact: nd::Array1<f64>
            = (0..n)
            .map(|i| ((i + 1) as f64 * PI / (n + 1) as f64).sin())
            .collect();
        let exact = &exact / exact.dot(&exact).sqrt();
        assert!(q0.iter().zip(&exact).all(|(a, b)| (sign * a - b).abs() < 1e-8));
    }

    #[test]
    fn pentadiagonal_matches_bisection_counts() {
        let v: nd::Array1<f64>
            = nd::Array1::linspace(-1.0, 1.0, 40).mapv(|x| 3.0 * x * x);
        let h = Hamiltonian::assemble(0.2, &v, Stencil::FivePoint);
        let pairs = eigh_lowest(&h, 5, 100).unwrap();
        assert!(pairs.method.is_banded());
        assert_eq!(pairs.len(), 5);
        for (j, q) in pairs.vectors.outer_iter().enumerate() {
            let e = pairs.values[j];
            assert_eq!(inertia_count(&h, e - 1e-9), j);
            let mut r = h.dot(&q);
            r.scaled_add(-e, &q);
            assert!(r.dot(&r).sqrt() < 1e-8 * h.norm_inf());
            assert!((q.dot(&q) - 1.0).abs() < 1e-12);
        }
        let gram = pairs.vectors.dot(&pairs.vectors.t());
        for ((i, j), g) in gram.indexed_iter() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((g - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn band_lu_solves() {
        let v = nd::array![0.5, -1.0, 2.0, 0.0, 1.5, -0.5, 0.25];
        let h = Hamiltonian::assemble(1.0, &v, Stencil::FivePoint);
        let sigma = 7.0;
        let lu = BandLu::factor(&h, sigma, 1e-300);
        let x = nd::array![1.0, 2.0, -1.0, 0.5, 0.0, 3.0, -2.0];
        let mut b = h.dot(&x);
        b.scaled_add(-sigma, &x);
        lu.solve_inplace(&mut b);
        assert!(b.iter().zip(&x).all(|(a, c)| (a - c).abs() < 1e-9));
    }

    #[test]
    fn clamps_requested_count() {
        let pairs = eigh_lowest(&laplacian(5), 10, 100).unwrap();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs.vectors.shape(), &[4, 5]);
        let pairs = eigh_lowest(&laplacian(5), 5, 100).unwrap();
        assert_eq!(pairs.len(), 4);
        let pairs = eigh_lowest(&laplacian(5), 0, 100).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn rejects_zero_maxiters() {
        assert!(matches!(
            eigh_lowest(&laplacian(5), 2, 0),
            Err(XError::BadMaxiters(0)),
        ));
    }
}
