//! Solve the one-dimensional, time-independent Schrödinger equation (TISE) by
//! diagonalizing a finite-difference Hamiltonian.
//!
//! ```
//! use fdtise::{ potential::Harmonic, solve };
//!
//! let qho = Harmonic::default(); // ħω = 10 meV
//! let states = solve::solve(200.0, 1000, &qho, 3, false).unwrap();
//! assert_eq!(states.len(), 3);
//! for (n, e) in states.get_energies().iter().enumerate() {
//!     assert!((e - qho.level(n)).abs() < 1e-4);
//! }
//! assert!(states.all_normalized());
//! ```

use std::{ cmp, time::{ Duration, Instant } };
use log::debug;
use ndarray as nd;
use crate::{
    eigen::{ self, Method },
    error::XError,
    grid::Grid,
    hamiltonian::{ Hamiltonian, Stencil },
    interp,
    potential::Potential,
    utils::{ is_normalized, norm_error, probability_density },
    DEF_EPSILON,
    DEF_MAXITERS,
};

pub type XResult<T> = Result<T, XError>;

/// A single solution to the TISE.
///
/// This struct is usually only returned from an [`Eigenstates`]; you probably
/// won't ever instantiate it yourself.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Energy
    pub e: f64,
    /// Wavefunction
    pub wf: nd::Array1<f64>,
}

impl Solution {
    /// Compare two `Solution`s by their energy.
    pub fn cmp_energy(&self, other: &Self) -> Option<cmp::Ordering> {
        self.e.partial_cmp(&other.e)
    }
}

/// Tuning parameters for the eigensolver and the normalization check.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SolverConfig {
    /// Tolerance on `|Σ ψ² dx - 1|` (default: `1e-6`).
    pub epsilon: Option<f64>,
    /// Maximum number of inverse iterations per eigenvector (default: `100`).
    pub maxiters: Option<usize>,
}

/// Lowest eigenstates of a finite-difference Hamiltonian, as returned by
/// [`solve`].
///
/// Energies are in ascending order and row `j` of the wavefunction array
/// belongs to energy `j`. Each wavefunction is scaled so that
/// `Σ ψ[i]² dx = 1`; its overall sign is arbitrary.
#[derive(Clone, Debug)]
pub struct Eigenstates {
    // time spent building and diagonalizing the Hamiltonian
    elapsed: Duration,
    // coordinate grid
    grid: Grid,
    // sampled potential
    V: nd::Array1<f64>,
    // eigenvalues
    energies: nd::Array1<f64>,
    // eigenvectors, one per row
    wfs: nd::Array2<f64>,
    // per-state normalization check results
    normalized: Vec<bool>,
    stencil: Stencil,
    method: Method,
}

impl Eigenstates {
    /// Wall-clock time spent on discretization and diagonalization.
    pub fn get_elapsed(&self) -> Duration { self.elapsed }

    /// Like [`Self::get_elapsed`], in seconds.
    pub fn elapsed_secs(&self) -> f64 { self.elapsed.as_secs_f64() }

    /// Get a reference to the coordinate grid.
    pub fn get_grid(&self) -> &Grid { &self.grid }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { self.grid.get_x() }

    /// Get the coordinate array grid spacing.
    pub fn get_dx(&self) -> f64 { self.grid.get_dx() }

    /// Get a reference to the sampled potential.
    pub fn get_V(&self) -> &nd::Array1<f64> { &self.V }

    /// Get a reference to the energy array.
    pub fn get_energies(&self) -> &nd::Array1<f64> { &self.energies }

    /// Get a reference to the wavefunction array (one state per row).
    pub fn get_wfs(&self) -> &nd::Array2<f64> { &self.wfs }

    /// Get the stencil used to build the Hamiltonian.
    pub fn get_stencil(&self) -> Stencil { self.stencil }

    /// Get the method used to diagonalize the Hamiltonian.
    pub fn get_method(&self) -> Method { self.method }

    /// Number of computed states.
    pub fn len(&self) -> usize { self.energies.len() }

    /// Return `true` if no states were computed.
    pub fn is_empty(&self) -> bool { self.energies.is_empty() }

    /// Energy of the lowest state, if any.
    pub fn ground_energy(&self) -> Option<f64> { self.energies.first().copied() }

    /// Differences between consecutive energies.
    pub fn spacings(&self) -> nd::Array1<f64> {
        crate::utils::array_diff(&self.energies)
    }

    /// Probability densities `|ψ|²`, one state per row.
    pub fn densities(&self) -> nd::Array2<f64> { self.wfs.mapv(|q| q * q) }

    /// Get the `j`-th state.
    pub fn get(&self, j: usize) -> Option<Solution> {
        (j < self.len())
            .then(|| Solution { e: self.energies[j], wf: self.wfs.row(j).to_owned() })
    }

    /// Copy every state out into a list of [`Solution`]s.
    pub fn solutions(&self) -> Vec<Solution> {
        self.energies.iter().zip(self.wfs.outer_iter())
            .map(|(&e, wf)| Solution { e, wf: wf.to_owned() })
            .collect()
    }

    /// Probability density of the `j`-th state.
    pub fn density(&self, j: usize) -> Option<nd::Array1<f64>> {
        (j < self.len()).then(|| probability_density(&self.wfs.row(j)))
    }

    /// `|Σ ψ² dx - 1|` for every state.
    pub fn norm_errors(&self) -> nd::Array1<f64> {
        let dx = self.get_dx();
        self.wfs.outer_iter().map(|wf| norm_error(&wf, dx)).collect()
    }

    /// Per-state results of the normalization check performed by the solver.
    pub fn normalized(&self) -> &[bool] { &self.normalized }

    /// Return `true` if every state passed the normalization check.
    pub fn all_normalized(&self) -> bool { self.normalized.iter().all(|ok| *ok) }

    /// Re-run the normalization check with a different tolerance.
    pub fn check_normalization(&self, epsilon: f64) -> Vec<bool> {
        let dx = self.get_dx();
        self.wfs.outer_iter().map(|wf| is_normalized(&wf, dx, epsilon)).collect()
    }

    /// Classical turning points of the `j`-th state.
    ///
    /// Returns an empty list if `j` is out of range.
    pub fn turning_points(&self, j: usize) -> XResult<Vec<f64>> {
        match self.energies.get(j) {
            Some(&e) => Ok(interp::turning_points(self.get_x(), &self.V, e)?),
            None => Ok(Vec::new()),
        }
    }

    /// Break apart into elapsed seconds, energies, and wavefunctions.
    pub fn into_parts(self) -> (f64, nd::Array1<f64>, nd::Array2<f64>) {
        (self.elapsed.as_secs_f64(), self.energies, self.wfs)
    }
}

/// Compute the `eigenstates` lowest states of a particle in `potential`,
/// discretized over `n` points on a box of length `l` (Å) centered on the
/// origin.
///
/// If `eigenstates >= n`, only `n - 1` states are computed. Fails if `n < 2`
/// or `l` is not positive, or if the eigensolver does not converge.
pub fn solve<P>(
    l: f64,
    n: usize,
    potential: &P,
    eigenstates: usize,
    five_point: bool,
) -> XResult<Eigenstates>
where P: Potential + ?Sized
{
    solve_with(
        l,
        n,
        potential,
        eigenstates,
        Stencil::from_five_point(five_point),
        SolverConfig::default(),
    )
}

/// Like [`solve`], but with an explicit stencil and solver configuration.
pub fn solve_with<P>(
    l: f64,
    n: usize,
    potential: &P,
    eigenstates: usize,
    stencil: Stencil,
    config: SolverConfig,
) -> XResult<Eigenstates>
where P: Potential + ?Sized
{
    let epsilon = config.epsilon.unwrap_or(DEF_EPSILON);
    let maxiters = config.maxiters.unwrap_or(DEF_MAXITERS);
    XError::check_epsilon(epsilon)?;
    XError::check_maxiters(maxiters)?;

    let start = Instant::now();
    let grid = Grid::new(l, n)?;
    let V = grid.sample(potential);
    let H = Hamiltonian::assemble(grid.get_dx(), &V, stencil);
    let eigen::Eigenpairs { values, mut vectors, method }
        = eigen::eigh_lowest(&H, eigenstates, maxiters)?;
    // unit vectors → Σ ψ² dx = 1
    vectors /= grid.get_dx().sqrt();
    let elapsed = start.elapsed();
    debug!(
        "solve: {n} points, {} states, {stencil:?}: {:.3e} s",
        values.len(),
        elapsed.as_secs_f64(),
    );

    let normalized: Vec<bool>
        = vectors.outer_iter()
        .map(|wf| is_normalized(&wf, grid.get_dx(), epsilon))
        .collect();
    Ok(Eigenstates {
        elapsed,
        grid,
        V,
        energies: values,
        wfs: vectors,
        normalized,
        stencil,
        method,
    })
}

/// Simple record of the parameters for a single solve.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Params {
    /// Box length (Å).
    pub l: f64,
    /// Number of grid points.
    pub n: usize,
    /// Number of states to compute.
    pub eigenstates: usize,
    /// Finite-difference stencil.
    pub stencil: Stencil,
}

impl Default for Params {
    fn default() -> Self {
        Self { l: 200.0, n: 2000, eigenstates: 5, stencil: Stencil::ThreePoint }
    }
}

impl Params {
    /// Thin interface to [`solve_with`] with the default configuration.
    pub fn solve<P>(&self, potential: &P) -> XResult<Eigenstates>
    where P: Potential + ?Sized
    {
        self.solve_with(potential, SolverConfig::default())
    }

    /// Thin interface to [`solve_with`].
    pub fn solve_with<P>(&self, potential: &P, config: SolverConfig)
        -> XResult<Eigenstates>
    where P: Potential + ?Sized
    {
        solve_with(
            self.l, self.n, potential, self.eigenstates, self.stencil, config)
    }

    /// Number of states a solve with these parameters will return.
    pub fn expected_states(&self) -> usize {
        if self.eigenstates >= self.n {
            self.n.saturating_sub(1)
        } else {
            self.eigenstates
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::potential::{ FiniteWell, Harmonic };

    #[test]
    fn clamps_to_n_minus_one() {
        let qho = Harmonic::default();
        let states = solve(10.0, 5, &qho, 10, false).unwrap();
        assert_eq!(states.len(), 4);
        assert_eq!(states.get_wfs().shape(), &[4, 5]);
        let states = solve(10.0, 5, &qho, 10, true).unwrap();
        assert_eq!(states.len(), 4);
        let params = Params { l: 10.0, n: 5, eigenstates: 10, ..Params::default() };
        assert_eq!(params.expected_states(), 4);
    }

    #[test]
    fn smallest_grid() {
        let states = solve(1.0, 2, &|_x: f64| 0.0, 5, false).unwrap();
        assert_eq!(states.len(), 1);
        assert!(states.all_normalized());
    }

    #[test]
    fn bad_inputs() {
        let qho = Harmonic::default();
        assert!(matches!(solve(10.0, 1, &qho, 1, false), Err(XError::BadGridSize(1))));
        assert!(matches!(solve(-1.0, 10, &qho, 1, false), Err(XError::BadBoxLength(_))));
        let config = SolverConfig { epsilon: Some(0.0), maxiters: None };
        assert!(matches!(
            solve_with(10.0, 10, &qho, 1, Stencil::ThreePoint, config),
            Err(XError::BadEpsilon(_)),
        ));
        let config = SolverConfig { epsilon: None, maxiters: Some(0) };
        assert!(matches!(
            solve_with(10.0, 10, &qho, 1, Stencil::ThreePoint, config),
            Err(XError::BadMaxiters(0)),
        ));
    }

    #[test]
    fn accessors_are_consistent() {
        let params = Params { n: 400, ..Params::default() };
        let states = params.solve(&FiniteWell::default()).unwrap();
        assert_eq!(states.len(), 5);
        assert_eq!(states.get_x().len(), 400);
        assert_eq!(states.get_V().len(), 400);
        assert_eq!(states.get_method(), Method::Tridiagonal);
        assert_eq!(states.get_stencil(), Stencil::ThreePoint);
        assert_eq!(states.spacings().len(), 4);
        assert!(states.spacings().iter().all(|de| *de > 0.0));
        let sols = states.solutions();
        assert_eq!(sols.len(), 5);
        assert_eq!(sols[0].cmp_energy(&sols[1]), Some(cmp::Ordering::Less));
        assert_eq!(states.get(0).map(|s| s.e), states.ground_energy());
        assert!(states.get(5).is_none());
        assert!(states.norm_errors().iter().all(|err| *err < 1e-9));
        assert!(states.check_normalization(1e-9).into_iter().all(|ok| ok));
        let rho = states.densities();
        let rho0 = states.density(0).unwrap();
        assert_eq!(rho.row(0), rho0);
        // the ground state sits well inside the 5 eV walls
        let tps = states.turning_points(0).unwrap();
        assert_eq!(tps.len(), 2);
        assert!(tps[0] < 0.0 && tps[1] > 0.0);
        let (secs, energies, wfs) = states.into_parts();
        assert!(secs >= 0.0);
        assert_eq!(energies.len(), wfs.nrows());
    }
}
