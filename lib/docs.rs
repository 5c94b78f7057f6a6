//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Finite differences](#finite-differences)
//! - [Boundary conditions](#boundary-conditions)
//! - [Eigensolvers](#eigensolvers)
//! - [Normalization](#normalization)
//! - [Units](#units)
//!
//! # Background
//! The one-dimensional time-independent Schrödinger equation (TISE) for a
//! particle of mass *m* in a potential *V*(*x*) reads
//! ```text
//!    ħ² ∂²
//! - --- --- ψ(x) + V(x) ψ(x) = E ψ(x)
//!   2 m ∂x²
//! ```
//! and its solutions are eigenpairs of the Hamiltonian operator. For a
//! potential that confines the particle, the spectrum is discrete, the
//! eigenvalues are real, and the eigenfunctions may be chosen real-valued.
//!
//! Sampling *ψ* on a uniform grid and replacing the second derivative with a
//! finite-difference formula turns the differential equation into a matrix
//! eigenvalue problem *H* **ψ** = *E* **ψ** for a real symmetric matrix *H*.
//! Because each difference formula only couples nearby points, *H* is banded,
//! and only a handful of its lowest eigenpairs are usually of interest. Both
//! facts are exploited by the solvers in [`eigen`][crate::eigen].
//!
//! # Finite differences
//! On the grid
//! ```text
//! x[i] = -L/2 + i δx, i ∊ {0, ..., N - 1}
//! δx = L / (N - 1)
//! ```
//! the three-point central difference
//! ```text
//!  ∂²ψ      ψ[i - 1] - 2 ψ[i] + ψ[i + 1]
//! ----[i] ≈ ---------------------------- + O(δx²)
//!  ∂x²                  δx²
//! ```
//! produces a tridiagonal Hamiltonian, while the five-point formula
//! ```text
//!  ∂²ψ      -ψ[i - 2] + 16 ψ[i - 1] - 30 ψ[i] + 16 ψ[i + 1] - ψ[i + 2]
//! ----[i] ≈ ---------------------------------------------------------- + O(δx⁴)
//!  ∂x²                               12 δx²
//! ```
//! produces a pentadiagonal one. With *T* = *ħ*²/(2 *m* *δx*²), the matrix
//! elements are
//! ```text
//! 3-point:  H[i, i] = V[i] + 2 T       H[i, i±1] = -T
//! 5-point:  H[i, i] = V[i] + 5/2 T     H[i, i±1] = -4/3 T    H[i, i±2] = 1/12 T
//! ```
//! The higher-order stencil converges much faster in *δx* for smooth
//! potentials; for a square well, the discontinuity in *V* limits both
//! stencils to roughly first-order convergence in the energies.
//!
//! # Boundary conditions
//! Terms of either stencil that would reach past the ends of the grid are
//! simply dropped. This is equivalent to placing infinite walls one grid step
//! beyond each end of the box, so that *ψ* vanishes there. The box must
//! therefore be large compared to the classically allowed region of every
//! state of interest; otherwise the computed energies are pushed upward by
//! the walls.
//!
//! # Eigensolvers
//! Eigenvalues are located one at a time by bisection. For a trial value *λ*,
//! the number of eigenvalues of *H* below *λ* is equal to the number of
//! negative pivots in a symmetric factorization *H* - *λ* *I* = *L* *D*
//! *L*ᵀ (Sylvester's law of inertia). For a tridiagonal matrix, the pivots
//! satisfy the Sturm recurrence
//! ```text
//! d[0] = a[0] - λ
//! d[i] = a[i] - λ - b[i - 1]² / d[i - 1]
//! ```
//! and for wider bands the same count comes from an *L* *D* *L*ᵀ
//! factorization restricted to the band. Starting from a Gershgorin interval
//! containing the whole spectrum, the *k*-th eigenvalue is the point at which
//! the count steps from *k* to *k* + 1.
//!
//! With an eigenvalue *λ* known to near machine precision, its eigenvector is
//! the dominant direction of (*H* - *λ* *I*)⁻¹, which a couple of steps of
//! inverse iteration recover from a pseudo-random start vector. The shifted
//! matrix is factored once per eigenvalue with a banded LU decomposition with
//! partial pivoting, so each step costs *O*(*N* *p*²) for bandwidth *p*.
//! Vectors for nearby eigenvalues are kept orthogonal by Gram-Schmidt
//! projection against those already found.
//!
//! # Normalization
//! The eigensolver returns vectors of unit Euclidean norm. Discretizing the
//! probability integral with the rectangle rule,
//! ```text
//!   ⌠
//!   ⎮ |ψ(x)|² dx ≈ Σ ψ[i]² δx
//!   ⌡
//! ```
//! so the returned vectors are divided by √*δx* to become wavefunctions
//! normalized in the usual sense.
//!
//! # Units
//! Lengths are in ångströms, energies in electronvolts, and times in seconds;
//! the particle is an electron. In these units the kinetic coefficient
//! *ħ*²/2 *m*ₑ is about 3.81 eV Å², so that a grid step of 0.1 Å gives
//! *T* ≈ 381 eV. Items in [`units`][crate::units] provide the relevant
//! constants.
