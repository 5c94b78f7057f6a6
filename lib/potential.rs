//! Potential-energy functions.
//!
//! Anything that maps a position (Å) to an energy (eV) can be used as a
//! potential, including plain closures:
//!
//! ```
//! use fdtise::potential::{ Harmonic, Potential };
//!
//! let linear = |x: f64| 0.01 * x;
//! assert_eq!(linear.eval(2.0), 0.02);
//!
//! let qho = Harmonic::default();
//! assert_eq!(qho.eval(0.0), 0.0);
//! assert!(qho.eval(-3.0) == qho.eval(3.0));
//! ```

use crate::units;

/// A real-valued potential energy as a function of position.
///
/// Implementations must be pure and defined over the whole simulation box.
pub trait Potential {
    /// Evaluate the potential (eV) at position `x` (Å).
    fn eval(&self, x: f64) -> f64;
}

impl<F> Potential for F
where F: Fn(f64) -> f64
{
    fn eval(&self, x: f64) -> f64 { self(x) }
}

/// Quantum harmonic oscillator for an electron,
/// ```text
/// V(x) = ½ mₑ ω² x²
/// ```
/// parameterized by the level spacing `ħω`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Harmonic {
    /// Oscillator quantum ħω (eV).
    pub hbar_omega: f64,
}

impl Default for Harmonic {
    fn default() -> Self { Self { hbar_omega: 10e-3 } }
}

impl Harmonic {
    pub fn new(hbar_omega: f64) -> Self { Self { hbar_omega } }

    /// Analytic energy of the `n`-th level, `ħω (n + ½)`.
    pub fn level(&self, n: usize) -> f64 {
        self.hbar_omega * (n as f64 + 0.5)
    }
}

impl Potential for Harmonic {
    fn eval(&self, x: f64) -> f64 {
        0.5 * units::omega(self.hbar_omega).powi(2) * units::me * x.powi(2)
    }
}

/// Finite square well centered on the origin: zero strictly inside
/// `|x| < width / 2` and `height` everywhere else.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FiniteWell {
    /// Barrier height (eV).
    pub height: f64,
    /// Full width of the well (Å).
    pub width: f64,
}

impl Default for FiniteWell {
    fn default() -> Self { Self { height: 5.0, width: 10.0 } }
}

impl FiniteWell {
    pub fn new(height: f64, width: f64) -> Self { Self { height, width } }
}

impl Potential for FiniteWell {
    fn eval(&self, x: f64) -> f64 {
        if x.abs() < self.width / 2.0 { 0.0 } else { self.height }
    }
}
