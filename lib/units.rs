#![allow(non_upper_case_globals)]

//! Physical constants in the electron-volt/ångström/second unit system used
//! throughout the crate.
//!
//! Concrete values are taken from NIST (CODATA 2018). In particular the
//! electron rest energy is 0.51099895 MeV; code that uses the mistyped
//! 0.51999895 MeV gets a kinetic prefactor `ħ²/2mₑ` about 1.7% smaller, which
//! lowers square-well energies by a similar amount (0.2676 eV instead of
//! 0.2714 eV for the 5 eV, 10 Å well on a 2000-point, 200 Å grid). Harmonic
//! oscillator levels `ħω (n + ½)` do not depend on the mass.

/// reduced Planck constant (eV s)
pub const hbar: f64 = 6.582119569e-16;
//                +/- 0 (exact)

/// speed of light in vacuum (Å s^-1)
pub const c: f64 = 2.99792458e18;
//             +/- 0 (exact)

/// electron rest energy mₑc² (eV)
pub const mc2: f64 = 0.51099895000e6;
//               +/- 0.00000000015e6

/// electron mass (eV s^2 Å^-2)
pub const me: f64 = mc2 / (c * c);

/// ħ²/2mₑ (eV Å^2), the prefactor of the kinetic-energy operator.
pub const hbar2_2me: f64 = hbar * hbar / (2.0 * me);

/// Return the finite-difference kinetic coefficient `ħ²/(2 mₑ dx²)` for grid
/// spacing `dx` (Å), in eV.
pub fn kinetic_coeff(dx: f64) -> f64 { hbar2_2me / dx.powi(2) }

/// Convert an oscillator quantum `ħω` (eV) to an angular frequency (s^-1).
pub fn omega(hbar_omega: f64) -> f64 { hbar_omega / hbar }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinetic_prefactor() {
        // ħ²/2mₑ ≈ 3.81 eV Å²
        assert!((hbar2_2me - 3.80998).abs() < 1e-4);
        assert!((kinetic_coeff(0.1) - 100.0 * hbar2_2me).abs() < 1e-9);
    }

    #[test]
    fn rest_energy_sets_kinetic_scale() {
        // 0.51999895 MeV in place of 0.51099895 MeV shrinks ħ²/2mₑ by 1.7%
        let mistyped = hbar * hbar / (2.0 * 0.51999895069e6 / (c * c));
        assert!((mistyped / hbar2_2me - mc2 / 0.51999895069e6).abs() < 1e-14);
        assert!((1.0 - mistyped / hbar2_2me - 0.0173).abs() < 1e-4);
    }

    #[test]
    fn electron_mass_consistent() {
        assert!((me * c * c - mc2).abs() / mc2 < 1e-14);
        assert!((omega(10e-3) * hbar - 10e-3).abs() < 1e-18);
    }
}
