//! Miscellaneous tools for working with sampled wavefunctions.
//!
//! ```
//! use ndarray as nd;
//! use fdtise::utils::{ wf_norm, is_normalized };
//!
//! let dx = 0.5;
//! let q = nd::array![1.0, 1.0, 0.0, 0.0];
//! assert_eq!(wf_norm(&q, dx), 1.0);
//! assert!(is_normalized(&q, dx, 1e-12));
//! assert!(!is_normalized(&(&q * 2.0), dx, 1e-12));
//! ```

use log::warn;
use ndarray::{ self as nd, Ix1 };
use num_traits::Float;

/// Calculate the discrete probability integral `Σ q[k]² dx` of a
/// wavefunction.
pub fn wf_norm<S, A>(q: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    q.iter().fold(A::zero(), |acc, &qk| acc + qk * qk) * dx
}

/// Calculate the discrete inner product `Σ q[k] p[k] dx` of two
/// wavefunctions.
pub fn wf_dot<S, T, A>(
    q: &nd::ArrayBase<S, Ix1>,
    p: &nd::ArrayBase<T, Ix1>,
    dx: A,
) -> A
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Float,
{
    q.iter().zip(p).fold(A::zero(), |acc, (&qk, &pk)| acc + qk * pk) * dx
}

/// Return the deviation of a wavefunction's probability integral from 1.
pub fn norm_error<S, A>(q: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    (wf_norm(q, dx) - A::one()).abs()
}

/// Return `true` if the probability integral of `q` lies within `epsilon` of
/// 1.
///
/// A failed check is logged as a warning along with the integral itself; it
/// is up to the caller to decide whether it is fatal.
pub fn is_normalized<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64, epsilon: f64)
    -> bool
where S: nd::Data<Elem = f64>
{
    let integral = wf_norm(q, dx);
    if (integral - 1.0).abs() < epsilon {
        true
    } else {
        warn!(
            "utils::is_normalized: wavefunction is not normalized: \
            integral = {integral:.12}, tolerance = {epsilon:.1e}"
        );
        false
    }
}

/// Return a copy of `q` with every amplitude squared.
pub fn probability_density<S, A>(q: &nd::ArrayBase<S, Ix1>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    q.mapv(|qk| qk * qk)
}

/// Return an array of differences between adjacent elements.
pub fn array_diff<S, A>(a: &nd::ArrayBase<S, Ix1>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: std::ops::Sub<A, Output = A> + Copy,
{
    a.iter().zip(a.iter().skip(1))
        .map(|(ak, akp1)| *akp1 - *ak)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norms() {
        let q = nd::array![0.5, -0.5, 0.5, -0.5];
        assert_eq!(wf_norm(&q, 1.0), 1.0);
        assert_eq!(wf_norm(&q, 0.25), 0.25);
        assert_eq!(norm_error(&q, 0.5), 0.5);
        let p = nd::array![0.5, 0.5, 0.5, 0.5];
        assert_eq!(wf_dot(&q, &p, 1.0), 0.0);
        assert_eq!(wf_dot(&q, &q, 2.0), 2.0);
    }

    #[test]
    fn normalization_is_two_sided() {
        let dx = 0.1;
        let q: nd::Array1<f64> = nd::Array1::from_elem(10, 1.0);
        assert!(is_normalized(&q, dx, 1e-9));
        // both over- and under-normalized states fail
        assert!(!is_normalized(&(&q * 1.01), dx, 1e-6));
        assert!(!is_normalized(&(&q * 0.99), dx, 1e-6));
        assert!(is_normalized(&(&q * 1.0000001), dx, 1e-6));
    }

    #[test]
    fn density_and_diff() {
        let q = nd::array![1.0_f32, -2.0, 3.0];
        assert_eq!(probability_density(&q).to_vec(), vec![1.0, 4.0, 9.0]);
        assert_eq!(array_diff(&q).to_vec(), vec![-3.0, 5.0]);
    }
}
