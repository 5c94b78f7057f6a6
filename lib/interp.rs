//! Locate zero crossings in array-sampled functions.
//!
//! Crossings are found by linear interpolation between the two samples that
//! bracket a sign change, which stays well-behaved for discontinuous
//! functions such as a square well.
//!
//! ```
//! use ndarray as nd;
//! use fdtise::interp::{ Zero, find_zeros };
//!
//! let x: nd::Array1<f64> = nd::Array::linspace(-5.0, 5.0, 1001);
//! let y = x.mapv(|xk| (xk + 3.0) * (xk - 0.5) * (xk - 2.0));
//! let zeros = find_zeros(&x, &y, Zero::All).unwrap();
//! assert_eq!(zeros.len(), 3);
//! assert!(
//!     [-3.0, 0.5, 2.0].into_iter()
//!         .zip(zeros)
//!         .all(|(expected, computed)| (computed - expected).abs() < 1e-3)
//! )
//! ```

use ndarray as nd;
use crate::{
    Arr1,
    error::LengthError,
};

pub type InterpResult<T> = Result<T, LengthError>;

/// Specifies a set of zeros to look for in [`find_zeros`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Zero {
    /// Points at which a function changes from positive to negative.
    Falling,
    /// Points at which a function changes from negative to positive.
    Rising,
    /// Either/both of the above.
    All,
}

impl Zero {
    fn matches(&self, a: f64, b: f64) -> bool {
        match self {
            Self::Falling => a > b,
            Self::Rising => a < b,
            Self::All => a != b,
        }
    }
}

/// Return a list of all zeros of a given kind in a sampled function, in
/// order of increasing index.
///
/// Samples that are exactly zero are reported as-is; a run of zero samples
/// yields each of its points.
pub fn find_zeros<S, T>(data_x: &Arr1<S>, data_y: &Arr1<T>, kind: Zero)
    -> InterpResult<Vec<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(data_x, data_y)?;
    let mut zeros: Vec<f64> = Vec::new();
    if let (Some(&x0), Some(&y0)) = (data_x.first(), data_y.first()) {
        if y0 == 0.0 { zeros.push(x0); }
    }
    let pairs
        = data_x.iter().zip(data_y)
        .zip(data_x.iter().zip(data_y).skip(1));
    for ((&xkm1, &ykm1), (&xk, &yk)) in pairs {
        if yk == 0.0 {
            zeros.push(xk);
        } else if ykm1 != 0.0 && ykm1 * yk < 0.0 && kind.matches(ykm1, yk) {
            zeros.push(xkm1 - ykm1 * (xk - xkm1) / (yk - ykm1));
        }
    }
    Ok(zeros)
}

/// Return the classical turning points for energy `E` in a sampled potential
/// `V`: the positions where `V(x) = E`.
pub fn turning_points<S, T>(x: &Arr1<S>, V: &Arr1<T>, E: f64)
    -> InterpResult<Vec<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let diff: nd::Array1<f64> = V.mapv(|Vk| Vk - E);
    find_zeros(x, &diff, Zero::All)
}
