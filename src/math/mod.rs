// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics.


use crate::c64;

/// The population standard deviation of the supplied values, ignoring NaNs.
/// If there are no non-NaN values, NaN is returned.
pub(crate) fn nan_std<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let values: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if values.is_empty() {
        return f64::NAN;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// The population standard deviation of complex values, ignoring any value
/// with a NaN component. The deviation of each value from the mean is measured
/// by its modulus, so the real and imaginary parts contribute together.
pub(crate) fn nan_std_complex<I: IntoIterator<Item = c64>>(values: I) -> f64 {
    let values: Vec<c64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if values.is_empty() {
        return f64::NAN;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<c64>() / n;
    let variance = values.iter().map(|v| (v - mean).norm_sqr()).sum::<f64>() / n;
    variance.sqrt()
}
