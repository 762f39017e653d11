// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Useful constants.
//!
//! All defaults for solution quality cuts live here; nothing else in the
//! crate should hard-code them.

/// Solutions whose XX or YY gain amplitudes have a standard deviation at or
/// above this value are rejected.
pub const DEFAULT_AMP_STD_CUT: f64 = 50.0;

/// Solutions whose XX or YY gain phases have a standard deviation at or above
/// this value are rejected \[radians\].
pub const DEFAULT_PHASE_STD_CUT: f64 = 2.0;

/// Solutions with at least this fraction of NaN diagonal gains are rejected.
pub const DEFAULT_NAN_FRACTION_CUT: f64 = 0.3;

/// Real or imaginary gain components with a magnitude above this value are
/// treated as flagged before statistics are computed.
pub const DEFAULT_GAIN_CLIP: f64 = 1000.0;

/// The end of a solutions filename; the obsid comes before it.
pub const DEFAULT_SOLUTIONS_STUB: &str = "_solutions1.bin";

/// The directory containing calibration solutions.
pub const DEFAULT_CALIBRATION_DIR: &str = "calibration_solutions";

pub(crate) const SECONDS_PER_HOUR: f64 = 3600.0;
