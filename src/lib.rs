// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Calibration-solution quality assessment and obsid bookkeeping for the GLEAM-X
pipeline.
 */

mod cli;
mod constants;
mod filenames;
mod io;
pub(crate) mod math;
mod obsids;
mod quality;
mod solutions;

// Re-exports.
pub use cli::{GleamX, GleamXError};
pub use constants::*;
pub use filenames::solutions_path;
pub use obsids::{check_missing, read_obsids_file, write_obsids_file, CheckMode, ObsidsError};
pub use quality::{
    assess, assign_nearest, check_single, classify, compute_statistics, AssignedSolution,
    Assignment, GoodSolution, QualityError, QualityFailure, QualityStatistics, QualityThresholds,
};
pub use solutions::{
    CalibrationSolutions, PhaseRefError, SolutionsReadError, SolutionsWriteError, XX, XY, YX, YY,
};

/// A double-precision complex number. Gains are always stored with this type.
#[allow(non_camel_case_types)]
pub type c64 = num_complex::Complex64;
