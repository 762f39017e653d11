// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with assessing calibration solutions.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QualityError {
    #[error("None of the {num_candidates} calibration solutions passed the quality cuts; there is nothing to assign")]
    EmptyPool { num_candidates: usize },

    #[error("Got {num_obsids} obsids but {num_solutions} solutions files; these must match")]
    LengthMismatch {
        num_obsids: usize,
        num_solutions: usize,
    },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
