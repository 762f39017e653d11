// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with reading or writing calibration solutions.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolutionsReadError {
    #[error("Tried to read calibration solutions file with an unsupported extension '{ext}'!")]
    UnsupportedExt { ext: String },

    #[error(
        "When reading {file}, expected MWAOCAL as the first 7 characters, got '{got}' instead!"
    )]
    AndreBinaryStr { file: String, got: String },

    #[error(
        "When reading {file}, expected a value {expected} in the header, but got '{got}' instead!"
    )]
    AndreBinaryVal {
        file: String,
        expected: &'static str,
        got: String,
    },

    #[error("The header of {file} describes {num_timeblocks} timeblocks, {num_tiles} tiles and {num_chanblocks} chanblocks, which needs {expected_bytes} bytes of gains, but {actual_bytes} bytes follow the header")]
    BadShape {
        file: String,
        num_timeblocks: usize,
        num_tiles: usize,
        num_chanblocks: usize,
        expected_bytes: u128,
        actual_bytes: u64,
    },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum SolutionsWriteError {
    #[error("Tried to write calibration solutions file with an unsupported extension '{ext}'!")]
    UnsupportedExt { ext: String },

    #[error("Cannot write solutions with {got} polarisations; exactly 4 are required")]
    BadPolCount { got: usize },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
