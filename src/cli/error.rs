// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all gleam-x-related errors. This should be the *only* error
//! enum that is publicly visible.

use thiserror::Error;

use super::solutions::SolutionsQualityArgsError;
use crate::{
    io::GlobError,
    obsids::ObsidsError,
    quality::QualityError,
    solutions::{PhaseRefError, SolutionsReadError, SolutionsWriteError},
};

/// The *only* publicly visible error from gleam-x. Where a hint helps, the
/// error message carries one.
#[derive(Error, Debug)]
pub enum GleamXError {
    /// Generic error surrounding calibration solutions.
    #[error("{0}")]
    Solutions(String),

    /// Error specific to AO calibration solutions.
    #[error("{0}\n\nAO solutions are the 'MWAOCAL' binary files written by mwa-reduce's calibrate.")]
    SolutionsAO(String),

    /// An error related to solution quality assessment.
    #[error("{0}")]
    Quality(String),

    /// An error related to obsid lists.
    #[error("{0}")]
    Obsids(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files are TOML or JSON with the same keys as the long command-line flags.")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

// Binary sub-command errors.

impl From<SolutionsQualityArgsError> for GleamXError {
    fn from(e: SolutionsQualityArgsError) -> Self {
        let s = e.to_string();
        match e {
            SolutionsQualityArgsError::NoObsids | SolutionsQualityArgsError::BadClip(_) => {
                Self::Quality(s)
            }
        }
    }
}

// Library code errors.

impl From<SolutionsReadError> for GleamXError {
    fn from(e: SolutionsReadError) -> Self {
        let s = e.to_string();
        match e {
            SolutionsReadError::UnsupportedExt { .. } => Self::Solutions(s),
            SolutionsReadError::AndreBinaryStr { .. }
            | SolutionsReadError::AndreBinaryVal { .. }
            | SolutionsReadError::BadShape { .. } => Self::SolutionsAO(s),
            SolutionsReadError::IO(e) => Self::from(e),
        }
    }
}

impl From<SolutionsWriteError> for GleamXError {
    fn from(e: SolutionsWriteError) -> Self {
        let s = e.to_string();
        match e {
            SolutionsWriteError::UnsupportedExt { .. } => Self::Solutions(s),
            SolutionsWriteError::BadPolCount { .. } => Self::SolutionsAO(s),
            SolutionsWriteError::IO(e) => Self::from(e),
        }
    }
}

impl From<PhaseRefError> for GleamXError {
    fn from(e: PhaseRefError) -> Self {
        Self::Solutions(e.to_string())
    }
}

impl From<QualityError> for GleamXError {
    fn from(e: QualityError) -> Self {
        let s = e.to_string();
        match e {
            QualityError::EmptyPool { .. } | QualityError::LengthMismatch { .. } => {
                Self::Quality(s)
            }
            QualityError::IO(e) => Self::from(e),
        }
    }
}

impl From<ObsidsError> for GleamXError {
    fn from(e: ObsidsError) -> Self {
        let s = e.to_string();
        match e {
            ObsidsError::ParseObsid { .. } | ObsidsError::OutputExists(_) => Self::Obsids(s),
            ObsidsError::Glob(e) => Self::from(e),
            ObsidsError::IO(e) => Self::from(e),
        }
    }
}

impl From<GlobError> for GleamXError {
    fn from(e: GlobError) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<std::io::Error> for GleamXError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
