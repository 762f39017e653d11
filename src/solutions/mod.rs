// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to read and write calibration solutions.
//!
//! GLEAM-X calibration solutions are "André Offringa style" binary files, as
//! written by mwa-reduce's `calibrate`.

pub(crate) mod ao;
mod error;
mod phase_ref;

pub use error::*;
pub use phase_ref::PhaseRefError;

use std::{path::Path, str::FromStr};

use hifitime::Epoch;
use itertools::Itertools;
use log::debug;
use ndarray::prelude::*;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{c64, GleamXError};

/// Index of the XX gain along the polarisation axis.
pub const XX: usize = 0;
/// Index of the XY gain along the polarisation axis.
pub const XY: usize = 1;
/// Index of the YX gain along the polarisation axis.
pub const YX: usize = 2;
/// Index of the YY gain along the polarisation axis.
pub const YY: usize = 3;

lazy_static::lazy_static! {
    pub(crate) static ref CAL_SOLUTION_EXTENSIONS: String = CalSolutionType::iter().join(", ");
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(crate) enum CalSolutionType {
    /// The "André Offringa" format used by mwa-reduce.
    #[strum(serialize = "bin")]
    Bin,
}

#[derive(Debug, Clone, Default)]
pub struct CalibrationSolutions {
    /// The direction-independent calibration solutions. This has dimensions of
    /// (num_timeblocks, total_num_tiles, total_num_chanblocks, 4). The last
    /// axis holds the XX, XY, YX and YY gains, in that order. Flagged or
    /// unsolved gains are NaN.
    pub gains: Array4<c64>,

    /// The indices of tiles whose gains are all NaN. Zero indexed.
    pub flagged_tiles: Vec<usize>,

    /// The indices of chanblocks whose gains are all NaN. Zero indexed.
    pub flagged_chanblocks: Vec<usize>,

    /// The GPS start time of the data used to produce these solutions, if it
    /// was recorded.
    pub start_time: Option<Epoch>,

    /// The GPS end time of the data used to produce these solutions, if it was
    /// recorded.
    pub end_time: Option<Epoch>,
}

impl CalibrationSolutions {
    /// Make solutions out of a gain array, working out which tiles and
    /// chanblocks are flagged.
    pub fn from_gains(gains: Array4<c64>) -> CalibrationSolutions {
        let flagged_tiles = all_nan_indices(gains.view(), Axis(1));
        let flagged_chanblocks = all_nan_indices(gains.view(), Axis(2));
        CalibrationSolutions {
            gains,
            flagged_tiles,
            flagged_chanblocks,
            start_time: None,
            end_time: None,
        }
    }

    /// Read in calibration solutions from a file. The format of the file is
    /// determined by the file's extension (e.g. ".bin").
    pub fn read_solutions_from_ext<P: AsRef<Path>>(
        file: P,
    ) -> Result<CalibrationSolutions, GleamXError> {
        Self::read_solutions_from_ext_inner(file.as_ref()).map_err(GleamXError::from)
    }

    pub(crate) fn read_solutions_from_ext_inner(
        file: &Path,
    ) -> Result<CalibrationSolutions, SolutionsReadError> {
        let ext = file.extension().and_then(|e| e.to_str());
        match ext.and_then(|s| CalSolutionType::from_str(s).ok()) {
            Some(CalSolutionType::Bin) => ao::read(file),
            None => Err(SolutionsReadError::UnsupportedExt {
                ext: ext.unwrap_or("<no extension>").to_string(),
            }),
        }
    }

    /// From the target file extension, write out the appropriately-formatted
    /// solutions.
    pub fn write_solutions_from_ext<P: AsRef<Path>>(&self, file: P) -> Result<(), GleamXError> {
        Self::write_solutions_from_ext_inner(self, file.as_ref()).map_err(GleamXError::from)
    }

    pub(crate) fn write_solutions_from_ext_inner(
        sols: &CalibrationSolutions,
        file: &Path,
    ) -> Result<(), SolutionsWriteError> {
        let ext = file.extension().and_then(|e| e.to_str());
        match ext.and_then(|s| CalSolutionType::from_str(s).ok()) {
            Some(CalSolutionType::Bin) => ao::write(sols, file),
            None => Err(SolutionsWriteError::UnsupportedExt {
                ext: ext.unwrap_or("<no extension>").to_string(),
            }),
        }?;

        debug!("Wrote calibration solutions to {}", file.display());
        Ok(())
    }

    pub fn num_timeblocks(&self) -> usize {
        self.gains.len_of(Axis(0))
    }

    pub fn num_tiles(&self) -> usize {
        self.gains.len_of(Axis(1))
    }

    pub fn num_chanblocks(&self) -> usize {
        self.gains.len_of(Axis(2))
    }

    /// Divide all gains through by the phase of a reference tile's gains in
    /// the first timeblock. Unless `preserve_xterms` is set, the XY and YX
    /// gains are zeroed.
    pub fn phase_ref(
        &mut self,
        ref_tile: usize,
        incremental: bool,
        preserve_xterms: bool,
    ) -> Result<(), PhaseRefError> {
        phase_ref::divide_by_ref_phase(self.gains.view_mut(), ref_tile, incremental, preserve_xterms)
    }
}

/// Indices along `axis` where every gain in the corresponding sub-array is NaN.
fn all_nan_indices(gains: ArrayView4<c64>, axis: Axis) -> Vec<usize> {
    gains
        .axis_iter(axis)
        .enumerate()
        .filter(|(_, sub)| sub.iter().all(|g| g.is_nan()))
        .map(|pair| pair.0)
        .collect()
}
