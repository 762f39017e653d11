// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Divide calibration solutions through by the phase of a reference tile.

use log::{debug, warn};
use ndarray::{prelude::*, Zip};
use thiserror::Error;

use super::{XY, YX};
use crate::c64;

#[derive(Error, Debug)]
pub enum PhaseRefError {
    #[error("Reference tile {ref_tile} is not available; the solutions only have {num_tiles} tiles")]
    BadRefTile { ref_tile: usize, num_tiles: usize },

    #[error("The solutions have no timeblocks, so there is no reference phase")]
    NoTimeblocks,
}

/// The reference phasors are taken from the reference tile's gains in the
/// first timeblock, and one phasor per (chanblock, polarisation) is applied to
/// every timeblock and tile. A reference gain that is NaN or zero makes the
/// corresponding gains NaN.
///
/// If `incremental` is true, each gain `g` becomes `g / (g * ref)` instead of
/// `g / ref`.
pub(super) fn divide_by_ref_phase(
    mut gains: ArrayViewMut4<c64>,
    ref_tile: usize,
    incremental: bool,
    preserve_xterms: bool,
) -> Result<(), PhaseRefError> {
    let (num_timeblocks, num_tiles, _, _) = gains.dim();
    if num_timeblocks == 0 {
        return Err(PhaseRefError::NoTimeblocks);
    }
    if ref_tile >= num_tiles {
        return Err(PhaseRefError::BadRefTile {
            ref_tile,
            num_tiles,
        });
    }

    // Dimensions (chanblock, polarisation).
    let ref_phasors: Array2<c64> = gains
        .slice(s![0, ref_tile, .., ..])
        .mapv(|g| g / g.norm());
    debug!(
        "Dividing {num_timeblocks} timeblocks and {num_tiles} tiles by the phase of tile {ref_tile}"
    );

    if incremental {
        warn!("Incremental reference-phase division is untested!");
    }
    for mut timeblock in gains.outer_iter_mut() {
        for mut tile in timeblock.outer_iter_mut() {
            Zip::from(&mut tile).and(&ref_phasors).for_each(|g, &r| {
                *g = if incremental { *g / (*g * r) } else { *g / r };
            });
        }
    }

    if !preserve_xterms {
        gains
            .slice_mut(s![.., .., .., XY..=YX])
            .fill(c64::new(0.0, 0.0));
    }

    Ok(())
}
