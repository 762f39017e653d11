// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Divide calibration solutions through by the phase of a reference tile.

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use crate::{solutions::CalibrationSolutions, GleamXError};

#[derive(Parser, Debug)]
pub(crate) struct SolutionsPhaseRefArgs {
    /// The calibration solutions to be referenced.
    #[clap(name = "INPUT_SOLUTIONS", parse(from_os_str))]
    input: PathBuf,

    /// Where to write the referenced calibration solutions.
    #[clap(name = "OUTPUT_SOLUTIONS", parse(from_os_str))]
    output: PathBuf,

    /// The index of the reference tile. Zero indexed.
    #[clap(name = "REF_TILE")]
    ref_tile: usize,

    /// The input solutions are incremental; divide each gain by itself
    /// multiplied by the reference phase.
    #[clap(long)]
    incremental: bool,

    /// Keep the XY and YX gains. The default is to set them all to 0.
    #[clap(long, alias = "preserve_xterms")]
    preserve_xterms: bool,
}

impl SolutionsPhaseRefArgs {
    pub(crate) fn run(self) -> Result<(), GleamXError> {
        let SolutionsPhaseRefArgs {
            input,
            output,
            ref_tile,
            incremental,
            preserve_xterms,
        } = self;

        let mut sols = CalibrationSolutions::read_solutions_from_ext(&input)?;
        info!(
            "Read {} timeblocks, {} tiles and {} chanblocks from {}",
            sols.num_timeblocks(),
            sols.num_tiles(),
            sols.num_chanblocks(),
            input.display()
        );
        if sols.flagged_tiles.contains(&ref_tile) {
            warn!("Reference tile {ref_tile} is flagged; all referenced gains will be NaN");
        }

        sols.phase_ref(ref_tile, incremental, preserve_xterms)?;
        sols.write_solutions_from_ext(&output)?;
        info!("Wrote referenced solutions to {}", output.display());

        Ok(())
    }
}
