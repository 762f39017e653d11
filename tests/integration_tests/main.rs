// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod obsids_check;
mod solutions_phase_ref;
mod solutions_quality;

use std::{
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};
use ndarray::prelude::*;

use gleam_x::{c64, CalibrationSolutions};

fn gleam_x() -> Command {
    Command::cargo_bin("gleam-x").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Solutions that pass every quality cut; all gains are identical.
fn good_gains() -> Array4<c64> {
    Array4::from_elem((1, 8, 16, 4), c64::new(1.0, 0.0))
}

/// Solutions that fail the NaN cut; everything is flagged.
fn bad_gains() -> Array4<c64> {
    Array4::from_elem((1, 8, 16, 4), c64::new(f64::NAN, f64::NAN))
}

/// Write solutions into `dir` with the default GLEAM-X name for `obsid`.
fn write_solutions(dir: &Path, obsid: u32, gains: Array4<c64>) -> PathBuf {
    let file = dir.join(format!("{obsid}_solutions1.bin"));
    CalibrationSolutions::from_gains(gains)
        .write_solutions_from_ext(&file)
        .unwrap();
    file
}
