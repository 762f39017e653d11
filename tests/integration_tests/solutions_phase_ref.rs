// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use ndarray::prelude::*;
use tempfile::TempDir;

use gleam_x::{c64, CalibrationSolutions, XX, XY, YX, YY};

use crate::{get_cmd_output, gleam_x, write_solutions};

/// Unit-amplitude gains whose phases depend on the tile and chanblock.
fn phased_gains() -> Array4<c64> {
    Array4::from_shape_fn((2, 4, 3, 4), |(t, tile, chan, pol)| {
        c64::from_polar(
            1.0 + pol as f64,
            0.1 * tile as f64 + 0.05 * chan as f64 + 0.01 * t as f64,
        )
    })
}

#[test]
fn test_phase_ref_zeroes_ref_tile_phases() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let input = write_solutions(tmp_dir.path(), 1090008640, phased_gains());
    let output = tmp_dir.path().join("referenced.bin");

    let cmd = gleam_x()
        .args([
            "solutions-phase-ref",
            &input.display().to_string(),
            &output.display().to_string(),
            "2",
        ])
        .ok();
    assert!(cmd.is_ok(), "solutions-phase-ref failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.is_empty(), "stdout wasn't empty: {stdout}");

    let sols = CalibrationSolutions::read_solutions_from_ext(&output).unwrap();
    assert_eq!(sols.gains.dim(), (2, 4, 3, 4));
    for chan in 0..3 {
        for pol in [XX, YY] {
            let g = sols.gains[(0, 2, chan, pol)];
            assert_abs_diff_eq!(g.arg(), 0.0, epsilon = 1e-10);
            // Amplitudes are untouched.
            assert_abs_diff_eq!(g.norm(), 1.0 + pol as f64, epsilon = 1e-10);

            // Other tiles keep their phase relative to the reference tile.
            let g = sols.gains[(0, 0, chan, pol)];
            assert_abs_diff_eq!(g.arg(), -0.2, epsilon = 1e-10);
        }
        for pol in [XY, YX] {
            assert_eq!(sols.gains[(1, 0, chan, pol)], c64::new(0.0, 0.0));
        }
    }
}

#[test]
fn test_phase_ref_preserve_xterms_alias() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let input = write_solutions(tmp_dir.path(), 1090008640, phased_gains());
    let output = tmp_dir.path().join("referenced.bin");

    let cmd = gleam_x()
        .args([
            "aocal-phaseref",
            &input.display().to_string(),
            &output.display().to_string(),
            "0",
            "--preserve-xterms",
        ])
        .ok();
    assert!(cmd.is_ok(), "aocal-phaseref failed: {}", cmd.err().unwrap());

    let sols = CalibrationSolutions::read_solutions_from_ext(&output).unwrap();
    let g = sols.gains[(0, 0, 0, XY)];
    assert_abs_diff_eq!(g.norm(), 2.0, epsilon = 1e-10);
    assert_abs_diff_eq!(g.arg(), 0.0, epsilon = 1e-10);
}

#[test]
fn test_phase_ref_bad_ref_tile() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let input = write_solutions(tmp_dir.path(), 1090008640, phased_gains());
    let output = tmp_dir.path().join("referenced.bin");

    let cmd = gleam_x()
        .args([
            "solutions-phase-ref",
            &input.display().to_string(),
            &output.display().to_string(),
            "4",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Error: Reference tile 4"), "{stderr}");
    assert!(!output.exists());
}
