// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tempfile::TempDir;

use crate::{get_cmd_output, gleam_x};

#[test]
fn test_obsids_check_prints_missing() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let dir = tmp_dir.path();
    std::fs::write(dir.join("1285581880_vis.zip"), b"").unwrap();
    std::fs::write(dir.join("1285582120_vis.zip"), b"").unwrap();
    let obsids_file = dir.join("obsids.txt");
    std::fs::write(&obsids_file, "1285582240\n1285581880\n1285582000\n1285582120\n").unwrap();

    #[rustfmt::skip]
    let cmd = gleam_x()
        .args([
            "obsids-check",
            &obsids_file.display().to_string(),
            "gpu",
            "-d", &dir.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "obsids-check failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert_eq!(stdout, "1285582000\n1285582240\n");
}

#[test]
fn test_check_files_writes_output() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let dir = tmp_dir.path();
    std::fs::create_dir(dir.join("1285581880")).unwrap();
    let obsids_file = dir.join("obsids.txt");
    std::fs::write(&obsids_file, "1285581880\n1285582000\n").unwrap();
    let output = dir.join("missing.txt");

    #[rustfmt::skip]
    let args = [
        "check-files",
        &obsids_file.display().to_string(),
        "folder",
        "--directory", &dir.display().to_string(),
        "--output", &output.display().to_string(),
    ];
    let cmd = gleam_x().args(args.clone()).ok();
    assert!(cmd.is_ok(), "check-files failed: {}", cmd.err().unwrap());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "1285582000\n");

    // The output isn't overwritten without --clobber.
    let cmd = gleam_x().args(args.clone()).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("already exists"), "{stderr}");

    let cmd = gleam_x().args(args).arg("--clobber").ok();
    assert!(cmd.is_ok(), "check-files failed: {}", cmd.err().unwrap());
}

#[test]
fn test_obsids_check_bad_mode() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let obsids_file = tmp_dir.path().join("obsids.txt");
    std::fs::write(&obsids_file, "1285581880\n").unwrap();

    let cmd = gleam_x()
        .args(["obsids-check", &obsids_file.display().to_string(), "zip"])
        .ok();
    assert!(cmd.is_err());
}
