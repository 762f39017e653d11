// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use indoc::indoc;
use tempfile::TempDir;

use crate::{bad_gains, get_cmd_output, gleam_x, good_gains, write_solutions};

#[test]
fn test_single_good_obsid_prints_its_solutions() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let sols = write_solutions(tmp_dir.path(), 1090008640, good_gains());

    #[rustfmt::skip]
    let cmd = gleam_x()
        .args([
            "solutions-quality",
            "1090008640",
            "-C", &tmp_dir.path().display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "solutions-quality failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert_eq!(stdout, format!("{}\n", sols.display()));
}

#[test]
fn test_single_bad_obsid_prints_nothing() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    write_solutions(tmp_dir.path(), 1090008640, bad_gains());

    #[rustfmt::skip]
    let cmd = gleam_x()
        .args([
            "solutions-quality",
            "1090008640",
            "-C", &tmp_dir.path().display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "solutions-quality failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stdout.is_empty(), "stdout wasn't empty: {stdout}");
    assert!(stderr.contains("failing NaN cut 1"), "{stderr}");
}

#[test]
fn test_single_obsid_with_solution_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    // The name doesn't follow the usual convention.
    let sols = write_solutions(tmp_dir.path(), 1, good_gains());

    let cmd = gleam_x()
        .args([
            "get-calibration-solutions",
            "1090008640",
            "--solution-file",
            &sols.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "solutions-quality failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert_eq!(stdout, format!("{}\n", sols.display()));
}

#[test]
fn test_many_obsids_print_assigned_obsids() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    write_solutions(tmp_dir.path(), 1000000000, good_gains());
    write_solutions(tmp_dir.path(), 1000000100, bad_gains());
    write_solutions(tmp_dir.path(), 1000000300, good_gains());
    // 1000000400 has no solutions at all, but still gets assigned some.

    #[rustfmt::skip]
    let cmd = gleam_x()
        .args([
            "solutions-quality",
            "1000000000", "1000000100", "1000000300", "1000000400",
            "-C", &tmp_dir.path().display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "solutions-quality failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert_eq!(stdout, "1000000000 1000000000 1000000300 1000000300\n");
}

#[test]
fn test_many_obsids_write_text_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    write_solutions(tmp_dir.path(), 1000000000, good_gains());
    write_solutions(tmp_dir.path(), 1000000100, bad_gains());
    write_solutions(tmp_dir.path(), 1000000300, good_gains());
    let outname = tmp_dir.path().join("assigned.txt");

    #[rustfmt::skip]
    let cmd = gleam_x()
        .args([
            "solutions-quality",
            "1000000000", "1000000100", "1000000300",
            "-C", &tmp_dir.path().display().to_string(),
            "-o", &outname.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "solutions-quality failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stdout.is_empty(), "stdout wasn't empty: {stdout}");
    assert!(
        stderr.contains("Unique solutions: 1000000000, 1000000300"),
        "{stderr}"
    );

    let contents = std::fs::read_to_string(&outname).unwrap();
    assert_eq!(
        contents,
        indoc! {"
            1000000000 1000000000 0.0
            1000000100 1000000000 0.027777777777777776
            1000000300 1000000300 0.0
        "}
    );
}

#[test]
fn test_no_good_solutions_is_an_error() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    write_solutions(tmp_dir.path(), 1000000000, bad_gains());

    #[rustfmt::skip]
    let cmd = gleam_x()
        .args([
            "solutions-quality",
            "1000000000", "1000000100",
            "-C", &tmp_dir.path().display().to_string(),
        ])
        .ok();
    assert!(cmd.is_err());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stdout.is_empty(), "stdout wasn't empty: {stdout}");
    assert!(
        stderr.contains("Error: None of the 2 calibration solutions passed"),
        "{stderr}"
    );
}

#[test]
fn test_no_obsids_is_an_error() {
    let cmd = gleam_x().args(["solutions-quality", "-A", "10"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Error: No obsids were supplied"), "{stderr}");
}

#[test]
fn test_arg_file_supplies_obsids() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let sols = write_solutions(tmp_dir.path(), 1090008640, good_gains());
    let arg_file = tmp_dir.path().join("args.json");
    std::fs::write(
        &arg_file,
        serde_json::json!({
            "obsids": [1090008640],
            "calibration_dir": tmp_dir.path(),
        })
        .to_string(),
    )
    .unwrap();

    let cmd = gleam_x()
        .args([
            "solutions-quality",
            "--args-file",
            &arg_file.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "solutions-quality failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert_eq!(stdout, format!("{}\n", sols.display()));
}

#[test]
fn test_obsid_dirs_layout() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let obsid_dir = tmp_dir.path().join("1090008640");
    std::fs::create_dir(&obsid_dir).unwrap();
    write_solutions(&obsid_dir, 1090008640, good_gains());

    let cmd = gleam_x()
        .current_dir(tmp_dir.path())
        .args(["solutions-quality", "1090008640", "--obsid-dirs"])
        .ok();
    assert!(cmd.is_ok(), "solutions-quality failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert_eq!(stdout, "1090008640/1090008640_solutions1.bin\n");
}
