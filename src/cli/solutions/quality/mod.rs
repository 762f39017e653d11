// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Assess calibration solutions and pick solutions for obsids.


use std::path::{Path, PathBuf};

use clap::Parser;
use itertools::Itertools;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cli::common::{display_warnings, InfoPrinter, Warn, ARG_FILE_HELP},
    constants::{
        DEFAULT_AMP_STD_CUT, DEFAULT_CALIBRATION_DIR, DEFAULT_GAIN_CLIP, DEFAULT_NAN_FRACTION_CUT,
        DEFAULT_PHASE_STD_CUT, DEFAULT_SOLUTIONS_STUB,
    },
    filenames::solutions_path,
    quality::{assign_nearest, check_single, QualityThresholds},
    GleamXError,
};

lazy_static::lazy_static! {
    static ref AMP_CUT_HELP: String =
        format!("Solutions whose XX or YY gain amplitudes have a standard deviation at or above this are bad. Default: {DEFAULT_AMP_STD_CUT}");

    static ref PHASE_CUT_HELP: String =
        format!("Solutions whose XX or YY gain phases have a standard deviation at or above this are bad [radians]. Default: {DEFAULT_PHASE_STD_CUT}");

    static ref NAN_CUT_HELP: String =
        format!("Solutions whose fraction of NaN XX and YY gains is at or above this are bad. Default: {DEFAULT_NAN_FRACTION_CUT}");

    static ref CLIP_HELP: String =
        format!("Real or imaginary XX and YY gain components with a magnitude above this are treated as NaN. Default: {DEFAULT_GAIN_CLIP}");

    static ref SOLUTION_STUB_HELP: String =
        format!("Solutions files are named <obsid><stub>. Default: {DEFAULT_SOLUTIONS_STUB}");

    static ref CALIBRATION_DIR_HELP: String =
        format!("The directory containing solutions files. Default: {DEFAULT_CALIBRATION_DIR}");
}

#[derive(Error, Debug)]
pub(crate) enum SolutionsQualityArgsError {
    #[error("No obsids were supplied")]
    NoObsids,

    #[error("The gain clip must be a positive number, but got {0}")]
    BadClip(f64),
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct SolutionsQualityArgs {
    #[clap(long = "args-file", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    #[serde(skip)]
    args_file: Option<PathBuf>,

    /// The obsids to assess. With one obsid, its solutions file is printed if
    /// the solutions are good. With more, each obsid is assigned the good
    /// solutions nearest to it in time.
    #[clap(name = "OBSIDS", multiple_values(true))]
    #[serde(default)]
    obsids: Vec<u32>,

    #[clap(short = 'A', long, alias = "amp_cut", help = AMP_CUT_HELP.as_str(), help_heading = "QUALITY CUTS")]
    amp_cut: Option<f64>,

    #[clap(short = 'P', long, alias = "phase_cut", help = PHASE_CUT_HELP.as_str(), help_heading = "QUALITY CUTS")]
    phase_cut: Option<f64>,

    #[clap(short = 'N', long, aliases = &["perc-nan", "perc_nan"], help = NAN_CUT_HELP.as_str(), help_heading = "QUALITY CUTS")]
    nan_cut: Option<f64>,

    #[clap(short = 'c', long, help = CLIP_HELP.as_str(), help_heading = "QUALITY CUTS")]
    clip: Option<f64>,

    #[clap(short = 'S', long, alias = "solution_stub", help = SOLUTION_STUB_HELP.as_str(), help_heading = "SOLUTIONS FILES")]
    solution_stub: Option<String>,

    #[clap(short = 'C', long, alias = "calibration_dir", help = CALIBRATION_DIR_HELP.as_str(), help_heading = "SOLUTIONS FILES", parse(from_os_str))]
    calibration_dir: Option<PathBuf>,

    /// Look for solutions in per-obsid directories, i.e.
    /// <obsid>/<obsid><stub>, instead of the calibration directory.
    #[clap(long, help_heading = "SOLUTIONS FILES")]
    #[serde(default)]
    obsid_dirs: bool,

    /// The solutions file to assess when only one obsid is given. This
    /// overrides the stub and directory.
    #[clap(long, alias = "solution_file", help_heading = "SOLUTIONS FILES", parse(from_os_str))]
    solution_file: Option<PathBuf>,

    /// Write "<obsid> <solutions obsid> <separation [hours]>" lines to this
    /// file. Without it, the solutions obsids are printed on one line.
    #[clap(short = 'o', long, help_heading = "OUTPUT FILES", parse(from_os_str))]
    outname: Option<PathBuf>,
}

impl SolutionsQualityArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(crate) fn merge(self) -> Result<SolutionsQualityArgs, GleamXError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let SolutionsQualityArgs {
                args_file: _,
                obsids,
                amp_cut,
                phase_cut,
                nan_cut,
                clip,
                solution_stub,
                calibration_dir,
                obsid_dirs,
                solution_file,
                outname,
            } = unpack_arg_file!(arg_file);

            Ok(SolutionsQualityArgs {
                args_file: None,
                obsids: if cli_args.obsids.is_empty() {
                    obsids
                } else {
                    cli_args.obsids
                },
                amp_cut: cli_args.amp_cut.or(amp_cut),
                phase_cut: cli_args.phase_cut.or(phase_cut),
                nan_cut: cli_args.nan_cut.or(nan_cut),
                clip: cli_args.clip.or(clip),
                solution_stub: cli_args.solution_stub.or(solution_stub),
                calibration_dir: cli_args.calibration_dir.or(calibration_dir),
                obsid_dirs: cli_args.obsid_dirs || obsid_dirs,
                solution_file: cli_args.solution_file.or(solution_file),
                outname: cli_args.outname.or(outname),
            })
        } else {
            Ok(cli_args)
        }
    }

    /// The quality cuts, filling in defaults for anything not specified.
    fn thresholds(&self) -> QualityThresholds {
        QualityThresholds {
            amp_std_cut: self.amp_cut.unwrap_or(DEFAULT_AMP_STD_CUT),
            phase_std_cut: self.phase_cut.unwrap_or(DEFAULT_PHASE_STD_CUT),
            nan_fraction_cut: self.nan_cut.unwrap_or(DEFAULT_NAN_FRACTION_CUT),
        }
    }

    /// Where the solutions of `obsid` should be.
    fn solutions_file(&self, obsid: u32) -> PathBuf {
        let stub = self
            .solution_stub
            .as_deref()
            .unwrap_or(DEFAULT_SOLUTIONS_STUB);
        if self.obsid_dirs {
            solutions_path(obsid, stub, None)
        } else {
            let dir = self
                .calibration_dir
                .as_deref()
                .unwrap_or(Path::new(DEFAULT_CALIBRATION_DIR));
            solutions_path(obsid, stub, Some(dir))
        }
    }

    pub(crate) fn run(self) -> Result<(), GleamXError> {
        let obsids = match self.obsids.as_slice() {
            [] => return Err(SolutionsQualityArgsError::NoObsids.into()),
            o => o,
        };
        let thresholds = self.thresholds();
        let clip = self.clip.unwrap_or(DEFAULT_GAIN_CLIP);
        // NaN isn't positive either.
        if !(clip > 0.0) {
            return Err(SolutionsQualityArgsError::BadClip(clip).into());
        }

        let mut printer = InfoPrinter::new("Quality cuts".into());
        printer.push_line(format!("XX and YY amplitude std. dev. < {}", thresholds.amp_std_cut).into());
        printer.push_line(format!("XX and YY phase std. dev. < {} rad", thresholds.phase_std_cut).into());
        printer.push_line(format!("NaN fraction < {}", thresholds.nan_fraction_cut).into());
        printer.push_line(format!("Gain components clipped above {clip}").into());
        printer.display();

        if self.obsid_dirs && self.calibration_dir.is_some() {
            "--obsid-dirs was given, so the calibration directory is ignored".warn();
        }

        if let [obsid] = obsids {
            if self.outname.is_some() {
                "An output file is only written when there are multiple obsids; ignoring".warn();
            }
            display_warnings();

            let solutions_file = match self.solution_file.clone() {
                Some(f) => f,
                None => self.solutions_file(*obsid),
            };
            match check_single(*obsid, &solutions_file, &thresholds, clip) {
                Some(good) => println!("{}", good.display()),
                None => info!("Solutions for {obsid} are not good"),
            }
            return Ok(());
        }

        if self.solution_file.is_some() {
            "--solution-file is only used when there is a single obsid; ignoring".warn();
        }
        display_warnings();

        let solutions_files = obsids
            .iter()
            .map(|&obsid| self.solutions_file(obsid))
            .collect::<Vec<_>>();
        let assignment = assign_nearest(obsids, &solutions_files, &thresholds, clip)?;

        let best = assignment.best();
        let mut printer = InfoPrinter::new("Assigned solutions".into());
        printer.push_line(
            format!(
                "{} of {} solutions are good",
                assignment.good.len(),
                obsids.len()
            )
            .into(),
        );
        printer.push_line(
            format!(
                "Unique solutions: {}",
                assignment.unique_cal_obsids().iter().join(", ")
            )
            .into(),
        );
        printer.push_line(
            format!(
                "Max time separation: {} hours",
                assignment.max_separation_hours()
            )
            .into(),
        );
        printer.push_block(vec![
            format!("Best solution: {}", best.solutions_file.display()).into(),
            format!("(std. dev. {})", best.std).into(),
        ]);
        printer.display();

        match &self.outname {
            Some(outname) => {
                assignment.write_text_file(outname)?;
                info!("Wrote assignments to {}", outname.display());
            }
            None => println!(
                "{}",
                assignment.assigned.iter().map(|a| a.cal_obsid).join(" ")
            ),
        }

        Ok(())
    }
}
