// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calibration solution quality assessment.
//!
//! Solutions are summarised by the spread of their diagonal (XX and YY) gains.
//! Those that pass all of the quality cuts form a pool of good solutions, and
//! every obsid is assigned the good solution nearest to it in time.

mod error;

pub use error::QualityError;

use std::{
    collections::BTreeSet,
    fmt::Display,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, trace, warn};
use ndarray::prelude::*;
use vec1::Vec1;

use crate::{
    c64,
    constants::{
        DEFAULT_AMP_STD_CUT, DEFAULT_NAN_FRACTION_CUT, DEFAULT_PHASE_STD_CUT, SECONDS_PER_HOUR,
    },
    math::{nan_std, nan_std_complex},
    solutions::{ao, SolutionsReadError, XX, YY},
};

/// The cuts applied to [`QualityStatistics`]. A solution is only good if each
/// statistic is strictly below its cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityThresholds {
    /// The cut on the standard deviation of XX and YY gain amplitudes.
    pub amp_std_cut: f64,

    /// The cut on the standard deviation of XX and YY gain phases \[radians\].
    pub phase_std_cut: f64,

    /// The cut on the fraction of diagonal gains that are NaN.
    pub nan_fraction_cut: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            amp_std_cut: DEFAULT_AMP_STD_CUT,
            phase_std_cut: DEFAULT_PHASE_STD_CUT,
            nan_fraction_cut: DEFAULT_NAN_FRACTION_CUT,
        }
    }
}

/// Summary statistics of a set of calibration solutions. All standard
/// deviations ignore NaN gains; if there are no non-NaN gains, they are NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityStatistics {
    pub amp_std_xx: f64,
    pub amp_std_yy: f64,
    pub phase_std_xx: f64,
    pub phase_std_yy: f64,

    /// The fraction of XX and YY gains that are NaN (after clipping).
    pub nan_fraction: f64,

    /// The standard deviation of all XX and YY gains together, treating each
    /// gain as a complex number.
    pub std: f64,
}

/// A quality cut that a set of solutions failed, along with the offending
/// value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QualityFailure {
    AmpXX(f64),
    AmpYY(f64),
    PhaseXX(f64),
    PhaseYY(f64),
    NanFraction(f64),
}

impl Display for QualityFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityFailure::AmpXX(v) => write!(f, "failing XX amp cut {v}"),
            QualityFailure::AmpYY(v) => write!(f, "failing YY amp cut {v}"),
            QualityFailure::PhaseXX(v) => write!(f, "failing XX phase cut {v}"),
            QualityFailure::PhaseYY(v) => write!(f, "failing YY phase cut {v}"),
            QualityFailure::NanFraction(v) => write!(f, "failing NaN cut {v}"),
        }
    }
}

impl QualityStatistics {
    /// All of the cuts these statistics fail. A NaN statistic fails its cut.
    pub fn failures(&self, thresholds: &QualityThresholds) -> Vec<QualityFailure> {
        let checks: [(f64, f64, fn(f64) -> QualityFailure); 5] = [
            (self.amp_std_xx, thresholds.amp_std_cut, QualityFailure::AmpXX),
            (self.amp_std_yy, thresholds.amp_std_cut, QualityFailure::AmpYY),
            (self.phase_std_xx, thresholds.phase_std_cut, QualityFailure::PhaseXX),
            (self.phase_std_yy, thresholds.phase_std_cut, QualityFailure::PhaseYY),
            (self.nan_fraction, thresholds.nan_fraction_cut, QualityFailure::NanFraction),
        ];
        checks
            .into_iter()
            // Written this way so that NaN fails.
            .filter(|(value, cut, _)| !(value < cut))
            .map(|(value, _, failure)| failure(value))
            .collect()
    }
}

/// Compute quality statistics for gains with dimensions (timeblock, tile,
/// chanblock, polarisation). Only the XX and YY gains are used. Any real or
/// imaginary component of these with a magnitude above `clip` is replaced with
/// NaN first.
pub fn compute_statistics(gains: ArrayView4<c64>, clip: f64) -> QualityStatistics {
    let clip_component = |v: f64| if v.abs() > clip { f64::NAN } else { v };
    let diagonal = gains
        .select(Axis(3), &[XX, YY])
        .mapv(|g| c64::new(clip_component(g.re), clip_component(g.im)));

    let num_total = diagonal.len();
    let num_nan = diagonal.iter().filter(|g| g.is_nan()).count();
    // Solutions without any gains can't be used for anything.
    let nan_fraction = if num_total == 0 {
        1.0
    } else {
        num_nan as f64 / num_total as f64
    };

    let xx = diagonal.index_axis(Axis(3), 0);
    let yy = diagonal.index_axis(Axis(3), 1);
    QualityStatistics {
        amp_std_xx: nan_std(xx.iter().map(|g| g.norm())),
        amp_std_yy: nan_std(yy.iter().map(|g| g.norm())),
        phase_std_xx: nan_std(xx.iter().map(|g| g.arg())),
        phase_std_yy: nan_std(yy.iter().map(|g| g.arg())),
        nan_fraction,
        std: nan_std_complex(diagonal.iter().copied()),
    }
}

/// Read an AO-style solutions file and compute its quality statistics. The
/// file is closed before this function returns.
pub fn assess(solutions_file: &Path, clip: f64) -> Result<QualityStatistics, SolutionsReadError> {
    // GLEAM-X solutions are always AO binaries, whatever the filename stub.
    let sols = ao::read(solutions_file)?;
    let stats = compute_statistics(sols.gains.view(), clip);
    trace!("{}: {stats:?}", solutions_file.display());
    Ok(stats)
}

/// Are these statistics good enough? Each failed cut is logged against `name`.
pub fn classify(stats: &QualityStatistics, thresholds: &QualityThresholds, name: &str) -> bool {
    let failures = stats.failures(thresholds);
    for failure in &failures {
        warn!("{name} {failure}");
    }
    failures.is_empty()
}

/// A calibration solution that passed all quality cuts.
#[derive(Debug, Clone, PartialEq)]
pub struct GoodSolution {
    pub obsid: u32,
    pub solutions_file: PathBuf,
    pub std: f64,
}

/// The good solution assigned to an obsid.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedSolution {
    /// The obsid that needs solutions.
    pub obsid: u32,

    /// The obsid that the solutions came from.
    pub cal_obsid: u32,

    pub solutions_file: PathBuf,

    /// The overall standard deviation of the assigned solutions.
    pub std: f64,
}

impl AssignedSolution {
    pub fn separation_hours(&self) -> f64 {
        f64::from(self.obsid.abs_diff(self.cal_obsid)) / SECONDS_PER_HOUR
    }
}

#[derive(Debug, Clone)]
pub struct Assignment {
    /// All of the solutions that passed the quality cuts, in the order that
    /// they were assessed.
    pub good: Vec1<GoodSolution>,

    /// One entry per requested obsid, in the order they were requested.
    pub assigned: Vec<AssignedSolution>,
}

impl Assignment {
    /// The overall standard deviations of all of the good solutions.
    pub fn stds(&self) -> Vec<f64> {
        self.good.iter().map(|g| g.std).collect()
    }

    /// The good solution with the smallest overall standard deviation. The
    /// first one wins any ties.
    pub fn best(&self) -> &GoodSolution {
        let mut best = self.good.first();
        for g in self.good.iter().skip(1) {
            if g.std < best.std {
                best = g;
            }
        }
        best
    }

    /// The distinct obsids of the assigned solutions.
    pub fn unique_cal_obsids(&self) -> BTreeSet<u32> {
        self.assigned.iter().map(|a| a.cal_obsid).collect()
    }

    pub fn max_separation_hours(&self) -> f64 {
        self.assigned
            .iter()
            .map(|a| a.separation_hours())
            .fold(0.0, f64::max)
    }

    /// Write "<obsid> <cal obsid> <separation in hours>" lines to a file.
    pub fn write_text_file(&self, file: &Path) -> Result<(), QualityError> {
        let mut f = BufWriter::new(File::create(file)?);
        for a in &self.assigned {
            // The Debug representation is the shortest one that round trips,
            // and always has a decimal point (e.g. "0.0").
            writeln!(f, "{} {} {:?}", a.obsid, a.cal_obsid, a.separation_hours())?;
        }
        f.flush()?;
        debug!("Wrote {} assignments to {}", self.assigned.len(), file.display());
        Ok(())
    }
}

/// Assess the solutions of each obsid and assign every obsid the good solution
/// nearest to it in time. Solutions that can't be read are excluded from the
/// good pool, but their obsids are still assigned solutions. When two good
/// solutions are equally near, the one assessed first wins.
pub fn assign_nearest<P: AsRef<Path>>(
    obsids: &[u32],
    solutions_files: &[P],
    thresholds: &QualityThresholds,
    clip: f64,
) -> Result<Assignment, QualityError> {
    if obsids.len() != solutions_files.len() {
        return Err(QualityError::LengthMismatch {
            num_obsids: obsids.len(),
            num_solutions: solutions_files.len(),
        });
    }

    let mut good = vec![];
    for (&obsid, solutions_file) in obsids.iter().zip(solutions_files) {
        let solutions_file = solutions_file.as_ref();
        let stats = match assess(solutions_file, clip) {
            Ok(s) => s,
            Err(e) => {
                warn!(
                    "Excluding solutions for {obsid} ({}): {e}",
                    solutions_file.display()
                );
                continue;
            }
        };
        if classify(&stats, thresholds, &solutions_file.display().to_string()) {
            good.push(GoodSolution {
                obsid,
                solutions_file: solutions_file.to_path_buf(),
                std: stats.std,
            });
        }
    }
    let good = Vec1::try_from_vec(good).map_err(|_| QualityError::EmptyPool {
        num_candidates: obsids.len(),
    })?;
    debug!("{} of {} solutions are good", good.len(), obsids.len());

    let assigned = obsids
        .iter()
        .map(|&obsid| {
            let nearest = nearest_good(&good, obsid);
            AssignedSolution {
                obsid,
                cal_obsid: nearest.obsid,
                solutions_file: nearest.solutions_file.clone(),
                std: nearest.std,
            }
        })
        .collect();

    Ok(Assignment { good, assigned })
}

/// The good solution with the smallest time separation from `obsid`. Only a
/// strictly smaller separation displaces an earlier candidate.
fn nearest_good(good: &Vec1<GoodSolution>, obsid: u32) -> &GoodSolution {
    let mut nearest = good.first();
    for g in good.iter().skip(1) {
        if g.obsid.abs_diff(obsid) < nearest.obsid.abs_diff(obsid) {
            nearest = g;
        }
    }
    nearest
}

/// Assess a single obsid's solutions, returning the solutions file only if it
/// passes all quality cuts. Unreadable solutions are not good.
pub fn check_single(
    obsid: u32,
    solutions_file: &Path,
    thresholds: &QualityThresholds,
    clip: f64,
) -> Option<PathBuf> {
    match assess(solutions_file, clip) {
        Ok(stats) => classify(&stats, thresholds, &solutions_file.display().to_string())
            .then(|| solutions_file.to_path_buf()),
        Err(e) => {
            warn!(
                "Couldn't assess solutions for {obsid} ({}): {e}",
                solutions_file.display()
            );
            None
        }
    }
}
