// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Bookkeeping on sets of obsids.
//!
//! The GLEAM-X pipeline passes obsids around in new-line delimited text files.

mod error;

pub use error::ObsidsError;

use std::{
    collections::BTreeSet,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use itertools::Itertools;
use log::{debug, info};
use strum_macros::{Display, EnumIter, EnumString};

use crate::io::get_all_matches_from_glob;

lazy_static::lazy_static! {
    pub(crate) static ref CHECK_MODES_COMMA_SEPARATED: String = {
        use strum::IntoEnumIterator;
        CheckMode::iter().join(", ")
    };
}

/// The kinds of files that can be checked for with [`check_missing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum CheckMode {
    /// Zipped GPU box files, e.g. "1090008640_vis.zip".
    #[strum(serialize = "gpu")]
    Gpu,

    /// Zipped measurement sets, e.g. "1090008640_ms.zip".
    #[strum(serialize = "vis")]
    Vis,

    /// Directories named after obsids, e.g. "1090008640".
    #[strum(serialize = "folder")]
    Folder,
}

impl CheckMode {
    fn glob_pattern(self) -> &'static str {
        match self {
            CheckMode::Gpu => "*vis.zip",
            CheckMode::Vis => "*ms.zip",
            CheckMode::Folder => "[0-9][0-9][0-9][0-9][0-9][0-9][0-9][0-9][0-9][0-9]",
        }
    }
}

/// Parse a single obsid. Integral floats (e.g. "1.09e9") are accepted, because
/// some tools write obsids like this.
fn parse_obsid(s: &str) -> Option<u32> {
    if let Ok(obsid) = s.parse() {
        return Some(obsid);
    }
    let f: f64 = s.parse().ok()?;
    if f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f) {
        Some(f as u32)
    } else {
        None
    }
}

/// Read a new-line delimited file of obsids. Blank lines and anything after a
/// '#' are ignored.
pub fn read_obsids_file(file: &Path) -> Result<Vec<u32>, ObsidsError> {
    let f = BufReader::new(File::open(file)?);
    let mut obsids = vec![];
    for (i_line, line) in f.lines().enumerate() {
        let line = line?;
        let text = line.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }
        let obsid = parse_obsid(text).ok_or_else(|| ObsidsError::ParseObsid {
            file: file.display().to_string(),
            line_num: i_line + 1,
            text: text.to_string(),
        })?;
        obsids.push(obsid);
    }
    debug!("Read {} obsids from {}", obsids.len(), file.display());
    Ok(obsids)
}

/// Write a new-line delimited file of obsids. If `clobber` is false and the
/// file already exists, an error is returned.
pub fn write_obsids_file(obsids: &[u32], file: &Path, clobber: bool) -> Result<(), ObsidsError> {
    if !clobber && file.exists() {
        return Err(ObsidsError::OutputExists(file.display().to_string()));
    }

    info!("Writing {} with {} obsids", file.display(), obsids.len());
    let mut f = BufWriter::new(File::create(file)?);
    for obsid in obsids {
        writeln!(f, "{obsid}")?;
    }
    f.flush()?;
    Ok(())
}

/// Find which of `obsids` have no corresponding file (or directory) of the
/// given kind inside `dir`. A file's obsid is the part of its name before the
/// first underscore. The result is sorted and contains no duplicates.
pub fn check_missing(obsids: &[u32], mode: CheckMode, dir: &Path) -> Result<Vec<u32>, ObsidsError> {
    let candidates: BTreeSet<u32> = get_all_matches_from_glob(dir, mode.glob_pattern())?
        .into_iter()
        .filter(|p| mode != CheckMode::Folder || p.is_dir())
        .filter_map(|p| {
            let name = p.file_name()?.to_str()?.to_string();
            let obsid = parse_obsid(name.split('_').next()?);
            if obsid.is_none() {
                debug!("Ignoring {}; it doesn't start with an obsid", p.display());
            }
            obsid
        })
        .collect();
    debug!("Found {} {mode} candidates in {}", candidates.len(), dir.display());

    let missing: BTreeSet<u32> = obsids
        .iter()
        .copied()
        .filter(|o| !candidates.contains(o))
        .collect();
    Ok(missing.into_iter().collect())
}
