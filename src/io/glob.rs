// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Functions to glob files.

use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use thiserror::Error;

/// Given a directory and a glob pattern, get all of the matches inside the
/// directory. Any glob metacharacters in the directory itself are escaped. The
/// results are sorted.
pub(crate) fn get_all_matches_from_glob(dir: &Path, g: &str) -> Result<Vec<PathBuf>, GlobError> {
    let full = format!("{}/{g}", Pattern::escape(&dir.display().to_string()));
    let mut entries = vec![];
    for entry in glob(&full)? {
        match entry {
            Ok(e) => entries.push(e),
            Err(e) => return Err(GlobError::GlobCrate(e)),
        }
    }
    entries.sort_unstable();
    Ok(entries)
}

#[derive(Error, Debug)]
/// Error type associated with glob helper functions.
pub enum GlobError {
    #[error(transparent)]
    GlobCrate(#[from] glob::GlobError),

    #[error(transparent)]
    PatternError(#[from] glob::PatternError),
}
