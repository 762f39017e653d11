// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to construct filenames.

use std::path::{Path, PathBuf};

/// Get the path to an obsid's calibration solutions. The filename is the obsid
/// followed by `stub`, e.g. "1090008640_solutions1.bin". If `dir` is given, the
/// file is inside it, otherwise the file is inside a directory named after the
/// obsid.
pub fn solutions_path(obsid: u32, stub: &str, dir: Option<&Path>) -> PathBuf {
    let filename = format!("{obsid}{stub}");
    match dir {
        Some(d) => d.join(filename),
        None => PathBuf::from(obsid.to_string()).join(filename),
    }
}
