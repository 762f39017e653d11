// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with obsid bookkeeping.

use thiserror::Error;

use crate::io::GlobError;

#[derive(Error, Debug)]
pub enum ObsidsError {
    #[error("{file} line {line_num}: '{text}' is not an obsid")]
    ParseObsid {
        file: String,
        line_num: usize,
        text: String,
    },

    #[error("Output file {0} already exists")]
    OutputExists(String),

    #[error(transparent)]
    Glob(#[from] GlobError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
