// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find obsids that are missing their data products.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::{
    obsids::{
        check_missing, read_obsids_file, write_obsids_file, CheckMode, CHECK_MODES_COMMA_SEPARATED,
    },
    GleamXError,
};

lazy_static::lazy_static! {
    static ref CHECK_MODE_HELP: String =
        format!("What to look for. gpu: <obsid>*vis.zip files, vis: <obsid>*ms.zip files, folder: <obsid> directories. Supported modes: {}", *CHECK_MODES_COMMA_SEPARATED);
}

#[derive(Parser, Debug)]
pub(crate) struct ObsidsCheckArgs {
    /// A new-line delimited file of obsids.
    #[clap(name = "OBSIDS_FILE", parse(from_os_str))]
    obsids_file: PathBuf,

    #[clap(name = "TYPE", help = CHECK_MODE_HELP.as_str())]
    mode: CheckMode,

    /// The directory to search.
    #[clap(short, long, default_value = ".", parse(from_os_str))]
    directory: PathBuf,

    /// Also write the missing obsids to this file.
    #[clap(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Overwrite the output file if it already exists.
    #[clap(long)]
    clobber: bool,
}

impl ObsidsCheckArgs {
    pub(crate) fn run(self) -> Result<(), GleamXError> {
        let ObsidsCheckArgs {
            obsids_file,
            mode,
            directory,
            output,
            clobber,
        } = self;

        let obsids = read_obsids_file(&obsids_file)?;
        info!("Read {} obsids from {}", obsids.len(), obsids_file.display());

        let missing = check_missing(&obsids, mode, &directory)?;
        info!("{} of them are missing {mode} data", missing.len());
        for obsid in &missing {
            println!("{obsid}");
        }

        if let Some(output) = output {
            write_obsids_file(&missing, &output, clobber)?;
        }

        Ok(())
    }
}
