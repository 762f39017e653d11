// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `gleam-x`
//! subcommands are contained in modules.
//!
//! All booleans must have `#[serde(default)]` annotated, and anything that
//! isn't a boolean must be optional. This allows all arguments to be optional
//! *and* usable in an arguments file.
//!
//! Only 3 things should be public in this module: `GleamX`, `GleamX::run`, and
//! `GleamXError`.

#[macro_use]
mod common;
mod error;
mod obsids;
mod solutions;

pub use error::GleamXError;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::info;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = r#"Calibration-solution quality assessment and obsid bookkeeping for the GLEAM-X pipeline"#
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct GleamX {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    #[clap(alias = "get-calibration-solutions")]
    #[clap(
        about = r#"Assess the quality of calibration solutions. With one obsid, print its solutions file if it is good. With many, assign each obsid the nearest good solutions in time."#
    )]
    SolutionsQuality(solutions::SolutionsQualityArgs),

    #[clap(alias = "aocal-phaseref")]
    #[clap(about = "Divide calibration solutions through by the phase of a reference tile.")]
    SolutionsPhaseRef(solutions::SolutionsPhaseRefArgs),

    #[clap(alias = "check-files")]
    #[clap(
        about = "Compare a file of obsids against files or folders in a directory and print the obsids that are missing."
    )]
    ObsidsCheck(obsids::ObsidsCheckArgs),
}

impl GleamX {
    pub fn run(self) -> Result<(), GleamXError> {
        // Set up logging.
        let GlobalArgs { verbosity } = self.global_opts;
        setup_logging(verbosity).map_err(|e| GleamXError::Generic(e.to_string()))?;

        // Print the version of gleam-x and its build-time information.
        let sub_command = match &self.command {
            Command::SolutionsQuality(_) => "solutions-quality",
            Command::SolutionsPhaseRef(_) => "solutions-phase-ref",
            Command::ObsidsCheck(_) => "obsids-check",
        };
        info!("gleam-x {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        match self.command {
            Command::SolutionsQuality(args) => {
                let args = args.merge()?;
                args.run()?;
            }

            Command::SolutionsPhaseRef(args) => args.run()?,
            Command::ObsidsCheck(args) => args.run()?,
        }

        info!("gleam-x {} complete.", sub_command);
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `stderr`, leaving `stdout`
/// for results that other pipeline scripts consume. `env_logger` automatically
/// only uses colours and fancy symbols if we're on a tty (e.g. a terminal);
/// piped output will be formatted sensibly. Source code lines are displayed in
/// log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stderr);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}

/// Write many info-level log lines of how this executable was compiled.
fn display_build_info() {
    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => {
            info!("Compiled on git commit hash: {hash}{dirty}");
        }
        None => info!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        info!("            git head ref: {}", hr);
    }
    info!("            {}", BUILT_TIME_UTC);
    info!("         with compiler {}", RUSTC_VERSION);
    info!("");
}
