// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to read and write "André Offringa style" calibration solutions.
//!
//! The layout is: the ASCII string "MWAOCAL", nine zero bytes, four
//! little-endian u32s (num. timeblocks, tiles, chanblocks and polarisations),
//! two little-endian f64s (start and end GPS times; 0 means unknown) and then
//! all of the gains as little-endian (re, im) f64 pairs in C order.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use hifitime::Epoch;
use ndarray::prelude::*;

use super::{error::*, CalibrationSolutions};
use crate::c64;

const NUM_POLARISATIONS: usize = 4;

/// "MWAOCAL", nine zero bytes, four u32s and two f64s.
const HEADER_BYTES: u64 = 7 + 9 + 4 * 4 + 2 * 8;

/// One (re, im) pair of f64s.
const GAIN_BYTES: u128 = 2 * 8;

pub(crate) fn read(file: &Path) -> Result<CalibrationSolutions, SolutionsReadError> {
    let file_str = file.display().to_string();
    // The file handle is dropped when this function returns; all of the data
    // is read into memory first.
    let mut bin_file = BufReader::new(File::open(file)?);
    // The first 7 bytes should be ASCII "MWAOCAL".
    let mut mwaocal = [0; 7];
    bin_file.read_exact(&mut mwaocal)?;
    if &mwaocal != b"MWAOCAL" {
        return Err(SolutionsReadError::AndreBinaryStr {
            file: file_str,
            got: String::from_utf8_lossy(&mwaocal).into_owned(),
        });
    }
    for _ in 0..9 {
        match bin_file.read_u8()? {
            0 => (),
            v => {
                return Err(SolutionsReadError::AndreBinaryVal {
                    file: file_str,
                    expected: "0",
                    got: v.to_string(),
                })
            }
        }
    }
    let num_timeblocks = bin_file.read_u32::<LittleEndian>()? as usize;
    let total_num_tiles = bin_file.read_u32::<LittleEndian>()? as usize;
    let total_num_chanblocks = bin_file.read_u32::<LittleEndian>()? as usize;
    let num_polarisations = bin_file.read_u32::<LittleEndian>()? as usize;
    if num_polarisations != NUM_POLARISATIONS {
        return Err(SolutionsReadError::AndreBinaryVal {
            file: file_str,
            expected: "4 (number of polarisations)",
            got: num_polarisations.to_string(),
        });
    }
    // If the start time (read in here as `t`) is 0, then we don't really have a
    // start time!
    let t = bin_file.read_f64::<LittleEndian>()?;
    let start_time = if t.abs() < f64::EPSILON {
        None
    } else {
        Some(Epoch::from_gpst_seconds(t))
    };
    // And similarly for the end time.
    let t = bin_file.read_f64::<LittleEndian>()?;
    let end_time = if t.abs() < f64::EPSILON {
        None
    } else {
        Some(Epoch::from_gpst_seconds(t))
    };

    // The rest of the binary is only gains. Check that the file holds exactly
    // as many as the header says before allocating anything. u32 dimensions
    // can't overflow a u128 byte count.
    let expected_bytes = num_timeblocks as u128
        * total_num_tiles as u128
        * total_num_chanblocks as u128
        * num_polarisations as u128
        * GAIN_BYTES;
    let actual_bytes = bin_file.get_ref().metadata()?.len().saturating_sub(HEADER_BYTES);
    if expected_bytes != u128::from(actual_bytes) {
        return Err(SolutionsReadError::BadShape {
            file: file_str,
            num_timeblocks,
            num_tiles: total_num_tiles,
            num_chanblocks: total_num_chanblocks,
            expected_bytes,
            actual_bytes,
        });
    }

    let mut gains = Array4::<c64>::zeros((
        num_timeblocks,
        total_num_tiles,
        total_num_chanblocks,
        num_polarisations,
    ));
    let mut floats = vec![0.0; 2 * gains.len()];
    bin_file.read_f64_into::<LittleEndian>(&mut floats)?;
    gains
        .iter_mut()
        .zip(floats.chunks_exact(2))
        .for_each(|(g, pair)| *g = c64::new(pair[0], pair[1]));

    Ok(CalibrationSolutions {
        start_time,
        end_time,
        ..CalibrationSolutions::from_gains(gains)
    })
}

/// Write a "André-Offringa calibrate format" calibration solutions binary file.
pub(crate) fn write(sols: &CalibrationSolutions, file: &Path) -> Result<(), SolutionsWriteError> {
    let (num_timeblocks, total_num_tiles, total_num_chanblocks, num_polarisations) =
        sols.gains.dim();
    if num_polarisations != NUM_POLARISATIONS {
        return Err(SolutionsWriteError::BadPolCount {
            got: num_polarisations,
        });
    }

    let mut bin_file = BufWriter::new(File::create(file)?);
    // 2 floats, 8 bytes per float.
    let mut buf = [0; 2 * 8];
    bin_file.write_all(b"MWAOCAL")?;
    bin_file.write_u8(0)?;
    bin_file.write_u32::<LittleEndian>(0)?;
    bin_file.write_u32::<LittleEndian>(0)?;
    bin_file.write_u32::<LittleEndian>(num_timeblocks as _)?;
    bin_file.write_u32::<LittleEndian>(total_num_tiles as _)?;
    bin_file.write_u32::<LittleEndian>(total_num_chanblocks as _)?;
    bin_file.write_u32::<LittleEndian>(num_polarisations as _)?;
    bin_file.write_f64::<LittleEndian>(sols.start_time.map(|e| e.to_gpst_seconds()).unwrap_or(0.0))?;
    bin_file.write_f64::<LittleEndian>(sols.end_time.map(|e| e.to_gpst_seconds()).unwrap_or(0.0))?;

    for g in sols.gains.iter() {
        LittleEndian::write_f64_into(&[g.re, g.im], &mut buf);
        bin_file.write_all(&buf)?;
    }
    bin_file.flush()?;
    Ok(())
}
